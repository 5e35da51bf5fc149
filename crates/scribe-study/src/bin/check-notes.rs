use scribe_study::{load_notes, logging::init_logging, StudyConfig};

/// Re-validate a previously saved notes file and report the result
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = StudyConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    init_logging(&config.logging);

    let path = &config.paths.notes_output;
    if !path.exists() {
        println!("{} not found. Run study-notes first.", path.display());
        std::process::exit(1);
    }

    match load_notes(path) {
        Ok(notes) => {
            println!("✅ {}: {} valid notes", path.display(), notes.notes().len());
            Ok(())
        }
        Err(e) => {
            println!("❌ {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
