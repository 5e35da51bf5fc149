use scribe_study::{
    generate_notes, logging::init_logging, until_interrupted, NotesOutcome, StudyConfig,
    StudyError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = StudyConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    init_logging(&config.logging);

    let handle = match config.assistant_store().load_handle() {
        Ok(handle) => handle,
        Err(e @ StudyError::NoAssistant(_)) => {
            println!("{}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    let client = config.openai_client()?;
    let output = &config.paths.notes_output;
    let poll = config.poll_config();

    println!("Using assistant: {}", handle.id);
    println!("Generating study notes...\n");

    let generation = generate_notes(
        &client,
        &handle,
        &poll,
        config.shape_policy(),
        output,
    );
    let Some(outcome) = until_interrupted(generation).await else {
        println!("\nCancelled.");
        std::process::exit(130);
    };

    match outcome? {
        NotesOutcome::Saved(notes) => {
            println!("Generated Study Notes:");
            println!("{}\n", "=".repeat(40));
            for note in notes.notes() {
                let page = note
                    .page_ref
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "–".to_string());
                println!("{}. {}", note.id, note.heading);
                println!("   Page: {}", page);
                println!("   {}\n", note.summary);
            }
            let shown = std::fs::canonicalize(output).unwrap_or_else(|_| output.clone());
            println!("Notes saved to {}", shown.display());
        }
        NotesOutcome::Rejected { raw, error } => {
            println!("\n⚠️ Failed to parse response as valid notes: {}", error);
            println!("\nRaw response:");
            println!("{}", raw);
            std::process::exit(1);
        }
        NotesOutcome::NoReply { .. } => {
            println!("No valid response found in assistant's message");
            std::process::exit(1);
        }
        NotesOutcome::Unsuccessful { run } => {
            println!("\n❌ Run failed with status: {}", run.status);
            if let Some(error) = &run.last_error {
                println!("Error: {}", error);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
