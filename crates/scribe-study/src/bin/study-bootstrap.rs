use scribe_study::{bootstrap, logging::init_logging, BootstrapOutcome, StudyConfig, StudyError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = StudyConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    init_logging(&config.logging);

    let client = config.openai_client()?;
    let store = config.assistant_store();

    match bootstrap(
        &client,
        &store,
        &config.paths.documents_dir,
        &config.assistant_spec(),
    )
    .await
    {
        Ok(BootstrapOutcome::Reused(handle)) => {
            println!("Using existing assistant: {}", handle.id);
        }
        Ok(BootstrapOutcome::Created(handle)) => {
            println!("Created new assistant: {}", handle.id);
            println!("Assistant created with {} file(s)", handle.file_ids.len());
        }
        Err(e @ StudyError::NoDocuments(_)) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    println!("Bootstrap complete!");
    Ok(())
}
