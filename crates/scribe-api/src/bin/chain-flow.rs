use scribe_api::{config::ChainConfig, logging::init_logging, run_chain, ChainOutcome};

/// Drive a running writer and critic once with the configured topic
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ChainConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    init_logging(&config.logging);

    println!("🟢 Sending topic to the writer agent: {}", config.topic);
    let outcome = run_chain(&config.writer_url, &config.critic_url, &config.topic).await?;

    match outcome {
        ChainOutcome::WriterFailed(error) => {
            println!("❌ Error from writer agent: {}", error);
            std::process::exit(1);
        }
        ChainOutcome::CriticFailed { text, error } => {
            println!("✅ Text received:\n{}", text);
            println!("\n❌ Error from critic agent: {}", error);
            std::process::exit(1);
        }
        ChainOutcome::Completed { text, feedback } => {
            println!("✅ Text received:\n{}", text);
            println!("\n✅ Feedback received:\n{}", feedback);
        }
    }

    Ok(())
}
