use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::role::Role;

pub const DEFAULT_TOPIC: &str = "Future of AI in Education";

/// Result of running writer then critic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Writer reply had no text; the critic was never called
    WriterFailed(String),
    CriticFailed { text: String, error: String },
    Completed { text: String, feedback: String },
}

/// Either relay envelope; only the field for the called role is read
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    text: Option<String>,
    feedback: Option<String>,
    error: Option<String>,
}

impl Envelope {
    fn error_or(self, missing: &str) -> String {
        self.error.unwrap_or_else(|| format!("response has no \"{}\" field", missing))
    }
}

async fn call(http: &reqwest::Client, base_url: &str, role: Role, body: serde_json::Value) -> Result<Envelope> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), role.path());
    tracing::info!(url = %url, "Calling {} agent", role.name());

    let response = http
        .post(&url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Failed to reach {} agent at {}", role.name(), url))?;

    response
        .json::<Envelope>()
        .await
        .with_context(|| format!("Invalid response from {} agent", role.name()))
}

/// Send `topic` to the writer, then its article to the critic.
///
/// Transport failures are errors; an error envelope from either service is
/// an outcome. No retry.
pub async fn run_chain(writer_url: &str, critic_url: &str, topic: &str) -> Result<ChainOutcome> {
    let http = reqwest::Client::new();

    let written = call(&http, writer_url, Role::Writer, json!({ "topic": topic })).await?;
    let text = match written.text {
        Some(text) => text,
        None => return Ok(ChainOutcome::WriterFailed(written.error_or("text"))),
    };

    let reviewed = call(&http, critic_url, Role::Critic, json!({ "text": text })).await?;
    Ok(match reviewed.feedback {
        Some(feedback) => ChainOutcome::Completed { text, feedback },
        None => ChainOutcome::CriticFailed {
            error: reviewed.error_or("feedback"),
            text,
        },
    })
}
