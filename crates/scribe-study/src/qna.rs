use scribe_llm::{AssistantsApi, Run};

use crate::error::Result;
use crate::job::{run_job, JobOutcome, PollConfig};
use crate::reply::{extract_reply, Reply};
use crate::store::AssistantHandle;

/// Fixed example set offered by the interactive menu
pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "Explain the difference between linearly independent and dependent vectors.",
    "What is a basis of a vector space? Give an example.",
    "How do you compute the inverse of a 2x2 matrix?",
    "What is the rank of a matrix and what does it tell us?",
];

#[derive(Debug, Clone)]
pub enum Answer {
    Replied(Reply),
    NoReply,
    Unsuccessful(Run),
}

/// One blocking question/answer round trip against the assistant
pub async fn ask_question(
    api: &dyn AssistantsApi,
    handle: &AssistantHandle,
    question: &str,
    poll: &PollConfig,
) -> Result<Answer> {
    tracing::info!(assistant_id = %handle.id, "Asking question");
    Ok(match run_job(api, handle, question, poll).await? {
        JobOutcome::Completed { message, .. } => Answer::Replied(extract_reply(&message)),
        JobOutcome::NoReply { .. } => Answer::NoReply,
        JobOutcome::Unsuccessful { run } => Answer::Unsuccessful(run),
    })
}
