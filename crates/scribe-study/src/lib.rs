pub mod bootstrap;
pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod notes;
pub mod qna;
pub mod reply;
pub mod store;

pub use bootstrap::{bootstrap, AssistantSpec, BootstrapOutcome};
pub use config::StudyConfig;
pub use error::{NotesError, StudyError};
pub use job::{poll_until_terminal, run_job, submit_job, until_interrupted, Job, JobOutcome, PollConfig};
pub use notes::{
    generate_notes, load_notes, parse_notes, save_notes, strip_code_fence, Note, NoteSet,
    NotesOutcome, ShapePolicy, NOTES_PROMPT,
};
pub use qna::{ask_question, Answer, EXAMPLE_QUESTIONS};
pub use reply::{extract_reply, latest_assistant_message, Citation, Reply};
pub use store::{AssistantHandle, AssistantStore};
