use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures of the study pipeline.
///
/// Unsuccessful runs and rejected notes are not errors; they come back as
/// outcome values (`JobOutcome`, `NotesOutcome`).
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("Assistant not found at {}. Please run study-bootstrap first.", .0.display())]
    NoAssistant(PathBuf),

    #[error("No PDF files found in {}", .0.display())]
    NoDocuments(PathBuf),

    #[error("Run {run_id} did not finish within {waited:?}")]
    PollTimeout { run_id: String, waited: Duration },

    #[error("Invalid assistant record {}: {source}", .path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid notes: {0}")]
    Notes(#[from] NotesError),

    #[error("Remote service error: {0:#}")]
    Remote(#[from] anyhow::Error),
}

/// Why a structured notes payload was rejected
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected an object with a \"notes\" list")]
    MissingWrapper,

    #[error("bare JSON list without a \"notes\" wrapper")]
    BareList,

    #[error("note #{index}: {errors}")]
    Field {
        index: usize,
        errors: validator::ValidationErrors,
    },

    #[error("note {id}: {field} must not be blank")]
    Blank { id: i64, field: &'static str },

    #[error("expected exactly {expected} notes, got {actual}")]
    Count { expected: usize, actual: usize },

    #[error("note ids must be 1 through 10 exactly once, got {0:?}")]
    Ids(Vec<i64>),

    #[error("duplicate heading: {0:?}")]
    DuplicateHeading(String),
}

pub type Result<T> = std::result::Result<T, StudyError>;
