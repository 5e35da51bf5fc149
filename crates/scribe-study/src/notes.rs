use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

use crate::error::{NotesError, Result};
use crate::job::{run_job, JobOutcome, PollConfig};
use crate::reply::extract_reply;
use crate::store::AssistantHandle;
use scribe_llm::{AssistantsApi, Run};

/// Number of notes in a complete set
pub const NOTE_COUNT: usize = 10;

/// Fixed structured-output instruction posted to the assistant
pub const NOTES_PROMPT: &str = r#"Generate 10 study notes from the Linear Algebra textbook in JSON format. IMPORTANT: Each summary MUST be 150 characters or less!

The response must be valid JSON that matches this schema:
{
  "notes": [
    {
      "id": 1,
      "heading": "Example Heading",
      "summary": "Very short summary under 150 chars",
      "page_ref": 42  // Must be a number, or null if unknown
    },
    ...
  ]
}

Rules:
1. Generate exactly 10 notes
2. Each note must have id (1-10), heading, and summary
3. page_ref must be a number (like 42) or null if unknown
4. CRITICAL: Summary MUST be under 150 characters - longer summaries will cause errors
5. Focus on key concepts and theorems from the textbook
6. Response must be pure JSON (no markdown or other text)
7. Be very concise in summaries to stay under the 150 character limit
8. For page_ref, use actual page numbers from the textbook, or null if not found"#;

/// One study note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Note {
    #[validate(range(min = 1, max = 10))]
    pub id: i64,

    #[validate(length(min = 1))]
    pub heading: String,

    #[validate(length(min = 1, max = 150))]
    pub summary: String,

    /// Page number in the source PDF
    #[serde(default)]
    #[validate(range(min = 1))]
    pub page_ref: Option<i64>,
}

impl Note {
    pub fn new(id: i64, heading: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id,
            heading: heading.into(),
            summary: summary.into(),
            page_ref: None,
        }
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page_ref = Some(page);
        self
    }

    /// Field constraints plus non-blank heading and summary
    pub fn check(&self, index: usize) -> std::result::Result<(), NotesError> {
        self.validate()
            .map_err(|errors| NotesError::Field { index, errors })?;
        if self.heading.trim().is_empty() {
            return Err(NotesError::Blank {
                id: self.id,
                field: "heading",
            });
        }
        if self.summary.trim().is_empty() {
            return Err(NotesError::Blank {
                id: self.id,
                field: "summary",
            });
        }
        Ok(())
    }
}

/// Exactly ten valid notes with ids 1..=10 and unique headings.
///
/// Only constructible through validation, so holding one means the whole
/// set passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Note>", into = "Vec<Note>")]
pub struct NoteSet(Vec<Note>);

impl NoteSet {
    pub fn new(notes: Vec<Note>) -> std::result::Result<Self, NotesError> {
        for (index, note) in notes.iter().enumerate() {
            note.check(index)?;
        }

        if notes.len() != NOTE_COUNT {
            return Err(NotesError::Count {
                expected: NOTE_COUNT,
                actual: notes.len(),
            });
        }

        let mut ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
        ids.sort_unstable();
        if !ids.iter().copied().eq(1..=NOTE_COUNT as i64) {
            return Err(NotesError::Ids(ids));
        }

        let mut headings = HashSet::new();
        for note in &notes {
            if !headings.insert(note.heading.as_str()) {
                return Err(NotesError::DuplicateHeading(note.heading.clone()));
            }
        }

        Ok(Self(notes))
    }

    pub fn notes(&self) -> &[Note] {
        &self.0
    }
}

impl TryFrom<Vec<Note>> for NoteSet {
    type Error = NotesError;

    fn try_from(notes: Vec<Note>) -> std::result::Result<Self, Self::Error> {
        Self::new(notes)
    }
}

impl From<NoteSet> for Vec<Note> {
    fn from(set: NoteSet) -> Self {
        set.0
    }
}

/// How to treat a top-level JSON list that lacks the `notes` wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapePolicy {
    /// Wrap a bare list as `{"notes": [...]}`
    #[default]
    Lenient,
    /// Require the wrapper object
    Strict,
}

/// Body of the first fenced block (a `json` fence wins over a plain one),
/// or the whole text when there is no fence
pub fn strip_code_fence(text: &str) -> &str {
    let inner = if let Some((_, rest)) = text.split_once("```json") {
        rest
    } else if let Some((_, rest)) = text.split_once("```") {
        rest
    } else {
        return text.trim();
    };

    inner
        .split_once("```")
        .map_or(inner, |(body, _)| body)
        .trim()
}

/// Parse and validate an assistant reply into a complete note set
pub fn parse_notes(text: &str, policy: ShapePolicy) -> std::result::Result<NoteSet, NotesError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))?;

    let items = match value {
        Value::Object(mut map) => map.remove("notes").ok_or(NotesError::MissingWrapper)?,
        Value::Array(_) if policy == ShapePolicy::Lenient => {
            tracing::debug!("Wrapping bare notes list");
            value
        }
        Value::Array(_) => return Err(NotesError::BareList),
        _ => return Err(NotesError::MissingWrapper),
    };

    let notes: Vec<Note> = serde_json::from_value(items)?;
    NoteSet::new(notes)
}

/// Write the set as a pretty JSON array, replacing any previous file
pub fn save_notes(path: &Path, notes: &NoteSet) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(notes).map_err(NotesError::from)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Re-read a saved notes file, applying the same validation as generation
pub fn load_notes(path: &Path) -> Result<NoteSet> {
    let raw = std::fs::read_to_string(path)?;
    let notes: Vec<Note> = serde_json::from_str(&raw).map_err(NotesError::from)?;
    Ok(NoteSet::new(notes)?)
}

#[derive(Debug)]
pub enum NotesOutcome {
    Saved(NoteSet),
    /// Reply did not hold a valid note set; nothing was written
    Rejected { raw: String, error: NotesError },
    NoReply { run: Run },
    Unsuccessful { run: Run },
}

/// Ask the assistant for study notes and persist them if they validate
pub async fn generate_notes(
    api: &dyn AssistantsApi,
    handle: &AssistantHandle,
    poll: &PollConfig,
    policy: ShapePolicy,
    output: &Path,
) -> Result<NotesOutcome> {
    let message = match run_job(api, handle, NOTES_PROMPT, poll).await? {
        JobOutcome::Completed { message, .. } => message,
        JobOutcome::NoReply { run } => return Ok(NotesOutcome::NoReply { run }),
        JobOutcome::Unsuccessful { run } => return Ok(NotesOutcome::Unsuccessful { run }),
    };

    let raw = extract_reply(&message).text;
    match parse_notes(&raw, policy) {
        Ok(notes) => {
            save_notes(output, &notes)?;
            tracing::info!(path = %output.display(), "Saved study notes");
            Ok(NotesOutcome::Saved(notes))
        }
        Err(error) => {
            tracing::warn!(error = %error, "Rejected generated notes");
            Ok(NotesOutcome::Rejected { raw, error })
        }
    }
}
