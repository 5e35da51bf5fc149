use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, StudyError};

/// Resolved assistant, passed explicitly to every step that needs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantHandle {
    pub id: String,
    /// Documents attached at creation. Empty when the handle was loaded
    /// from the record, which only stores the assistant id.
    pub file_ids: Vec<String>,
}

impl AssistantHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_ids: Vec::new(),
        }
    }

    pub fn with_files(id: impl Into<String>, file_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            file_ids,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AssistantRecord {
    #[serde(default)]
    assistant_id: Option<String>,
}

/// `{"assistant_id": "..."}` file shared by every study binary
#[derive(Debug, Clone)]
pub struct AssistantStore {
    path: PathBuf,
}

impl AssistantStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored assistant id, `None` when the file or the key is absent
    pub fn load(&self) -> Result<Option<String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: AssistantRecord =
            serde_json::from_str(&raw).map_err(|source| StudyError::Record {
                path: self.path.clone(),
                source,
            })?;

        Ok(record.assistant_id.filter(|id| !id.is_empty()))
    }

    /// Handle for an already bootstrapped assistant
    pub fn load_handle(&self) -> Result<AssistantHandle> {
        self.load()?
            .map(AssistantHandle::new)
            .ok_or_else(|| StudyError::NoAssistant(self.path.clone()))
    }

    pub fn save(&self, assistant_id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let record = AssistantRecord {
            assistant_id: Some(assistant_id.to_string()),
        };
        let json = serde_json::to_string(&record).map_err(|source| StudyError::Record {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove a stale record. Missing file is not an error.
    pub fn discard(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
