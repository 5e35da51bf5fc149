use scribe_llm::{AssistantsApi, CreateAssistantRequest};
use std::path::{Path, PathBuf};

use crate::error::{Result, StudyError};
use crate::store::{AssistantHandle, AssistantStore};

pub const DEFAULT_ASSISTANT_NAME: &str = "Study Q&A Assistant";
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful tutor. \
Use the knowledge in the attached files to answer questions. \
Cite sources where possible.";

/// What to create when no usable assistant exists
#[derive(Debug, Clone)]
pub struct AssistantSpec {
    pub name: String,
    pub instructions: String,
    pub model: String,
}

impl AssistantSpec {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_ASSISTANT_NAME.to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            model: model.into(),
        }
    }

    fn to_request(&self, file_ids: Vec<String>) -> CreateAssistantRequest {
        CreateAssistantRequest::new(&self.model)
            .name(&self.name)
            .instructions(&self.instructions)
            .with_file_search(file_ids)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Stored id still resolves; nothing was uploaded or created
    Reused(AssistantHandle),
    Created(AssistantHandle),
}

impl BootstrapOutcome {
    pub fn handle(&self) -> &AssistantHandle {
        match self {
            Self::Reused(handle) | Self::Created(handle) => handle,
        }
    }
}

/// Resolve the stored assistant, or upload the reference documents and
/// create a new one.
///
/// A stored id that no longer resolves is discarded before recreation. When
/// there is nothing to reuse and `documents_dir` holds no PDFs, fails with
/// `StudyError::NoDocuments` without calling the remote service.
pub async fn bootstrap(
    api: &dyn AssistantsApi,
    store: &AssistantStore,
    documents_dir: &Path,
    spec: &AssistantSpec,
) -> Result<BootstrapOutcome> {
    if let Some(assistant_id) = store.load()? {
        tracing::info!(assistant_id = %assistant_id, "Using existing assistant");
        match api.retrieve_assistant(&assistant_id).await {
            Ok(assistant) => {
                return Ok(BootstrapOutcome::Reused(AssistantHandle::new(assistant.id)));
            }
            Err(e) => {
                tracing::warn!(assistant_id = %assistant_id, error = %e, "Stored assistant did not resolve, recreating");
                store.discard()?;
            }
        }
    }

    let documents = find_documents(documents_dir)?;
    if documents.is_empty() {
        return Err(StudyError::NoDocuments(documents_dir.to_path_buf()));
    }

    let mut file_ids = Vec::with_capacity(documents.len());
    for path in &documents {
        tracing::info!(file = %path.display(), "Uploading document");
        let file = api.upload_file(path).await?;
        tracing::info!(file_id = %file.id, "Uploaded document");
        file_ids.push(file.id);
    }

    let assistant = api.create_assistant(spec.to_request(file_ids.clone())).await?;
    store.save(&assistant.id)?;
    tracing::info!(assistant_id = %assistant.id, files = file_ids.len(), "Created assistant");

    Ok(BootstrapOutcome::Created(AssistantHandle::with_files(
        assistant.id,
        file_ids,
    )))
}

/// PDF files directly under `dir`, sorted by path. A missing directory has none.
pub fn find_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}
