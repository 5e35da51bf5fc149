#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use scribe_llm::{
    Assistant, AssistantsApi, CreateAssistantRequest, FileObject, Run, RunError, RunStatus,
    ThreadMessage, ThreadObject,
};
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const THREAD_ID: &str = "thread_1";
pub const RUN_ID: &str = "run_1";

/// In-memory assistants API with scripted run statuses and call counters
#[derive(Default)]
pub struct FakeAssistants {
    statuses: Mutex<VecDeque<RunStatus>>,
    last_error: Mutex<Option<RunError>>,
    reply: Mutex<Option<String>>,
    known_assistants: Mutex<HashSet<String>>,
    pub prompts: Mutex<Vec<String>>,
    pub run_assistants: Mutex<Vec<String>>,
    pub uploads: AtomicUsize,
    pub creations: AtomicUsize,
    pub retrievals: AtomicUsize,
    pub polls: AtomicUsize,
    pub listings: AtomicUsize,
}

impl FakeAssistants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statuses returned by successive `retrieve_run` calls. Once exhausted
    /// the run reports `running` forever.
    pub fn with_statuses(self, statuses: &[RunStatus]) -> Self {
        *self.statuses.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    pub fn with_last_error(self, code: &str, message: &str) -> Self {
        *self.last_error.lock().unwrap() = Some(RunError {
            code: code.to_string(),
            message: message.to_string(),
        });
        self
    }

    pub fn with_reply(self, text: impl Into<String>) -> Self {
        *self.reply.lock().unwrap() = Some(text.into());
        self
    }

    pub fn with_assistant(self, id: &str) -> Self {
        self.known_assistants.lock().unwrap().insert(id.to_string());
        self
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn run(&self, status: RunStatus) -> Run {
        let last_error = if status == RunStatus::Completed || !status.is_terminal() {
            None
        } else {
            self.last_error.lock().unwrap().clone()
        };
        Run {
            id: RUN_ID.to_string(),
            thread_id: THREAD_ID.to_string(),
            assistant_id: None,
            status,
            last_error,
        }
    }
}

#[async_trait]
impl AssistantsApi for FakeAssistants {
    async fn upload_file(&self, path: &Path) -> Result<FileObject> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(FileObject {
            id: format!("file_{}", n),
            filename: path.file_name().map(|f| f.to_string_lossy().into_owned()),
            bytes: None,
        })
    }

    async fn create_assistant(&self, request: CreateAssistantRequest) -> Result<Assistant> {
        let n = self.creations.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("asst_new_{}", n);
        self.known_assistants.lock().unwrap().insert(id.clone());
        Ok(Assistant {
            id,
            name: request.name,
            model: request.model,
            instructions: request.instructions,
            tools: request.tools,
        })
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.retrievals.fetch_add(1, Ordering::SeqCst);
        if !self.known_assistants.lock().unwrap().contains(assistant_id) {
            anyhow::bail!(
                "OpenAI API error (404 Not Found): No assistant found with id '{}'.",
                assistant_id
            );
        }
        Ok(Assistant {
            id: assistant_id.to_string(),
            name: None,
            model: "gpt-3.5-turbo-1106".to_string(),
            instructions: None,
            tools: Vec::new(),
        })
    }

    async fn create_thread(&self) -> Result<ThreadObject> {
        Ok(ThreadObject {
            id: THREAD_ID.to_string(),
        })
    }

    async fn create_message(&self, thread_id: &str, content: &str) -> Result<ThreadMessage> {
        assert_eq!(thread_id, THREAD_ID);
        self.prompts.lock().unwrap().push(content.to_string());
        Ok(ThreadMessage::user_text("msg_user", content))
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        assert_eq!(thread_id, THREAD_ID);
        self.run_assistants
            .lock()
            .unwrap()
            .push(assistant_id.to_string());
        Ok(self.run(RunStatus::Created))
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        assert_eq!(thread_id, THREAD_ID);
        assert_eq!(run_id, RUN_ID);
        self.polls.fetch_add(1, Ordering::SeqCst);
        let status = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RunStatus::Running);
        Ok(self.run(status))
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        assert_eq!(thread_id, THREAD_ID);
        self.listings.fetch_add(1, Ordering::SeqCst);
        let mut messages = Vec::new();
        if let Some(text) = self.reply.lock().unwrap().clone() {
            messages.push(ThreadMessage::assistant_text("msg_assistant", text));
        }
        messages.push(ThreadMessage::user_text("msg_user", "prompt"));
        Ok(messages)
    }
}

/// JSON for ten valid notes wrapped under "notes"
pub fn valid_notes_json() -> String {
    let notes: Vec<serde_json::Value> = (1..=10)
        .map(|i: i64| {
            let page_ref = (i % 2 == 0).then_some(i * 10);
            serde_json::json!({
                "id": i,
                "heading": format!("Concept {}", i),
                "summary": format!("Short summary of concept {}.", i),
                "page_ref": page_ref,
            })
        })
        .collect();
    serde_json::json!({ "notes": notes }).to_string()
}
