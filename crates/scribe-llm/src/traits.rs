use crate::types::{
    Assistant, CreateAssistantRequest, FileObject, Message, Run, ThreadMessage, ThreadObject,
};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trait for single-shot chat completions (GPT-3.5, GPT-4, etc)
///
/// The relay agents only ever need one non-streaming completion per request.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Non-streaming chat completion
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// Trait for the hosted assistants API (files, assistants, threads, runs)
///
/// Every method is a single HTTP round trip. Run scheduling happens on the
/// remote side; callers poll `retrieve_run` until the status is terminal.
#[async_trait]
pub trait AssistantsApi: Send + Sync {
    /// Upload a local document for use with assistants
    async fn upload_file(&self, path: &Path) -> Result<FileObject>;

    async fn create_assistant(&self, request: CreateAssistantRequest) -> Result<Assistant>;

    /// Resolve a previously created assistant. Fails if the id no longer exists.
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;

    async fn create_thread(&self) -> Result<ThreadObject>;

    /// Append a user message to a thread
    async fn create_message(&self, thread_id: &str, content: &str) -> Result<ThreadMessage>;

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// List thread messages, newest first
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: ChatOptions,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: ChatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub temperature: Option<f32>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}
