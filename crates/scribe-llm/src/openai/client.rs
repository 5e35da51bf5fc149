// OpenAI-specific client implementation

use crate::config::OpenAIConfig;
use crate::traits::{AssistantsApi, ChatClient, ChatRequest, ChatResponse, TokenUsage};
use crate::types::{
    Assistant, CreateAssistantRequest, FileObject, Run, ThreadMessage, ThreadObject,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

const OPENAI_BETA: &str = "openai-beta";
const ASSISTANTS_V2: &str = "assistants=v2";

/// OpenAI client (HTTP direct, no SDK)
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(OpenAIConfig::new(api_key))
    }

    /// Create client from full configuration (custom base URL, timeout)
    pub fn from_config(config: OpenAIConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .context("Invalid API key format")?,
        );
        headers.insert(HeaderName::from_static(OPENAI_BETA), HeaderValue::from_static(ASSISTANTS_V2));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.resolved_base_url(),
        })
    }

    /// Build chat completion request payload
    fn build_chat_request(&self, request: &ChatRequest) -> Result<Value> {
        let mut payload = serde_json::json!({
            "model": request.model,
            "messages": serde_json::to_value(&request.messages)?,
        });

        let obj = payload
            .as_object_mut()
            .context("chat payload is not an object")?;

        if let Some(temp) = request.options.temperature {
            obj.insert("temperature".to_string(), serde_json::json!(temp));
        }

        Ok(payload)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", path))?;

        Self::parse_response(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", path))?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }

        response.json().await.context("Failed to parse response")
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = self.build_chat_request(&request)?;

        tracing::debug!(model = %request.model, messages = request.messages.len(), "chat completion");
        let completion: OpenAIChatResponse = self.post_json("/chat/completions", &payload).await?;

        // First choice only; n is never set
        Ok(ChatResponse {
            content: completion
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content),
            usage: completion.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

#[async_trait]
impl AssistantsApi for OpenAIClient {
    async fn upload_file(&self, path: &Path) -> Result<FileObject> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let form = Form::new()
            .text("purpose", "assistants")
            .part("file", Part::bytes(bytes).file_name(file_name));

        let response = self
            .http_client
            .post(format!("{}/files", self.base_url))
            .multipart(form)
            .send()
            .await
            .context("Failed to upload file")?;

        Self::parse_response(response).await
    }

    async fn create_assistant(&self, request: CreateAssistantRequest) -> Result<Assistant> {
        self.post_json("/assistants", &serde_json::to_value(&request)?)
            .await
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.get_json(&format!("/assistants/{}", assistant_id)).await
    }

    async fn create_thread(&self) -> Result<ThreadObject> {
        self.post_json("/threads", &serde_json::json!({})).await
    }

    async fn create_message(&self, thread_id: &str, content: &str) -> Result<ThreadMessage> {
        let body = serde_json::json!({
            "role": "user",
            "content": content,
        });
        self.post_json(&format!("/threads/{}/messages", thread_id), &body)
            .await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        let body = serde_json::json!({ "assistant_id": assistant_id });
        self.post_json(&format!("/threads/{}/runs", thread_id), &body)
            .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get_json(&format!("/threads/{}/runs/{}", thread_id, run_id))
            .await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let page: ListResponse<ThreadMessage> = self
            .get_json(&format!("/threads/{}/messages?order=desc", thread_id))
            .await?;
        Ok(page.data)
    }
}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
