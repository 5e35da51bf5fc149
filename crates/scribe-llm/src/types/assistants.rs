// Hosted assistants API objects
// https://platform.openai.com/docs/api-reference/assistants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Run lifecycle, collapsed to the states callers act on.
///
/// The service reports a few more fine-grained states; they are folded in
/// through aliases so polling only has to reason about six values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[serde(alias = "queued")]
    Created,
    #[serde(alias = "in_progress", alias = "requires_action", alias = "cancelling")]
    Running,
    Completed,
    #[serde(alias = "incomplete")]
    Failed,
    Cancelled,
    Expired,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Expired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A unit of asynchronous work executed by an assistant on a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    #[serde(default)]
    pub assistant_id: Option<String>,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Message stored in a remote thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl ThreadMessage {
    /// Assistant message holding a single text block
    pub fn assistant_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thread_id: None,
            role: MessageRole::Assistant,
            content: vec![ContentBlock::Text {
                text: TextContent {
                    value: text.into(),
                    annotations: Vec::new(),
                },
            }],
            created_at: Utc::now(),
        }
    }

    /// User message holding a single text block
    pub fn user_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            ..Self::assistant_text(id, text)
        }
    }

    /// Text blocks in order, skipping anything that is not text
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextContent> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Unsupported => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: TextContent,
    },

    /// Image files, refusals and other block kinds we do not read
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    FileCitation {
        text: String,
        file_citation: FileCitation,
    },
    FilePath {
        text: String,
        file_path: FilePathRef,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCitation {
    pub file_id: String,
    /// Present on older API versions only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePathRef {
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadObject {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantTool {
    FileSearch,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
}

/// Payload for `POST /assistants`
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssistantRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<AssistantTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
}

impl CreateAssistantRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            name: None,
            instructions: None,
            tools: Vec::new(),
            tool_resources: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Enable document search over a new vector store built from `file_ids`
    pub fn with_file_search(mut self, file_ids: Vec<String>) -> Self {
        if !self.tools.contains(&AssistantTool::FileSearch) {
            self.tools.push(AssistantTool::FileSearch);
        }
        self.tool_resources = Some(ToolResources {
            file_search: Some(FileSearchResources {
                vector_stores: vec![VectorStoreSpec { file_ids }],
            }),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_search: Option<FileSearchResources>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSearchResources {
    pub vector_stores: Vec<VectorStoreSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VectorStoreSpec {
    pub file_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_status_wire_aliases() {
        let cases = [
            ("queued", RunStatus::Created),
            ("in_progress", RunStatus::Running),
            ("requires_action", RunStatus::Running),
            ("cancelling", RunStatus::Running),
            ("completed", RunStatus::Completed),
            ("incomplete", RunStatus::Failed),
            ("failed", RunStatus::Failed),
            ("cancelled", RunStatus::Cancelled),
            ("expired", RunStatus::Expired),
        ];
        for (wire, expected) in cases {
            let status: RunStatus = serde_json::from_value(json!(wire)).unwrap();
            assert_eq!(status, expected, "wire status {}", wire);
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!RunStatus::Created.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(RunStatus::Expired.is_terminal());
    }

    #[test]
    fn test_run_with_last_error() {
        let run: Run = serde_json::from_value(json!({
            "id": "run_1",
            "object": "thread.run",
            "thread_id": "thread_1",
            "assistant_id": "asst_1",
            "status": "failed",
            "last_error": {"code": "rate_limit_exceeded", "message": "slow down"}
        }))
        .unwrap();

        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(
            run.last_error.unwrap().to_string(),
            "rate_limit_exceeded: slow down"
        );
    }

    #[test]
    fn test_message_with_citation_and_image_block() {
        let msg: ThreadMessage = serde_json::from_value(json!({
            "id": "msg_1",
            "thread_id": "thread_1",
            "role": "assistant",
            "created_at": 1_700_000_000,
            "content": [
                {"type": "image_file", "image_file": {"file_id": "file_img"}},
                {"type": "text", "text": {
                    "value": "A basis spans the space [1].",
                    "annotations": [
                        {"type": "file_citation", "text": "[1]", "start_index": 25, "end_index": 28,
                         "file_citation": {"file_id": "file_pdf"}}
                    ]
                }}
            ]
        }))
        .unwrap();

        assert_eq!(msg.role, MessageRole::Assistant);
        assert!(matches!(msg.content[0], ContentBlock::Unsupported));
        let blocks: Vec<_> = msg.text_blocks().collect();
        assert_eq!(blocks.len(), 1);
        match &blocks[0].annotations[0] {
            Annotation::FileCitation { file_citation, .. } => {
                assert_eq!(file_citation.file_id, "file_pdf");
                assert!(file_citation.quote.is_none());
            }
            other => panic!("unexpected annotation: {:?}", other),
        }
    }

    #[test]
    fn test_create_assistant_request_payload() {
        let request = CreateAssistantRequest::new("gpt-4o-mini")
            .name("Study Q&A Assistant")
            .instructions("You are a helpful tutor.")
            .with_file_search(vec!["file_a".into(), "file_b".into()]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tools"], json!([{"type": "file_search"}]));
        assert_eq!(
            value["tool_resources"]["file_search"]["vector_stores"][0]["file_ids"],
            json!(["file_a", "file_b"])
        );
    }

    #[test]
    fn test_user_text_helper() {
        let msg = ThreadMessage::user_text("msg_u", "hi");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.text_blocks().next().unwrap().value, "hi");
    }
}
