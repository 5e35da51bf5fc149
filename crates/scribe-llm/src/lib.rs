pub mod config;
pub mod openai;
pub mod traits;
pub mod types;

pub use config::OpenAIConfig;
pub use openai::OpenAIClient;
pub use traits::{AssistantsApi, ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
pub use types::{
    Annotation, Assistant, AssistantTool, ContentBlock, CreateAssistantRequest, FileCitation,
    FileObject, Message, MessageRole, Run, RunError, RunStatus, TextContent, ThreadMessage,
    ThreadObject,
};
