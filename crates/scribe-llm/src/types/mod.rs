pub mod assistants;
pub mod message;

pub use assistants::{
    Annotation, Assistant, AssistantTool, ContentBlock, CreateAssistantRequest, FileCitation,
    FileObject, FilePathRef, MessageRole, Run, RunError, RunStatus, TextContent, ThreadMessage,
    ThreadObject,
};
pub use message::Message;
