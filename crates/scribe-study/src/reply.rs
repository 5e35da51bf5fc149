use scribe_llm::{Annotation, MessageRole, ThreadMessage};

const QUOTE_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// 1-based position in the reply
    pub index: usize,
    /// Marker text in the answer, e.g. `【4:0†source】`
    pub marker: String,
    pub file_id: String,
    pub quote: Option<String>,
}

impl Citation {
    /// One-line summary; quotes are cut to 100 characters
    pub fn preview(&self) -> String {
        match &self.quote {
            Some(quote) => {
                let cut: String = quote.chars().take(QUOTE_PREVIEW_CHARS).collect();
                format!("[{}] Quote: {}...", self.index, cut)
            }
            None => format!("[{}] {} (file {})", self.index, self.marker, self.file_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Most recent assistant-authored message. Expects newest-first order, as
/// the service returns it.
pub fn latest_assistant_message(messages: Vec<ThreadMessage>) -> Option<ThreadMessage> {
    messages
        .into_iter()
        .find(|m| m.role == MessageRole::Assistant)
}

/// Join the text blocks of `message` and collect its file citations
pub fn extract_reply(message: &ThreadMessage) -> Reply {
    let mut parts = Vec::new();
    let mut citations = Vec::new();

    for block in message.text_blocks() {
        parts.push(block.value.as_str());
        for annotation in &block.annotations {
            if let Annotation::FileCitation { text, file_citation } = annotation {
                citations.push(Citation {
                    index: citations.len() + 1,
                    marker: text.clone(),
                    file_id: file_citation.file_id.clone(),
                    quote: file_citation.quote.clone(),
                });
            }
        }
    }

    Reply {
        text: parts.join("\n"),
        citations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_llm::{ContentBlock, FileCitation, TextContent};

    fn cited_message() -> ThreadMessage {
        let mut msg = ThreadMessage::assistant_text("msg_a", "ignored");
        msg.content = vec![
            ContentBlock::Text {
                text: TextContent {
                    value: "Vectors are independent【4:0†source】.".into(),
                    annotations: vec![
                        Annotation::FileCitation {
                            text: "【4:0†source】".into(),
                            file_citation: FileCitation {
                                file_id: "file_pdf".into(),
                                quote: Some("x".repeat(150)),
                            },
                        },
                        Annotation::Unsupported,
                    ],
                },
            },
            ContentBlock::Unsupported,
            ContentBlock::Text {
                text: TextContent {
                    value: "See chapter 2【4:1†source】.".into(),
                    annotations: vec![Annotation::FileCitation {
                        text: "【4:1†source】".into(),
                        file_citation: FileCitation {
                            file_id: "file_pdf".into(),
                            quote: None,
                        },
                    }],
                },
            },
        ];
        msg
    }

    #[test]
    fn test_latest_assistant_skips_user_messages() {
        let messages = vec![
            ThreadMessage::user_text("msg_u2", "follow-up"),
            ThreadMessage::assistant_text("msg_a2", "newest answer"),
            ThreadMessage::assistant_text("msg_a1", "older answer"),
        ];
        let latest = latest_assistant_message(messages).unwrap();
        assert_eq!(latest.id, "msg_a2");
    }

    #[test]
    fn test_latest_assistant_none() {
        let messages = vec![ThreadMessage::user_text("msg_u", "question")];
        assert!(latest_assistant_message(messages).is_none());
    }

    #[test]
    fn test_extract_reply_joins_text_and_numbers_citations() {
        let reply = extract_reply(&cited_message());
        assert_eq!(
            reply.text,
            "Vectors are independent【4:0†source】.\nSee chapter 2【4:1†source】."
        );
        assert_eq!(reply.citations.len(), 2);
        assert_eq!(reply.citations[0].index, 1);
        assert_eq!(reply.citations[1].index, 2);
    }

    #[test]
    fn test_citation_preview_truncates_quote() {
        let reply = extract_reply(&cited_message());
        let preview = reply.citations[0].preview();
        assert_eq!(preview, format!("[1] Quote: {}...", "x".repeat(100)));
        assert_eq!(
            reply.citations[1].preview(),
            "[2] 【4:1†source】 (file file_pdf)"
        );
    }
}
