#![allow(dead_code)]

use async_trait::async_trait;
use scribe_api::{config::Config, state::AppState, Role};
use scribe_llm::{ChatClient, ChatRequest, ChatResponse, MessageRole};
use std::sync::{Arc, Mutex};

/// Chat client returning one scripted result and recording every request
pub struct ScriptedChat {
    reply: Result<Option<String>, String>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChat {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(Some(text.to_string())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(None),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Text of the single user message in the last request
    pub fn last_prompt(&self) -> String {
        let requests = self.requests.lock().unwrap();
        let request = requests.last().expect("no chat request recorded");
        match &request.messages[..] {
            [message] if message.role == MessageRole::User => message.content.clone(),
            other => panic!("unexpected messages: {:?}", other),
        }
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn chat(&self, request: ChatRequest) -> anyhow::Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                usage: None,
            }),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

pub fn test_config(temperature: Option<f32>) -> Config {
    let mut toml = String::from(
        r#"
        [server]
        host = "127.0.0.1"
        port = 0

        [llm]
        model = "gpt-3.5-turbo"
        "#,
    );
    if let Some(t) = temperature {
        toml.push_str(&format!("temperature = {}\n", t));
    }
    toml::from_str(&toml).unwrap()
}

pub fn state(role: Role, chat: Arc<ScriptedChat>, temperature: Option<f32>) -> Arc<AppState> {
    Arc::new(AppState::new(role, test_config(temperature), chat))
}
