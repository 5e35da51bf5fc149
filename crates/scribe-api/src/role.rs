use serde::Serialize;
use std::fmt;

/// Which relay a process runs. The two differ only in route, prompt and port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Writer,
    Critic,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Writer => "writer",
            Role::Critic => "critic",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Role::Writer => 8000,
            Role::Critic => 8001,
        }
    }

    /// Prefix for environment overrides, e.g. `WRITER_SERVER__PORT`
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Role::Writer => "WRITER",
            Role::Critic => "CRITIC",
        }
    }

    /// Route the relay answers on
    pub fn path(&self) -> &'static str {
        match self {
            Role::Writer => "/write",
            Role::Critic => "/critique",
        }
    }

    pub fn prompt(&self, input: &str) -> String {
        match self {
            Role::Writer => format!("Write a short informative article on the topic: {}", input),
            Role::Critic => format!(
                "You are a critic. Give constructive feedback for the following text:\n\n{}",
                input
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Writer => write!(f, "Writer"),
            Role::Critic => write!(f, "Critic"),
        }
    }
}
