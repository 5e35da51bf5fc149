// Connection settings for the OpenAI-compatible backend

use serde::{Deserialize, Serialize};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Configuration for the OpenAI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Base URL for OpenAI API (optional, defaults to https://api.openai.com/v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds (optional, no timeout when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Base URL with any trailing slash removed
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(OPENAI_API_BASE)
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = OpenAIConfig::new("test-key");
        assert_eq!(config.resolved_base_url(), OPENAI_API_BASE);
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let config = OpenAIConfig::new("test-key").with_base_url("http://localhost:1234/v1/");
        assert_eq!(config.resolved_base_url(), "http://localhost:1234/v1");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = OpenAIConfig::new("test-key")
            .with_base_url("http://localhost:1234")
            .with_timeout_secs(30);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: OpenAIConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.base_url.as_deref(), Some("http://localhost:1234"));
        assert_eq!(deserialized.timeout_secs, Some(30));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = serde_json::to_string(&OpenAIConfig::new("k")).unwrap();
        assert!(!json.contains("base_url"));
        assert!(!json.contains("timeout_secs"));
    }
}
