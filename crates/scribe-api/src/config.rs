use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use scribe_llm::OpenAIConfig;

use crate::role::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub openai_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on one relay request, completion included
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Left to the provider when unset
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: None,
            timeout_secs: None,
        }
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamConfig {
    /// Completion API base URL; the public endpoint when unset
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration for one relay role
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{role}.toml
    /// 3. Environment variables (WRITER_ or CRITIC_ prefix, `__` between
    ///    sections, e.g. CRITIC_SERVER__PORT=9001)
    pub fn load(role: Role) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", i64::from(role.default_port()))?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", role.name())).required(false))
            .add_source(
                Environment::with_prefix(role.env_prefix())
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ConfigError::Message("OPENAI_API_KEY environment variable is required".to_string())
        })?;

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        builder.build()?.try_deserialize()
    }

    pub fn openai_config(&self) -> OpenAIConfig {
        let mut openai = OpenAIConfig::new(self.openai_api_key.clone());
        if let Some(url) = &self.upstream.base_url {
            openai = openai.with_base_url(url.clone());
        }
        if let Some(secs) = self.llm.timeout_secs {
            openai = openai.with_timeout_secs(secs);
        }
        openai
    }
}

/// Settings for the chain driver
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_writer_url")]
    pub writer_url: String,
    #[serde(default = "default_critic_url")]
    pub critic_url: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_writer_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_critic_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_topic() -> String {
    crate::chain::DEFAULT_TOPIC.to_string()
}

impl ChainConfig {
    /// config/chain.toml, then CHAIN_ environment variables
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::with_name("config/chain").required(false))
            .add_source(
                Environment::with_prefix("CHAIN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
