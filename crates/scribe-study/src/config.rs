use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scribe_llm::{OpenAIClient, OpenAIConfig};

use crate::bootstrap::{AssistantSpec, DEFAULT_ASSISTANT_NAME, DEFAULT_INSTRUCTIONS};
use crate::job::{PollConfig, DEFAULT_POLL_INTERVAL_MS, DEFAULT_POLL_TIMEOUT_SECS};
use crate::notes::ShapePolicy;
use crate::store::AssistantStore;

#[derive(Debug, Clone, Deserialize)]
pub struct StudyConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub openai_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_assistant_record")]
    pub assistant_record: PathBuf,
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,
    #[serde(default = "default_notes_output")]
    pub notes_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            assistant_record: default_assistant_record(),
            documents_dir: default_documents_dir(),
            notes_output: default_notes_output(),
        }
    }
}

fn default_assistant_record() -> PathBuf {
    PathBuf::from("assistant_id.json")
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_notes_output() -> PathBuf {
    PathBuf::from("exam_notes.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_assistant_name")]
    pub name: String,
    #[serde(default = "default_assistant_model")]
    pub model: String,
    #[serde(default = "default_instructions")]
    pub instructions: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            model: default_assistant_model(),
            instructions: default_instructions(),
        }
    }
}

fn default_assistant_name() -> String {
    DEFAULT_ASSISTANT_NAME.to_string()
}

fn default_assistant_model() -> String {
    "gpt-3.5-turbo-1106".to_string()
}

fn default_instructions() -> String {
    DEFAULT_INSTRUCTIONS.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Ceiling for a single run; the service itself imposes none we can rely on
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
        }
    }
}

fn default_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_POLL_TIMEOUT_SECS
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotesConfig {
    /// Reject a bare list instead of wrapping it under "notes"
    #[serde(default)]
    pub strict_shape: bool,
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
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl StudyConfig {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. built-in defaults
    /// 2. config/study.toml
    /// 3. Environment variables (STUDY_ prefix, `__` between sections,
    ///    e.g. STUDY_POLL__TIMEOUT_SECS=120)
    pub fn load() -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/study").required(false))
            .add_source(
                Environment::with_prefix("STUDY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: StudyConfig = builder.build()?.try_deserialize()?;

        // Secrets from ENV (not in TOML)
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            cfg.openai_api_key = key;
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            cfg.openai_base_url = Some(url);
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        builder.build()?.try_deserialize()
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig::default()
            .with_interval(Duration::from_millis(self.poll.interval_ms))
            .with_timeout(Duration::from_secs(self.poll.timeout_secs))
    }

    pub fn shape_policy(&self) -> ShapePolicy {
        if self.notes.strict_shape {
            ShapePolicy::Strict
        } else {
            ShapePolicy::Lenient
        }
    }

    pub fn assistant_spec(&self) -> AssistantSpec {
        AssistantSpec {
            name: self.assistant.name.clone(),
            instructions: self.assistant.instructions.clone(),
            model: self.assistant.model.clone(),
        }
    }

    pub fn assistant_store(&self) -> AssistantStore {
        AssistantStore::new(&self.paths.assistant_record)
    }

    /// Remote client built from the secret and optional base URL
    pub fn openai_client(&self) -> anyhow::Result<OpenAIClient> {
        if self.openai_api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY environment variable is required");
        }
        let mut config = OpenAIConfig::new(self.openai_api_key.clone());
        if let Some(url) = &self.openai_base_url {
            config = config.with_base_url(url.clone());
        }
        OpenAIClient::from_config(config)
    }
}
