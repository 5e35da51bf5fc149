use scribe_llm::ChatClient;
use std::sync::Arc;

use crate::config::Config;
use crate::role::Role;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub role: Role,
    pub config: Arc<Config>,
    pub llm_client: Arc<dyn ChatClient>,
}

impl AppState {
    pub fn new(role: Role, config: Config, llm_client: Arc<dyn ChatClient>) -> Self {
        Self {
            role,
            config: Arc::new(config),
            llm_client,
        }
    }
}
