use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use scribe_llm::{ChatClient, OpenAIClient};

use crate::{
    config::Config,
    logging::init_logging,
    middleware::logging,
    role::Role,
    routes::{agents, health},
    state::AppState,
};

/// Router for one role: its relay route plus `/health`
pub fn build_router(state: Arc<AppState>) -> Router {
    let relay = match state.role {
        Role::Writer => post(agents::write),
        Role::Critic => post(agents::critique),
    };
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .route(state.role.path(), relay)
        .layer(middleware::from_fn_with_state(state.clone(), logging::log_request))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load configuration for `role`, bind its port and serve until the process ends
pub async fn serve(role: Role) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load(role)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config.logging);

    tracing::info!("Starting {} agent", role.name());
    tracing::info!(model = %config.llm.model, "Initializing LLM client");
    let llm_client: Arc<dyn ChatClient> = Arc::new(OpenAIClient::from_config(config.openai_config())?);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(role, config, llm_client));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Relay endpoint: POST http://{}{}", addr, role.path());

    axum::serve(listener, app).await?;

    Ok(())
}
