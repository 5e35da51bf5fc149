use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::state::AppState;

/// Log one line per relay request, tagged with the serving role
pub async fn log_request(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        role = state.role.name(),
        method = %method,
        path = %path,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "Request processed"
    );

    response
}
