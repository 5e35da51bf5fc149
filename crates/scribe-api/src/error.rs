use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::role::Role;

/// Anything that stops a relay from returning completion text.
///
/// Never surfaces as an HTTP failure: every variant renders as
/// `{"error": "<Role> error: ..."}` with status 200.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{role} error: {message}")]
    BadRequest { role: Role, message: String },

    #[error("{role} error: {source:#}")]
    Upstream {
        role: Role,
        #[source]
        source: anyhow::Error,
    },

    #[error("{role} error: model returned no completion text")]
    EmptyCompletion { role: Role },
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::BadRequest { .. } => tracing::warn!("Rejected request: {}", self),
            RelayError::Upstream { .. } | RelayError::EmptyCompletion { .. } => {
                tracing::error!("Completion failed: {}", self)
            }
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (StatusCode::OK, body).into_response()
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
