use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use scribe_llm::{ChatOptions, ChatRequest, Message};

use crate::{
    error::{RelayError, RelayResult},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct WriteRequest {
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WriteResponse {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CritiqueRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CritiqueResponse {
    pub feedback: String,
}

/// Write a short article on the requested topic
pub async fn write(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WriteRequest>, JsonRejection>,
) -> RelayResult<Json<WriteResponse>> {
    let Json(req) = payload.map_err(|rejection| bad_request(&state, rejection))?;
    let text = complete(&state, &req.topic).await?;
    Ok(Json(WriteResponse { text }))
}

/// Give constructive feedback on the submitted text
pub async fn critique(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CritiqueRequest>, JsonRejection>,
) -> RelayResult<Json<CritiqueResponse>> {
    let Json(req) = payload.map_err(|rejection| bad_request(&state, rejection))?;
    let feedback = complete(&state, &req.text).await?;
    Ok(Json(CritiqueResponse { feedback }))
}

fn bad_request(state: &AppState, rejection: JsonRejection) -> RelayError {
    RelayError::BadRequest {
        role: state.role,
        message: rejection.body_text(),
    }
}

/// One completion call for the role's prompt; no retry
async fn complete(state: &AppState, input: &str) -> RelayResult<String> {
    let llm = &state.config.llm;
    let mut options = ChatOptions::new();
    if let Some(temperature) = llm.temperature {
        options = options.temperature(temperature);
    }
    let request = ChatRequest::new(&llm.model, vec![Message::user(state.role.prompt(input))])
        .with_options(options);

    let response = state
        .llm_client
        .chat(request)
        .await
        .map_err(|source| RelayError::Upstream {
            role: state.role,
            source,
        })?;

    if let Some(usage) = &response.usage {
        tracing::debug!(
            role = state.role.name(),
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Completion received"
        );
    }

    response
        .content
        .ok_or(RelayError::EmptyCompletion { role: state.role })
}
