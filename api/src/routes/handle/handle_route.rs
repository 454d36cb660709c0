//! POST /handle — answers a prompt in the requested persona.

use std::sync::Arc;

use axum::{Json, extract::State};
use prompt_router::{InboundMessage, ResponseEnvelope};
use tracing::instrument;

use crate::{core::app_state::AppState, error_handler::AppResult};

/// Handler: POST /handle
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/handle \
///   -H 'content-type: application/json' \
///   -d '{"data":{"prompt":"What is justice?","role":"Philosopher"}}'
/// ```
#[instrument(name = "handle_route", skip_all)]
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(message): Json<InboundMessage>,
) -> AppResult<Json<ResponseEnvelope>> {
    let envelope = state.router.handle(message).await?;
    Ok(Json(envelope))
}
