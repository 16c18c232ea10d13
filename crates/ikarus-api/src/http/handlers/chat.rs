//! `POST /api/chat`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::Instrument;
use uuid::Uuid;

use ikarus_types::chat::{ChatReply, ChatRequest};
use ikarus_types::error::RelayError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Relay one submission.
///
/// The credential check runs before the body is parsed, so an unconfigured
/// server answers 500 even for malformed requests.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatReply>, AppError> {
    let request_id = Uuid::now_v7();

    async move {
        state.relay.ensure_configured()?;

        let request: ChatRequest = serde_json::from_slice(&body)
            .map_err(|e| RelayError::InvalidBody(e.to_string()))?;

        let reply = state.relay.relay(&request).await?;
        tracing::info!("chat request completed");
        Ok::<_, AppError>(Json(reply))
    }
    .instrument(tracing::info_span!("chat_request", %request_id))
    .await
}

/// Pre-flight answer. The CORS layer adds the headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
