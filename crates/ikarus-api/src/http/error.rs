//! Maps relay failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use ikarus_types::error::RelayError;

/// Application-level error that maps to HTTP responses.
///
/// Renders as `{"error": "...", "details": "..."}` with the status the
/// relay error calls for.
#[derive(Debug)]
pub struct AppError(pub RelayError);

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        tracing::debug!(status = status.as_u16(), kind = %self.0.kind(), "responding with error");

        (status, Json(self.0.to_body())).into_response()
    }
}
