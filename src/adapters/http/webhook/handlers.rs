//! HTTP handler receiving connector webhook calls.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::ConnectClient;
use crate::domain::errors::DecodeError;

use super::dto::ErrorResponse;

/// Acknowledges an inbound message once it is handed to the bot's handler.
///
/// The handler runs in its own task; its outcome never changes the status.
pub async fn receive_message(
    State(client): State<Arc<ConnectClient>>,
    body: Bytes,
) -> Result<StatusCode, WebhookApiError> {
    client.dispatch(&body)?;
    Ok(StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts decode failures to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(DecodeError);

impl From<DecodeError> for WebhookApiError {
    fn from(err: DecodeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let error_code = match &self.0 {
            DecodeError::EmptyBody => "EMPTY_BODY",
            err @ DecodeError::Json(_) if err.is_syntax() => "INVALID_JSON",
            DecodeError::MissingField(_) => "MISSING_FIELD",
            _ => "INVALID_PAYLOAD",
        };
        tracing::warn!(error = %self.0, "Rejected webhook payload");

        let error = ErrorResponse::new(error_code, self.0.to_string());
        (StatusCode::BAD_REQUEST, Json(error)).into_response()
    }
}
