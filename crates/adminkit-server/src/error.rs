//! Error types for the server crate.

use adminkit_runtime::DispatchError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;

/// Errors that can occur at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to start the server.
    #[error("failed to start server: {0}")]
    StartupFailed(String),

    /// Malformed request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Dispatch failure.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Dispatch(DispatchError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Dispatch(DispatchError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::StartupFailed(_) => "startup_failed",
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::Dispatch(err) => err.kind(),
        }
    }

    fn body(&self) -> Value {
        let mut error = json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });

        match self {
            ServerError::Dispatch(DispatchError::Forbidden {
                action_name,
                resource_id,
            }) => {
                error["actionName"] = json!(action_name);
                error["resourceId"] = json!(resource_id);
            }
            ServerError::Dispatch(DispatchError::Configuration { origin, .. }) => {
                error["origin"] = json!(origin);
            }
            _ => {}
        }

        json!({ "error": error })
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        }

        (status, Json(self.body())).into_response()
    }
}
