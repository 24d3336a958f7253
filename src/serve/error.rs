use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// Boundary error for the HTTP layer. Everything a handler can fail with
/// is converted here into a status code plus an `{"error": ...}` body;
/// internal detail is logged, never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    /// A required query parameter was absent.
    MissingParam(&'static str),
    /// A query parameter was present but unusable.
    InvalidParam(String),
    /// Read/parse/serialization failure under the hood.
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingParam(name) => {
                warn!(param = name, "rejected request: missing parameter");
                (
                    StatusCode::BAD_REQUEST,
                    format!("missing required query parameter `{name}`"),
                )
            }
            Self::InvalidParam(detail) => {
                warn!(%detail, "rejected request: invalid parameter");
                (StatusCode::BAD_REQUEST, detail)
            }
            Self::Internal(err) => {
                error!(error = format!("{err:#}"), "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to load pitch data".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
