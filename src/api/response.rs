use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::store::StoreError;

/// Body of every error answer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Convert storage errors to HTTP responses
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        match &self {
            StoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, self.to_string()),
            StoreError::MissingField(_) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            StoreError::Database(_) | StoreError::Serialization(_) => {
                error!("Storage failure: {}", self);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
