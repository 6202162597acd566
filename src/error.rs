use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures a recipe handler can answer with, each rendered as a `{success: false, ..}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Recipe not found")]
    NotFound,

    #[error("{0}")]
    Unauthorized(String),

    // the write transaction failed and was rolled back
    #[error("{0}")]
    CreationFailed(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::CreationFailed(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::NotFound | ApiError::Unauthorized(_) => {
                json!({ "success": false, "message": self.to_string() })
            }
            ApiError::CreationFailed(message) => {
                json!({ "success": false, "error": message })
            }
            ApiError::Internal(e) => {
                json!({ "success": false, "error": format!("{:#}", e) })
            }
        };

        (status, Json(body)).into_response()
    }
}
