use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::error::SchedulingError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
    }
}

impl From<SchedulingError> for ApiError {
    fn from(err: SchedulingError) -> Self {
        match &err {
            SchedulingError::Validation(_) => {
                warn!(error = %err, "request_rejected");
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            SchedulingError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            SchedulingError::Persistence { .. } => {
                error!(error = %err, "persistence_failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status_code": self.status.as_u16(),
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}
