use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

/// Failures reported to clients as `{"error": "..."}` bodies.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::EmployeeNotFound => StatusCode::NOT_FOUND,
            ServerError::MissingField(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
