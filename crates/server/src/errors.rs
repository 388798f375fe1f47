use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// HTTP-facing error: status plus a JSON body of
/// `{"error": <message>, "detail": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    message: &'static str,
    detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: &'static str, detail: Option<String>) -> Self {
        Self { status, message, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = self.message, detail = ?self.detail, "request failed");
        }
        let body = serde_json::json!({"error": self.message, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::NotFound(_)
            | ServiceError::IndexOutOfRange { .. }
            | ServiceError::Empty => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Storage(_) | ServiceError::Serde(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Failure", Some(e.to_string()))
            }
        }
    }
}
