use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

/// Error body: `{"status": 404, "error": "Not Found", "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status.as_u16(),
            error: self.status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: self.message.clone(),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::EmailTaken(_) | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::StudentNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Db(_) => {
                error!(err = %e, "store fault");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        debug!(err = %r, "rejected request body");
        Self::new(r.status(), r.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        debug!(err = %r, "rejected path parameter");
        Self::new(r.status(), r.body_text())
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_service_errors_to_statuses() {
        let e: JsonApiError = ServiceError::EmailTaken("diego@gmail.com".into()).into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "Email diego@gmail.com is already taken");

        let e: JsonApiError = ServiceError::StudentNotFound(999).into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.body().error, "Not Found");

        let e: JsonApiError = ServiceError::Db("boom".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn body_carries_status_reason_and_message() {
        let body = serde_json::to_value(JsonApiError::new(StatusCode::BAD_REQUEST, "nope").body()).unwrap();
        assert_eq!(body, serde_json::json!({"status": 400, "error": "Bad Request", "message": "nope"}));
    }
}
