//! HTTP error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pond_core::PondError;
use serde_json::json;
use tracing::{debug, warn};

/// Error returned by handlers, rendered as a JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub fields: Vec<String>,
}

impl ApiError {
    fn bad_request(code: &'static str, message: String, fields: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message,
            fields,
        }
    }
}

impl From<PondError> for ApiError {
    fn from(err: PondError) -> Self {
        let message = err.to_string();
        match err {
            PondError::MissingField(fields) => Self::bad_request("missing_field", message, fields),
            PondError::TypeMismatch(fields) => Self::bad_request("type_mismatch", message, fields),
            PondError::InvalidBody(_) => Self::bad_request("invalid_body", message, vec![]),
            PondError::Storage(detail) => {
                // Driver detail stays in the log.
                debug!("Storage failure: {}", detail);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "storage_error",
                    message: "Internal server error".to_string(),
                    fields: vec![],
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        PondError::InvalidBody(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!("Rejected request ({}): {}", self.code, self.message);
        }

        let mut body = json!({
            "error": self.message,
            "code": self.code,
        });
        if !self.fields.is_empty() {
            body["fields"] = json!(self.fields);
        }
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let err: ApiError = PondError::MissingField(vec!["ph".into()]).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "missing_field");
        assert_eq!(err.fields, vec!["ph"]);

        let err: ApiError = PondError::TypeMismatch(vec!["ec".into()]).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "type_mismatch");
    }

    #[test]
    fn test_storage_error_hides_detail() {
        let err: ApiError = PondError::Storage("database is locked".into()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("locked"));
    }
}
