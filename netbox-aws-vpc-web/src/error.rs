//! HTTP mapping of `CoreError`.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use netbox_aws_vpc_core::error::{CoreError, ValidationErrors};

/// Field name used for errors that are not tied to one field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ApiError {
    /// A 400 carrying one message under `non_field_errors`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(CoreError::Validation(ValidationErrors::single(
            NON_FIELD_ERRORS,
            message,
        )))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::Protected { .. } | CoreError::Integrity(_) => StatusCode::CONFLICT,
            CoreError::SerializationError(_) | CoreError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.is_expected() {
            tracing::warn!(error = %self.0, "request rejected");
        } else {
            tracing::error!(error = %self.0, "request failed");
        }
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Malformed JSON bodies and query strings become 400 validation errors.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::bad_request(err.to_string()).into()
}

pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::bad_request(err.to_string()).into()
}

/// A path segment that does not parse, e.g. a non-numeric id.
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::bad_request(err.to_string()).into()
}
