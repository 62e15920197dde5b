//! Error handling - maps domain failures onto RFC 7807 responses.

use actix_web::{
    HttpMessage, HttpRequest, HttpResponse, ResponseError, error, http::StatusCode, web,
};
use thiserror::Error;
use tracing_actix_web::RequestId;

use ppobbi_core::error::{DomainError, RepoError};
use ppobbi_core::ports::AuthError;
use ppobbi_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Validation(detail) => {
                ErrorResponse::new(422, "Validation Failed").with_detail(detail)
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential(field) => {
                AppError::BadRequest(format!("Missing credential field `{}`", field))
            }
            AuthError::TokenExpired => AppError::Unauthorized("Access token expired".to_string()),
            AuthError::InvalidToken(reason) => {
                tracing::debug!(%reason, "Rejected access token");
                AppError::Unauthorized("Invalid access token".to_string())
            }
            AuthError::Issue(reason) => AppError::Internal(format!("Token issuance: {}", reason)),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Auth(err) => err.into(),
            DomainError::Repository(err) => err.into(),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Tag a problem with the request path and the request id assigned by `TracingLogger`.
pub fn for_request(problem: ErrorResponse, req: &HttpRequest) -> ErrorResponse {
    let problem = problem.with_instance(req.path());
    match req.extensions().get::<RequestId>() {
        Some(id) => problem.with_request_id(id.to_string()),
        None => problem,
    }
}

/// Largest accepted JSON request body, in bytes.
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// JSON body extraction settings: oversized bodies become 413 problems,
/// every other body failure a 400 problem.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, req| {
            tracing::debug!(error = %err, "Rejected request body");
            let (status, problem) = match &err {
                error::JsonPayloadError::Overflow { .. }
                | error::JsonPayloadError::OverflowKnownLength { .. } => (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorResponse::new(413, "Payload Too Large").with_detail(err.to_string()),
                ),
                _ => (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::bad_request(err.to_string()),
                ),
            };
            let response = HttpResponse::build(status).json(for_request(problem, req));
            error::InternalError::from_response(err, response).into()
        })
}
