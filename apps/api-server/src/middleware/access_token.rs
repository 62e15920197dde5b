//! `access-token` header extractor.

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::StatusCode};
use std::fmt;
use std::future::{Ready, ready};

use ppobbi_shared::ErrorResponse;

use super::error::for_request;

/// Header carrying the caller's access token.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

/// Access token taken from the `access-token` request header.
///
/// Requests without a usable header are rejected with 400 before the
/// handler runs:
/// ```ignore
/// async fn route(token: AccessToken) -> impl Responder {
///     format!("token: {}", token.as_str())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejection for a missing or unreadable `access-token` header.
#[derive(Debug)]
pub struct AccessTokenRejection(ErrorResponse);

impl fmt::Display for AccessTokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.detail.as_deref().unwrap_or(&self.0.title))
    }
}

impl actix_web::ResponseError for AccessTokenRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

fn reject(req: &HttpRequest, detail: &str) -> AccessTokenRejection {
    tracing::debug!(path = %req.path(), detail, "Rejected request without access token");
    AccessTokenRejection(for_request(ErrorResponse::bad_request(detail), req))
}

impl FromRequest for AccessToken {
    type Error = AccessTokenRejection;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let value = match req.headers().get(ACCESS_TOKEN_HEADER) {
            Some(value) => value,
            None => {
                return ready(Err(reject(
                    req,
                    "Required request header 'access-token' is not present",
                )));
            }
        };

        let token = match value.to_str() {
            Ok(s) => s.trim(),
            Err(_) => {
                return ready(Err(reject(
                    req,
                    "Request header 'access-token' is not valid text",
                )));
            }
        };

        if token.is_empty() {
            return ready(Err(reject(req, "Request header 'access-token' is empty")));
        }

        ready(Ok(AccessToken(token.to_string())))
    }
}
