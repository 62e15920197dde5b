//! Response envelope and RFC 7807 error bodies.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every successful response: a semantic message and the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Request ID for debugging purposes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            instance: None,
            request_id: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserResponseMessage;
    use crate::dto::{SignUpOrInResponse, UserInfo};

    #[test]
    fn test_sign_in_envelope_body() {
        let envelope = ApiResponse::new(
            UserResponseMessage::SignInSuccess,
            SignUpOrInResponse::default(),
        );

        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"message":"SIGN_IN_SUCCESS","data":{}}"#
        );
    }

    #[test]
    fn test_user_info_envelope_body() {
        let envelope = ApiResponse::new(
            UserResponseMessage::GetUserInfoSuccess,
            UserInfo {
                id: 1,
                name: "alice".to_string(),
            },
        );

        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"message":"GET_USER_INFO_SUCCESS","data":{"id":1,"name":"alice"}}"#
        );
    }

    #[test]
    fn test_error_response_omits_empty_fields() {
        let body = serde_json::to_value(ErrorResponse::internal_error()).unwrap();

        assert_eq!(body["type"], "about:blank");
        assert_eq!(body["status"], 500);
        assert!(body.get("detail").is_none());
        assert!(body.get("request_id").is_none());
    }
}
