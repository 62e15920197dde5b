//! Data Transfer Objects - request/response types for the user API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sign-up or sign-in request body.
///
/// The identity fields are owned by the client and the identity provider,
/// so the body is kept as the JSON object it arrived as. Any object
/// deserializes, `{}` included; arrays and scalars are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignUpOrInRequest {
    fields: Map<String, Value>,
}

impl SignUpOrInRequest {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value of `key`, if present and a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Acknowledgment for a sign-up or sign-in. Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpOrInResponse {}

/// A user's public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sign_up_request_accepts_empty_object() {
        let request: SignUpOrInRequest = serde_json::from_str("{}").unwrap();
        assert!(request.fields().is_empty());
    }

    #[test]
    fn test_sign_up_request_keeps_every_field() {
        let body = json!({
            "accessToken": "abc",
            "profile": { "nickname": "alice", "age": 7 },
            "tags": [1, 2, 3]
        });

        let request: SignUpOrInRequest = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(request.get_str("accessToken"), Some("abc"));
        assert_eq!(serde_json::to_value(&request).unwrap(), body);
    }

    #[test]
    fn test_sign_up_request_rejects_non_object() {
        assert!(serde_json::from_str::<SignUpOrInRequest>("[1, 2]").is_err());
        assert!(serde_json::from_str::<SignUpOrInRequest>("\"token\"").is_err());
    }

    #[test]
    fn test_get_str_ignores_non_string_values() {
        let request: SignUpOrInRequest =
            serde_json::from_value(json!({ "accessToken": 42 })).unwrap();
        assert_eq!(request.get_str("accessToken"), None);
        assert_eq!(request.get("accessToken"), Some(&json!(42)));
    }

    #[test]
    fn test_sign_up_response_serializes_as_empty_object() {
        let body = serde_json::to_string(&SignUpOrInResponse::default()).unwrap();
        assert_eq!(body, "{}");
    }
}
