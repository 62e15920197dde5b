//! Success messages carried in the response envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Messages returned by the user endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserResponseMessage {
    SignInSuccess,
    GetUserInfoSuccess,
}

impl UserResponseMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserResponseMessage::SignInSuccess => "SIGN_IN_SUCCESS",
            UserResponseMessage::GetUserInfoSuccess => "GET_USER_INFO_SUCCESS",
        }
    }
}

impl fmt::Display for UserResponseMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserResponseMessage> for String {
    fn from(message: UserResponseMessage) -> Self {
        message.as_str().to_string()
    }
}
