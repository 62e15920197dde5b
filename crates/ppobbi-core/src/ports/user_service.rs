//! User-account service port consumed by the HTTP layer.

use async_trait::async_trait;

use ppobbi_shared::dto::{SignUpOrInRequest, UserInfo};

use crate::domain::User;
use crate::error::DomainError;

/// Result of a sign-up-or-sign-in call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOrInOutcome {
    pub user: User,
    /// `true` when the call registered a new account.
    pub created: bool,
}

#[async_trait]
pub trait UserService: Send + Sync {
    /// Register the caller if unknown, otherwise sign them in.
    async fn sign_up_or_in(
        &self,
        request: SignUpOrInRequest,
    ) -> Result<SignUpOrInOutcome, DomainError>;

    /// Look up the user behind an access token.
    async fn get_user_info(&self, access_token: &str) -> Result<UserInfo, DomainError>;
}
