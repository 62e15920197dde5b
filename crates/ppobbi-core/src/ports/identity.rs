//! Identity provider port.

use async_trait::async_trait;

use ppobbi_shared::dto::SignUpOrInRequest;

/// An identity asserted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// Provider-unique account identifier.
    pub subject: String,
    pub name: Option<String>,
}

/// Resolves credentials into identities.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the identity carried by a sign-up or sign-in payload.
    async fn identify(&self, request: &SignUpOrInRequest) -> Result<ExternalIdentity, AuthError>;

    /// Resolve the identity behind an access token.
    async fn identify_token(&self, access_token: &str) -> Result<ExternalIdentity, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A token could not be minted.
    #[error("Token issuance failed: {0}")]
    Issue(String),
}
