//! Identity provider implementations.

mod jwt_identity;

pub use jwt_identity::{JwtConfig, JwtIdentityProvider};
