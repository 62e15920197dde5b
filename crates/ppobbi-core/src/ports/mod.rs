//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod identity;
mod repository;
mod user_service;

pub use identity::{AuthError, ExternalIdentity, IdentityProvider};
pub use repository::{BaseRepository, UserRepository};
pub use user_service::{SignUpOrInOutcome, UserService};
