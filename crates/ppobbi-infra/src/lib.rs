//! # Ppobbi Infrastructure
//!
//! Concrete implementations of the ports defined in `ppobbi-core`:
//! the JWT identity provider and the user stores.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory user store only
//! - `postgres` - PostgreSQL user store via SeaORM

pub mod auth;
pub mod database;

pub use auth::{JwtConfig, JwtIdentityProvider};
pub use database::{DatabaseConfig, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::PostgresUserRepository;
