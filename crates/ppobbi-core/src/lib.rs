//! # Ppobbi Core
//!
//! The domain layer of the user API: entities, errors, the ports that
//! infrastructure implements, and the default account service.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::AccountService;
