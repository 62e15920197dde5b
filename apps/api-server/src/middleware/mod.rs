//! Middleware modules.

pub mod access_token;
pub mod error;
