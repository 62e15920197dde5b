//! # Ppobbi Shared
//!
//! Wire types shared by the API server and its clients: request/response
//! DTOs, the response envelope and RFC 7807 error bodies.

pub mod dto;
pub mod message;
pub mod response;

pub use message::UserResponseMessage;
pub use response::{ApiResponse, ErrorResponse};
