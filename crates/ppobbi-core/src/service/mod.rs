//! Default implementations of the service ports.

mod account;

pub use account::AccountService;
