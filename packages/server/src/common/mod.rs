// Common types and utilities shared across the application

pub mod auth;
pub mod types;

pub use auth::{AuthError, AuthUser};
pub use types::*;
