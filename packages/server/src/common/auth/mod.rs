//! Authorization gate
//!
//! The JWT middleware resolves the bearer credential into an [`AuthUser`] and
//! stores it in request extensions. Handlers pass that (or its absence)
//! through [`require_auth`]/[`require_role`] before touching any record.

pub mod errors;
pub mod gate;

pub use errors::AuthError;
pub use gate::{require_auth, require_role, AuthUser};
