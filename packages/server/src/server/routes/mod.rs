// HTTP routes
pub mod auth;
pub mod donations;
pub mod health;

pub use auth::*;
pub use donations::*;
pub use health::*;
