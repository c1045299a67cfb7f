// Domain modules

pub mod auth;
pub mod donations;
pub mod users;
