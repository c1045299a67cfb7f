pub mod data;
pub mod models;

pub use data::user::UserData;
pub use models::user::{NewUser, User};
