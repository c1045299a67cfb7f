// Credential handling: JWT issue/verify, password hashing, admin allow-list

pub mod admin;
pub mod jwt;
pub mod password;

pub use admin::is_admin_email;
pub use jwt::{Claims, JwtService};
pub use password::{hash_password, verify_password};
