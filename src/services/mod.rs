// Service exports
pub mod auth;
pub mod postgres;

pub use auth::{hash_password, verify_password, AuthError, Claims, TokenService};
pub use postgres::{create_default_preferences, PostgresClient, PostgresError};
