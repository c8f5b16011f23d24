// Route exports
pub mod dogs;
pub mod extract;
pub mod health;
pub mod users;

use actix_web::web;
use crate::core::Matcher;
use crate::services::{PostgresClient, TokenService};
use std::sync::Arc;

pub use extract::AuthUser;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub tokens: Arc<TokenService>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).service(
        web::scope("/api")
            .configure(users::configure)
            .configure(dogs::configure),
    );
}
