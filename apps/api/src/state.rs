//! Application state shared with request handlers.
//!
//! Domain routers carry their own service state; this struct only holds
//! what the app-level endpoints (readiness) and shutdown need.

use sea_orm::DatabaseConnection;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
}
