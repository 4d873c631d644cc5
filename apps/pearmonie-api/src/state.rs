//! Application state shared with the readiness check and shutdown cleanup.

use crate::config::Config;
use database::postgres::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// PostgreSQL pool; `None` when running on in-memory storage
    pub db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(config: Config, db: Option<DatabaseConnection>) -> Self {
        Self { config, db }
    }
}
