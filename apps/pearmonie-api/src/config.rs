use core_config::{FromEnv, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    /// `None` when `DATABASE_URL` is unset: storage stays in memory.
    pub database: Option<PostgresConfig>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let database = PostgresConfig::optional_from_env()?;

        Ok(Self {
            environment,
            server,
            database,
        })
    }

    /// In-memory development configuration.
    pub fn in_memory() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: None,
        }
    }
}
