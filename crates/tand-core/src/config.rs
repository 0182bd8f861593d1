//! Configuration types and loading.
//!
//! The layer's only configuration surface is the database connection string.

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,
}

impl AppConfig {
    /// Load configuration from an optional `tand` file and `TAND__`-prefixed
    /// environment variables (e.g. `TAND__DATABASE__URL`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        config::Config::builder()
            .add_source(config::File::with_name("tand").required(false))
            .add_source(config::Environment::with_prefix("TAND").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl DatabaseConfig {
    /// Create config from the `DATABASE_URL` environment variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "mysql://localhost/tmtdata".to_string()),
        }
    }

    /// Create config with a specific URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
