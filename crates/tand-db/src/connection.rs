//! Database connection handling.
//!
//! One connection is opened per repository call and released when the call
//! completes. The layer serves short read-only reporting queries, so there is
//! no pool to manage.

use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use tand_core::DatabaseConfig;

/// Handle to the Solteq Tand database.
///
/// Holds only the connection string; cheap to clone and share between
/// repositories.
#[derive(Debug, Clone)]
pub struct Database {
    url: String,
}

impl Database {
    /// Create a handle from a connection string.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Create a handle from configuration.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.url.clone())
    }

    /// Create a handle from the `DATABASE_URL` environment variable.
    pub fn from_env() -> Self {
        Self::from_config(&DatabaseConfig::from_env())
    }

    /// The connection string this handle was built with.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open the connection for one call.
    pub(crate) async fn connect(&self) -> Result<MySqlConnection, sqlx::Error> {
        tracing::debug!("opening database connection");
        MySqlConnection::connect(&self.url).await
    }

    /// Check that the database is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query("SELECT 1").execute(&mut conn).await?;
        conn.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_url() {
        let db = Database::new("mysql://tand@localhost/tmtdata");
        assert_eq!(db.url(), "mysql://tand@localhost/tmtdata");
    }

    #[test]
    fn test_from_config() {
        let config = DatabaseConfig::with_url("mysql://db/tand");
        let db = Database::from_config(&config);
        assert_eq!(db.url(), "mysql://db/tand");
    }

    #[tokio::test]
    async fn test_ping_surfaces_connection_failure() {
        let db = Database::new("mysql://127.0.0.1:1/tmtdata");
        assert!(db.ping().await.is_err());
    }
}
