//! Repository plumbing.
//!
//! Driver errors pass through unmodified; this layer never retries or
//! translates them.

use async_trait::async_trait;
use tand_queries::{ColumnRef, ListQuery};

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// A read-only repository serving one entity query.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Columns callers may filter and order by.
    type Column: ColumnRef + Send + Sync;

    /// Row type produced by the query.
    type Row: Send;

    /// Run the entity query with the given filters.
    async fn list(&self, query: &ListQuery<Self::Column>) -> RepositoryResult<Vec<Self::Row>>;
}
