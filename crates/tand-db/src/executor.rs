//! Query execution.
//!
//! Binds compiled parameters positionally and fetches typed rows over a
//! connection scoped to the call.

use sqlx::mysql::{MySql, MySqlArguments, MySqlRow};
use sqlx::query::QueryAs;
use sqlx::{Connection, FromRow};
use tand_queries::FilterValue;

use crate::connection::Database;
use crate::repository::RepositoryResult;
use crate::sql::CompiledQuery;

/// Execute a compiled query and collect every row.
///
/// The connection is opened for this call and closed before returning; it
/// never outlives the call.
pub async fn fetch_all<T>(db: &Database, compiled: &CompiledQuery) -> RepositoryResult<Vec<T>>
where
    T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
{
    tracing::debug!(
        sql = %compiled.sql,
        params = compiled.params.len(),
        "executing query"
    );

    let mut conn = db.connect().await?;
    let mut query = sqlx::query_as::<MySql, T>(&compiled.sql);
    for value in &compiled.params {
        query = bind_value(query, value);
    }
    let rows = query.fetch_all(&mut conn).await?;
    conn.close().await?;

    Ok(rows)
}

fn bind_value<'q, T>(
    query: QueryAs<'q, MySql, T, MySqlArguments>,
    value: &FilterValue,
) -> QueryAs<'q, MySql, T, MySqlArguments> {
    match value {
        FilterValue::Int(v) => query.bind(*v),
        FilterValue::Float(v) => query.bind(*v),
        FilterValue::Text(v) => query.bind(v.clone()),
        FilterValue::Bool(v) => query.bind(*v),
        FilterValue::Date(v) => query.bind(*v),
        FilterValue::DateTime(v) => query.bind(*v),
        FilterValue::Null => query.bind(None::<String>),
    }
}
