//! # tand-queries
//!
//! Query model for the Solteq Tand data-access layer.
//!
//! This crate is pure: it models filter intent and knows nothing about the
//! database. Conditions are an explicit tagged union (equality, LIKE, IN,
//! BETWEEN), columns come from closed per-query enums, and everything
//! preserves insertion order so parameters can be bound positionally.
//!
//! ## Structure
//!
//! - `filters` - condition union, filter sets, OR-groups
//! - `sorts` - sort direction and order spec
//! - `columns` - the `ColumnRef` trait implemented by per-query column enums
//! - `query` - `ListQuery`, the fluent aggregate handed to a repository
//!
//! ## Example
//!
//! ```
//! use tand_queries::{ColumnRef, ListQuery, OrBranch, OrGroup};
//!
//! #[derive(Debug, Clone, Copy)]
//! enum PatientColumn {
//!     Cpr,
//!     Status,
//! }
//!
//! impl ColumnRef for PatientColumn {
//!     fn as_sql(&self) -> &'static str {
//!         match self {
//!             PatientColumn::Cpr => "p.cpr",
//!             PatientColumn::Status => "p.status",
//!         }
//!     }
//! }
//!
//! let query = ListQuery::new()
//!     .equals(PatientColumn::Cpr, "0101901234")
//!     .any_of(OrGroup::new()
//!         .branch(OrBranch::new().one_of(PatientColumn::Status, ["A", "B"])))
//!     .order_by_asc(PatientColumn::Status);
//!
//! assert_eq!(query.placeholder_count(), 3);
//! ```

pub mod columns;
pub mod filters;
pub mod query;
pub mod sorts;

// Re-exports for convenience
pub use columns::ColumnRef;
pub use filters::{
    escape_like, Condition, Filter, FilterSet, FilterValue, OrBranch, OrCondition, OrGroup,
};
pub use query::ListQuery;
pub use sorts::{OrderSpec, SortDirection};
