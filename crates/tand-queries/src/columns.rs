//! Column references.
//!
//! Each entity query defines a closed enum of the columns callers may filter
//! or order by. Only enum variants ever reach the SQL text, so arbitrary
//! caller strings cannot be interpolated into a query.

use std::fmt::Debug;

/// A column usable in filters and order specs.
pub trait ColumnRef: Copy + Clone + Debug {
    /// The qualified column text for the owning query's FROM and JOIN
    /// aliases, e.g. `"p.cpr"`.
    fn as_sql(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum SampleColumn {
        Cpr,
        Name,
    }

    impl ColumnRef for SampleColumn {
        fn as_sql(&self) -> &'static str {
            match self {
                SampleColumn::Cpr => "p.cpr",
                SampleColumn::Name => "p.name",
            }
        }
    }

    #[test]
    fn test_column_ref_maps_to_qualified_sql() {
        assert_eq!(SampleColumn::Cpr.as_sql(), "p.cpr");
        assert_eq!(SampleColumn::Name.as_sql(), "p.name");
    }
}
