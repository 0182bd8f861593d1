//! SQL statement construction.
//!
//! Translates a [`ListQuery`] plus an entity base query into the final SQL
//! text and its positional parameter list. Base queries end in `WHERE 1=1` so
//! every generated predicate can be appended with `AND` unconditionally.

use tand_queries::{ColumnRef, Condition, FilterValue, ListQuery};

/// A statement ready for execution: SQL text plus parameters in placeholder
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<FilterValue>,
}

impl CompiledQuery {
    /// Number of `?` placeholders in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// Build the final statement for `base_query` with the query's filters,
/// OR-group, and order applied.
///
/// Parameters are collected in the order their placeholders appear: AND
/// filters in insertion order first, then OR branches in sequence order.
/// Nothing is validated against the schema; an empty `IN` list compiles to
/// `IN ()` and fails at execution time.
pub fn build_statement<C: ColumnRef>(base_query: &str, query: &ListQuery<C>) -> CompiledQuery {
    let mut sql = base_query.to_string();
    let mut params = Vec::with_capacity(query.placeholder_count());

    let predicates: Vec<String> = query
        .filters()
        .iter()
        .map(|filter| predicate_sql(filter.column, &filter.condition, &mut params))
        .collect();
    if !predicates.is_empty() {
        sql.push_str(" AND ");
        sql.push_str(&predicates.join(" AND "));
    }

    let branches: Vec<String> = query
        .or_group()
        .branches()
        .iter()
        .filter(|branch| !branch.is_empty())
        .map(|branch| {
            let alternatives: Vec<String> = branch
                .conditions()
                .iter()
                .map(|(column, condition)| {
                    predicate_sql(*column, &Condition::from(condition.clone()), &mut params)
                })
                .collect();
            format!("({})", alternatives.join(" OR "))
        })
        .collect();
    if !branches.is_empty() {
        sql.push_str(" AND (");
        sql.push_str(&branches.join(" OR "));
        sql.push(')');
    }

    if let Some(order) = query.order() {
        sql.push_str(" ORDER BY ");
        sql.push_str(order.column.as_sql());
        sql.push(' ');
        sql.push_str(order.direction.as_sql());
    }

    CompiledQuery { sql, params }
}

/// Render one predicate, pushing its parameters in placeholder order.
fn predicate_sql<C: ColumnRef>(
    column: C,
    condition: &Condition,
    params: &mut Vec<FilterValue>,
) -> String {
    match condition {
        Condition::Equals(value) => {
            params.push(value.clone());
            format!("{} = ?", column.as_sql())
        }
        Condition::Like(pattern) => {
            params.push(FilterValue::Text(pattern.clone()));
            format!("{} LIKE ?", column.as_sql())
        }
        Condition::In(values) => {
            let placeholders = vec!["?"; values.len()].join(", ");
            params.extend(values.iter().cloned());
            format!("{} IN ({})", column.as_sql(), placeholders)
        }
        Condition::Between(lower, upper) => {
            params.push(lower.clone());
            params.push(upper.clone());
            format!("{} BETWEEN ? AND ?", column.as_sql())
        }
    }
}
