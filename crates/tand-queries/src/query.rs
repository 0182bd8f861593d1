//! List queries.
//!
//! [`ListQuery`] aggregates the filters, OR-group, and order spec for one
//! repository call, with a fluent construction API.

use crate::columns::ColumnRef;
use crate::filters::{Condition, Filter, FilterSet, FilterValue, OrGroup};
use crate::sorts::{OrderSpec, SortDirection};

/// The filter intent for one entity query.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<C: ColumnRef> {
    filters: FilterSet<C>,
    or_group: OrGroup<C>,
    order: Option<OrderSpec<C>>,
}

impl<C: ColumnRef> Default for ListQuery<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ColumnRef> ListQuery<C> {
    pub fn new() -> Self {
        Self {
            filters: FilterSet::new(),
            or_group: OrGroup::new(),
            order: None,
        }
    }

    /// Add a raw filter condition.
    pub fn filter(mut self, column: C, condition: Condition) -> Self {
        self.filters.add(Filter::new(column, condition));
        self
    }

    /// Filter by equality.
    pub fn equals(self, column: C, value: impl Into<FilterValue>) -> Self {
        self.filter(column, Condition::equals(value))
    }

    /// Filter by a LIKE pattern, passed through verbatim.
    pub fn like(self, column: C, pattern: impl Into<String>) -> Self {
        self.filter(column, Condition::like(pattern))
    }

    /// Filter by text appearing anywhere in the column.
    pub fn contains(self, column: C, text: &str) -> Self {
        self.filter(column, Condition::contains(text))
    }

    /// Filter by membership.
    pub fn one_of<I, V>(self, column: C, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        self.filter(column, Condition::one_of(values))
    }

    /// Filter by an inclusive range.
    pub fn between(
        self,
        column: C,
        lower: impl Into<FilterValue>,
        upper: impl Into<FilterValue>,
    ) -> Self {
        self.filter(column, Condition::between(lower, upper))
    }

    /// Attach the OR-group. A query carries at most one; the last call wins.
    pub fn any_of(mut self, group: OrGroup<C>) -> Self {
        self.or_group = group;
        self
    }

    /// Order the results. A query carries at most one order spec.
    pub fn order_by(mut self, column: C, direction: SortDirection) -> Self {
        self.order = Some(OrderSpec::new(column, direction));
        self
    }

    pub fn order_by_asc(self, column: C) -> Self {
        self.order_by(column, SortDirection::Asc)
    }

    pub fn order_by_desc(self, column: C) -> Self {
        self.order_by(column, SortDirection::Desc)
    }

    pub fn filters(&self) -> &FilterSet<C> {
        &self.filters
    }

    pub fn or_group(&self) -> &OrGroup<C> {
        &self.or_group
    }

    pub fn order(&self) -> Option<&OrderSpec<C>> {
        self.order.as_ref()
    }

    /// True when the query adds nothing to the base statement.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.or_group.is_empty() && self.order.is_none()
    }

    /// Total number of `?` placeholders the query will contribute.
    pub fn placeholder_count(&self) -> usize {
        self.filters.placeholder_count() + self.or_group.placeholder_count()
    }
}
