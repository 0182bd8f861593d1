//! Query filters.
//!
//! Filters are the building blocks of list queries. Each one pairs a column
//! from a closed per-query enum with an explicit [`Condition`]; the condition
//! carries its operator, so nothing is inferred from value shape at runtime.

use chrono::{NaiveDate, NaiveDateTime};
use tand_core::Cpr;

use crate::columns::ColumnRef;

/// A scalar value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for FilterValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<&Cpr> for FilterValue {
    fn from(v: &Cpr) -> Self {
        Self::Text(v.as_str().to_string())
    }
}

impl From<Cpr> for FilterValue {
    fn from(v: Cpr) -> Self {
        Self::from(&v)
    }
}

/// A condition on a single column. Each variant maps to one SQL operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = ?`
    Equals(FilterValue),
    /// `column LIKE ?`. The pattern is passed through verbatim.
    Like(String),
    /// `column IN (?, ...)`. An empty list compiles to `IN ()`, which the
    /// database rejects at execution time.
    In(Vec<FilterValue>),
    /// `column BETWEEN ? AND ?`, inclusive. Bounds are used in the order
    /// given; nothing checks that the lower bound is the smaller one.
    Between(FilterValue, FilterValue),
}

impl Condition {
    /// Create an equality condition.
    pub fn equals(value: impl Into<FilterValue>) -> Self {
        Self::Equals(value.into())
    }

    /// Create a LIKE condition with a caller-supplied pattern.
    pub fn like(pattern: impl Into<String>) -> Self {
        Self::Like(pattern.into())
    }

    /// Create a LIKE condition matching `text` anywhere, with LIKE
    /// metacharacters in `text` escaped.
    pub fn contains(text: &str) -> Self {
        Self::Like(format!("%{}%", escape_like(text)))
    }

    /// Create a membership condition.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Self::In(values.into_iter().map(Into::into).collect())
    }

    /// Create an inclusive range condition.
    pub fn between(lower: impl Into<FilterValue>, upper: impl Into<FilterValue>) -> Self {
        Self::Between(lower.into(), upper.into())
    }

    /// Number of `?` placeholders this condition produces.
    pub fn placeholder_count(&self) -> usize {
        match self {
            Self::Equals(_) | Self::Like(_) => 1,
            Self::In(values) => values.len(),
            Self::Between(_, _) => 2,
        }
    }
}

/// Condition subset allowed inside an [`OrGroup`]. BETWEEN is not available
/// in OR context.
#[derive(Debug, Clone, PartialEq)]
pub enum OrCondition {
    Equals(FilterValue),
    Like(String),
    In(Vec<FilterValue>),
}

impl OrCondition {
    pub fn equals(value: impl Into<FilterValue>) -> Self {
        Self::Equals(value.into())
    }

    pub fn like(pattern: impl Into<String>) -> Self {
        Self::Like(pattern.into())
    }

    pub fn contains(text: &str) -> Self {
        Self::Like(format!("%{}%", escape_like(text)))
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Self::In(values.into_iter().map(Into::into).collect())
    }

    /// Number of `?` placeholders this condition produces.
    pub fn placeholder_count(&self) -> usize {
        match self {
            Self::Equals(_) | Self::Like(_) => 1,
            Self::In(values) => values.len(),
        }
    }
}

impl From<OrCondition> for Condition {
    fn from(condition: OrCondition) -> Self {
        match condition {
            OrCondition::Equals(value) => Self::Equals(value),
            OrCondition::Like(pattern) => Self::Like(pattern),
            OrCondition::In(values) => Self::In(values),
        }
    }
}

/// Escape LIKE metacharacters so caller text matches literally.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// A single column/condition pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<C: ColumnRef> {
    pub column: C,
    pub condition: Condition,
}

impl<C: ColumnRef> Filter<C> {
    pub fn new(column: C, condition: Condition) -> Self {
        Self { column, condition }
    }
}

/// Ordered conjunction of filters.
///
/// Insertion order is preserved; compiled parameters come out in the same
/// order, which matters because they are bound positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet<C: ColumnRef> {
    filters: Vec<Filter<C>>,
}

impl<C: ColumnRef> Default for FilterSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ColumnRef> FilterSet<C> {
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Add a filter to the set.
    pub fn add(&mut self, filter: Filter<C>) -> &mut Self {
        self.filters.push(filter);
        self
    }

    /// Add a filter and return self (builder pattern).
    pub fn with(mut self, filter: Filter<C>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter<C>> {
        self.filters.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Total number of `?` placeholders the set produces.
    pub fn placeholder_count(&self) -> usize {
        self.filters
            .iter()
            .map(|f| f.condition.placeholder_count())
            .sum()
    }
}

/// One alternative inside an [`OrGroup`].
///
/// A branch's conditions are joined with OR and wrapped in parentheses when
/// compiled. A branch with no conditions is skipped entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct OrBranch<C: ColumnRef> {
    conditions: Vec<(C, OrCondition)>,
}

impl<C: ColumnRef> Default for OrBranch<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ColumnRef> OrBranch<C> {
    pub fn new() -> Self {
        Self { conditions: Vec::new() }
    }

    /// Add a condition and return self (builder pattern).
    pub fn with(mut self, column: C, condition: OrCondition) -> Self {
        self.conditions.push((column, condition));
        self
    }

    pub fn equals(self, column: C, value: impl Into<FilterValue>) -> Self {
        self.with(column, OrCondition::equals(value))
    }

    pub fn like(self, column: C, pattern: impl Into<String>) -> Self {
        self.with(column, OrCondition::like(pattern))
    }

    pub fn one_of<I, V>(self, column: C, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        self.with(column, OrCondition::one_of(values))
    }

    pub fn conditions(&self) -> &[(C, OrCondition)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn placeholder_count(&self) -> usize {
        self.conditions
            .iter()
            .map(|(_, c)| c.placeholder_count())
            .sum()
    }
}

/// Alternative condition branches.
///
/// Branches are OR-ed together and the whole group is AND-ed against the rest
/// of the query, wrapped in one extra parenthesis layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OrGroup<C: ColumnRef> {
    branches: Vec<OrBranch<C>>,
}

impl<C: ColumnRef> Default for OrGroup<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ColumnRef> OrGroup<C> {
    pub fn new() -> Self {
        Self { branches: Vec::new() }
    }

    /// Add a branch and return self (builder pattern).
    pub fn branch(mut self, branch: OrBranch<C>) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn add(&mut self, branch: OrBranch<C>) -> &mut Self {
        self.branches.push(branch);
        self
    }

    pub fn branches(&self) -> &[OrBranch<C>] {
        &self.branches
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn placeholder_count(&self) -> usize {
        self.branches.iter().map(OrBranch::placeholder_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Col {
        Cpr,
        Status,
    }

    impl ColumnRef for Col {
        fn as_sql(&self) -> &'static str {
            match self {
                Col::Cpr => "p.cpr",
                Col::Status => "p.status",
            }
        }
    }

    #[test]
    fn test_filter_value_conversions() {
        assert_eq!(FilterValue::from(42i64), FilterValue::Int(42));
        assert_eq!(FilterValue::from(7i32), FilterValue::Int(7));
        assert_eq!(FilterValue::from(true), FilterValue::Bool(true));
        assert_eq!(
            FilterValue::from("abc"),
            FilterValue::Text("abc".to_string())
        );
    }

    #[test]
    fn test_filter_value_from_cpr() {
        let cpr = Cpr::parse("010190-1234").unwrap();
        assert_eq!(
            FilterValue::from(&cpr),
            FilterValue::Text("0101901234".to_string())
        );
    }

    #[test]
    fn test_condition_placeholder_count() {
        assert_eq!(Condition::equals(1).placeholder_count(), 1);
        assert_eq!(Condition::like("%x%").placeholder_count(), 1);
        assert_eq!(Condition::one_of(["A", "B", "C"]).placeholder_count(), 3);
        assert_eq!(Condition::one_of(Vec::<i64>::new()).placeholder_count(), 0);
        assert_eq!(Condition::between(18, 65).placeholder_count(), 2);
    }

    #[test]
    fn test_contains_escapes_like_metacharacters() {
        assert_eq!(
            Condition::contains("100%_done"),
            Condition::Like("%100\\%\\_done%".to_string())
        );
    }

    #[test]
    fn test_or_condition_converts_to_condition() {
        let converted = Condition::from(OrCondition::one_of(["Y", "Z"]));
        assert_eq!(converted, Condition::one_of(["Y", "Z"]));
    }

    #[test]
    fn test_filter_set_preserves_insertion_order() {
        let set = FilterSet::new()
            .with(Filter::new(Col::Cpr, Condition::equals("0101901234")))
            .with(Filter::new(Col::Status, Condition::one_of([1, 2])));

        assert_eq!(set.len(), 2);
        assert_eq!(set.placeholder_count(), 3);
        let columns: Vec<Col> = set.iter().map(|f| f.column).collect();
        assert_eq!(columns, vec![Col::Cpr, Col::Status]);
    }

    #[test]
    fn test_or_branch_builder() {
        let branch = OrBranch::new()
            .equals(Col::Status, "X")
            .one_of(Col::Status, ["Y", "Z"]);

        assert_eq!(branch.len(), 2);
        assert_eq!(branch.placeholder_count(), 3);
    }

    #[test]
    fn test_or_group_collects_branches() {
        let group = OrGroup::new()
            .branch(OrBranch::new().equals(Col::Status, "X"))
            .branch(OrBranch::new().like(Col::Cpr, "0101%"));

        assert_eq!(group.len(), 2);
        assert_eq!(group.placeholder_count(), 2);
        assert!(!group.is_empty());
    }
}
