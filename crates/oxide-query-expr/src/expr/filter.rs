//! Filter groups combining conditions with AND or OR.

use std::fmt;

use super::condition::ConditionExpression;
use crate::error::Result;

/// Logical operator joining the conditions of one filter group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalOperator {
    /// All conditions must hold.
    #[default]
    And,
    /// Any condition may hold.
    Or,
}

impl LogicalOperator {
    /// Returns the SQL keyword for the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// An ordered group of conditions joined by one logical operator.
///
/// Groups nest through [`ConditionExpression::nested`]. The operator is
/// fixed at construction; conditions can only be appended.
///
/// # Example
///
/// ```rust
/// use oxide_query_expr::{ConditionExpression, FilterExpression, LogicalOperator};
///
/// let mut kind = FilterExpression::new(LogicalOperator::Or);
/// kind.add_condition(ConditionExpression::eq("Type", "Customer"));
/// kind.add_condition(ConditionExpression::eq("Type", "Vendor"));
///
/// let filter = FilterExpression::and()
///     .with(ConditionExpression::eq("Status", "Active"))
///     .with(kind);
///
/// assert_eq!(
///     filter.render("a1").unwrap(),
///     "(a1.Status = 'Active' AND (a1.Type = 'Customer' OR a1.Type = 'Vendor'))"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterExpression {
    logical_operator: LogicalOperator,
    conditions: Vec<ConditionExpression>,
}

impl FilterExpression {
    /// Creates an empty filter with the given operator.
    #[must_use]
    pub const fn new(logical_operator: LogicalOperator) -> Self {
        Self {
            logical_operator,
            conditions: Vec::new(),
        }
    }

    /// Creates an empty AND filter.
    #[must_use]
    pub const fn and() -> Self {
        Self::new(LogicalOperator::And)
    }

    /// Creates an empty OR filter.
    #[must_use]
    pub const fn or() -> Self {
        Self::new(LogicalOperator::Or)
    }

    /// Appends a condition.
    pub fn add_condition(&mut self, condition: impl Into<ConditionExpression>) {
        self.conditions.push(condition.into());
    }

    /// Appends a condition, builder style.
    #[must_use]
    pub fn with(mut self, condition: impl Into<ConditionExpression>) -> Self {
        self.add_condition(condition);
        self
    }

    /// Returns the logical operator.
    #[must_use]
    pub const fn logical_operator(&self) -> LogicalOperator {
        self.logical_operator
    }

    /// Returns the conditions in insertion order.
    #[must_use]
    pub fn conditions(&self) -> &[ConditionExpression] {
        &self.conditions
    }

    /// Returns `true` if the filter has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Renders the filter against `alias` as `(c1 OP c2 OP ...)`.
    ///
    /// An empty filter renders as the empty string. Conditions that render
    /// to nothing (nested empty filters) are left out, so no dangling
    /// operator is produced.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by a condition.
    pub fn render(&self, alias: &str) -> Result<String> {
        let mut parts = Vec::with_capacity(self.conditions.len());
        for condition in &self.conditions {
            let part = condition.render(alias)?;
            if !part.is_empty() {
                parts.push(part);
            }
        }

        if parts.is_empty() {
            return Ok(String::new());
        }

        let separator = format!(" {} ", self.logical_operator);
        Ok(format!("({})", parts.join(&separator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_and() {
        assert_eq!(FilterExpression::default().logical_operator(), LogicalOperator::And);
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(FilterExpression::and().render("a1").unwrap(), "");
    }

    #[test]
    fn test_single_condition_keeps_parentheses() {
        let filter = FilterExpression::and().with(ConditionExpression::eq("Status", "Active"));
        assert_eq!(filter.render("a1").unwrap(), "(a1.Status = 'Active')");
    }

    #[test]
    fn test_or_group() {
        let filter = FilterExpression::or()
            .with(ConditionExpression::eq("Role", "admin"))
            .with(ConditionExpression::eq("Role", "moderator"));
        assert_eq!(
            filter.render("u").unwrap(),
            "(u.Role = 'admin' OR u.Role = 'moderator')"
        );
    }

    #[test]
    fn test_deep_nesting() {
        let inner = FilterExpression::and()
            .with(ConditionExpression::gt("Age", 18))
            .with(ConditionExpression::eq("Verified", true));
        let middle = FilterExpression::or()
            .with(ConditionExpression::eq("Role", "admin"))
            .with(inner);
        let outer = FilterExpression::and()
            .with(ConditionExpression::eq("Active", true))
            .with(middle);
        assert_eq!(
            outer.render("u").unwrap(),
            "(u.Active = 1 AND (u.Role = 'admin' OR (u.Age > 18 AND u.Verified = 1)))"
        );
    }

    #[test]
    fn test_empty_nested_group_is_dropped() {
        let filter = FilterExpression::and()
            .with(ConditionExpression::eq("Status", "Active"))
            .with(FilterExpression::or());
        assert_eq!(filter.render("a1").unwrap(), "(a1.Status = 'Active')");

        let only_empty = FilterExpression::and().with(FilterExpression::or());
        assert!(!only_empty.is_empty());
        assert_eq!(only_empty.render("a1").unwrap(), "");
    }
}
