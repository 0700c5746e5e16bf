//! Single predicates and wrapped nested filters.

use std::fmt;
use std::str::FromStr;

use super::filter::FilterExpression;
use super::value::{render_in_list, SqlValue, ToSqlValue};
use crate::error::{QueryError, Result};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionOperator {
    /// Equal (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessOrEqual,
    /// Pattern match (LIKE)
    Like,
    /// Membership (IN)
    In,
}

impl ConditionOperator {
    /// Returns the SQL token for the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::Like => "LIKE",
            Self::In => "IN",
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ConditionOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let op = match s.trim().to_ascii_uppercase().as_str() {
            "=" => Self::Equal,
            "!=" | "<>" => Self::NotEqual,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterOrEqual,
            "<" => Self::LessThan,
            "<=" => Self::LessOrEqual,
            "LIKE" => Self::Like,
            "IN" => Self::In,
            _ => {
                return Err(QueryError::NotSupported(format!(
                    "unknown condition operator '{s}'"
                )))
            }
        };
        Ok(op)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Condition {
    Predicate {
        column: String,
        operator: ConditionOperator,
        value: SqlValue,
    },
    Nested(FilterExpression),
}

/// A single predicate, or a nested filter wrapped as a condition.
///
/// Conditions are immutable once built.
///
/// # Example
///
/// ```rust
/// use oxide_query_expr::ConditionExpression;
///
/// let status = ConditionExpression::eq("Status", "Active");
/// assert_eq!(status.render("a1").unwrap(), "a1.Status = 'Active'");
///
/// let ids = ConditionExpression::in_list("ContactId", vec![1, 5, 8]);
/// assert_eq!(ids.render("a1").unwrap(), "a1.ContactId IN (1,5,8)");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionExpression {
    condition: Condition,
}

impl ConditionExpression {
    /// Creates a predicate `column <operator> value`.
    pub fn new<V: ToSqlValue>(column: &str, operator: ConditionOperator, value: V) -> Self {
        Self {
            condition: Condition::Predicate {
                column: String::from(column),
                operator,
                value: value.to_sql_value(),
            },
        }
    }

    /// Creates a predicate from an operator token such as `">="` or `"LIKE"`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotSupported`] if the token is not a known operator.
    pub fn parse<V: ToSqlValue>(column: &str, operator: &str, value: V) -> Result<Self> {
        Ok(Self::new(column, operator.parse()?, value))
    }

    /// Wraps a filter so it can be nested inside another filter.
    #[must_use]
    pub const fn nested(filter: FilterExpression) -> Self {
        Self {
            condition: Condition::Nested(filter),
        }
    }

    /// Creates an equality predicate (column = value).
    pub fn eq<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::new(column, ConditionOperator::Equal, value)
    }

    /// Creates an inequality predicate (column != value).
    pub fn not_eq<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::new(column, ConditionOperator::NotEqual, value)
    }

    /// Creates a greater-than predicate (column > value).
    pub fn gt<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::new(column, ConditionOperator::GreaterThan, value)
    }

    /// Creates a greater-than-or-equal predicate (column >= value).
    pub fn gt_eq<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::new(column, ConditionOperator::GreaterOrEqual, value)
    }

    /// Creates a less-than predicate (column < value).
    pub fn lt<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::new(column, ConditionOperator::LessThan, value)
    }

    /// Creates a less-than-or-equal predicate (column <= value).
    pub fn lt_eq<V: ToSqlValue>(column: &str, value: V) -> Self {
        Self::new(column, ConditionOperator::LessOrEqual, value)
    }

    /// Creates a LIKE predicate. Use `%` for wildcard matching.
    #[must_use]
    pub fn like(column: &str, pattern: &str) -> Self {
        Self::new(column, ConditionOperator::Like, pattern)
    }

    /// Creates an IN predicate over a list of values.
    pub fn in_list<V: ToSqlValue>(column: &str, values: Vec<V>) -> Self {
        Self::new(column, ConditionOperator::In, values)
    }

    /// Returns the column name, or `None` for a nested filter.
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        match &self.condition {
            Condition::Predicate { column, .. } => Some(column),
            Condition::Nested(_) => None,
        }
    }

    /// Returns the operator, or `None` for a nested filter.
    #[must_use]
    pub const fn operator(&self) -> Option<ConditionOperator> {
        match &self.condition {
            Condition::Predicate { operator, .. } => Some(*operator),
            Condition::Nested(_) => None,
        }
    }

    /// Returns the value, or `None` for a nested filter.
    #[must_use]
    pub const fn value(&self) -> Option<&SqlValue> {
        match &self.condition {
            Condition::Predicate { value, .. } => Some(value),
            Condition::Nested(_) => None,
        }
    }

    /// Returns the wrapped filter, if this is a nested condition.
    #[must_use]
    pub const fn nested_filter(&self) -> Option<&FilterExpression> {
        match &self.condition {
            Condition::Predicate { .. } => None,
            Condition::Nested(filter) => Some(filter),
        }
    }

    /// Renders the condition against `alias`.
    ///
    /// A nested filter renders as the filter itself; it brings its own
    /// parentheses.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidArgument`] when `IN` is given a scalar,
    /// or when any other operator is given a list.
    pub fn render(&self, alias: &str) -> Result<String> {
        let (column, operator, value) = match &self.condition {
            Condition::Nested(filter) => return filter.render(alias),
            Condition::Predicate {
                column,
                operator,
                value,
            } => (column, *operator, value),
        };

        let qualified = format!("{alias}.{column}");

        if operator == ConditionOperator::In {
            return match value {
                SqlValue::List(values) => Ok(format!("{qualified} IN ({})", render_in_list(values))),
                other => Err(QueryError::InvalidArgument(format!(
                    "IN operator on {qualified} must be supplied with a list of values, got {}",
                    other.kind()
                ))),
            };
        }

        let literal = value.to_sql_literal().ok_or_else(|| {
            QueryError::InvalidArgument(format!(
                "operator {operator} on {qualified} cannot take a list of values"
            ))
        })?;
        Ok(format!("{qualified} {operator} {literal}"))
    }
}

impl From<FilterExpression> for ConditionExpression {
    fn from(filter: FilterExpression) -> Self {
        Self::nested(filter)
    }
}
