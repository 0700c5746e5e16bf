//! ORDER BY items.

use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    /// Ascending order (ASC)
    #[default]
    Asc,
    /// Descending order (DESC)
    Desc,
}

impl SortDirection {
    /// Returns the SQL keyword for the direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderExpression {
    column: String,
    direction: SortDirection,
}

impl OrderExpression {
    /// Creates a sort key.
    #[must_use]
    pub fn new(column: &str, direction: SortDirection) -> Self {
        Self {
            column: String::from(column),
            direction,
        }
    }

    /// Creates an ascending sort key.
    #[must_use]
    pub fn asc(column: &str) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    /// Creates a descending sort key.
    #[must_use]
    pub fn desc(column: &str) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    /// Returns the column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Renders `alias.column DIR`, or `column DIR` without an alias.
    #[must_use]
    pub fn render(&self, alias: Option<&str>) -> String {
        match alias {
            Some(alias) => format!("{alias}.{} {}", self.column, self.direction),
            None => format!("{} {}", self.column, self.direction),
        }
    }
}
