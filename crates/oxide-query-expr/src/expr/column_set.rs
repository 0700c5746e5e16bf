//! Column projections.

/// The columns a table contributes to the SELECT list.
///
/// A wildcard set and an empty explicit set are distinct states: the first
/// renders `*`, the second renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSet {
    /// Select every column (`*`) and ignore `columns`.
    pub include_all_columns: bool,
    /// Explicit columns, in SELECT-list order. Duplicates are kept.
    pub columns: Vec<String>,
}

impl ColumnSet {
    /// Creates an empty, non-wildcard column set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_all_columns: false,
            columns: Vec::new(),
        }
    }

    /// Creates a wildcard column set.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            include_all_columns: true,
            columns: Vec::new(),
        }
    }

    /// Creates a column set from explicit column names.
    #[must_use]
    pub fn of(columns: &[&str]) -> Self {
        Self {
            include_all_columns: false,
            columns: columns.iter().map(|c| String::from(*c)).collect(),
        }
    }

    /// Appends one column.
    #[must_use]
    pub fn add(mut self, column: &str) -> Self {
        self.columns.push(String::from(column));
        self
    }

    /// Appends several columns.
    #[must_use]
    pub fn add_range(mut self, columns: &[&str]) -> Self {
        self.extend(columns);
        self
    }

    /// Appends several columns in place.
    pub fn extend(&mut self, columns: &[&str]) {
        self.columns.extend(columns.iter().map(|c| String::from(*c)));
    }

    /// Returns `true` when rendering would produce no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.include_all_columns && self.columns.is_empty()
    }

    /// Renders the set qualified by `alias`.
    ///
    /// Returns `*` for a wildcard set, otherwise `alias.c1, alias.c2, ...`.
    #[must_use]
    pub fn render(&self, alias: &str) -> String {
        if self.include_all_columns {
            return String::from("*");
        }
        self.render_columns(alias)
    }

    /// Renders only the named columns qualified by `alias`, ignoring the
    /// wildcard flag.
    pub(crate) fn render_columns(&self, alias: &str) -> String {
        self.columns
            .iter()
            .map(|column| format!("{alias}.{column}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
