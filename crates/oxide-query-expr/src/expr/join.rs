//! Join nodes (link tables) and the join-tree walk.

use std::fmt;

use tracing::trace;

use super::column_set::ColumnSet;
use super::condition::ConditionExpression;
use super::filter::FilterExpression;
use crate::error::Result;

/// Kind of join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinKind {
    /// INNER JOIN
    Inner,
    /// LEFT JOIN
    #[default]
    Left,
}

impl JoinKind {
    /// Returns the SQL keyword pair for the join.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// SELECT-list and WHERE fragments collected while walking a join tree.
///
/// Both lists are flat and keep the order in which nodes were visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clauses {
    select: Vec<String>,
    predicates: Vec<String>,
}

impl Clauses {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            select: Vec::new(),
            predicates: Vec::new(),
        }
    }

    /// Appends a SELECT-list fragment. Empty fragments are ignored.
    pub fn push_select(&mut self, fragment: String) {
        if !fragment.is_empty() {
            self.select.push(fragment);
        }
    }

    /// Appends a WHERE predicate group. Empty fragments are ignored.
    pub fn push_predicate(&mut self, fragment: String) {
        if !fragment.is_empty() {
            self.predicates.push(fragment);
        }
    }

    /// SELECT-list fragments in visiting order.
    #[must_use]
    pub fn select(&self) -> &[String] {
        &self.select
    }

    /// WHERE predicate groups in visiting order.
    #[must_use]
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    /// The SELECT list: all fragments joined with `", "`.
    #[must_use]
    pub fn select_list(&self) -> String {
        self.select.join(", ")
    }

    /// The WHERE body: all predicate groups joined with `" AND "`.
    #[must_use]
    pub fn where_clause(&self) -> String {
        self.predicates.join(" AND ")
    }
}

/// One join clause together with the columns and criteria of the joined table.
///
/// Nodes form a tree through `children`; each node is owned by exactly one
/// parent (the query or another node).
///
/// # Example
///
/// ```rust
/// use oxide_query_expr::{Clauses, ColumnSet, ConditionExpression, JoinKind, JoinNode};
///
/// let contacts = JoinNode::new("a1", "AccountId", "Contacts", "AccountId")
///     .with_alias("c1")
///     .with_kind(JoinKind::Inner)
///     .select(ColumnSet::of(&["FirstName"]))
///     .where_clause(ConditionExpression::eq("Status", "Active"));
///
/// let mut clauses = Clauses::new();
/// let sql = contacts.render(&mut clauses).unwrap();
///
/// assert_eq!(sql, "INNER JOIN Contacts c1 ON a1.AccountId = c1.AccountId");
/// assert_eq!(clauses.select_list(), "c1.FirstName");
/// assert_eq!(clauses.where_clause(), "(c1.Status = 'Active')");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinNode {
    /// Alias of the table the join links from.
    pub from_alias: String,
    /// Column on the linking table.
    pub from_column: String,
    /// Joined table.
    pub to_table: String,
    /// Column on the joined table.
    pub to_column: String,
    /// Alias of the joined table. Defaults to `to_table`.
    pub alias: String,
    /// Join kind. Defaults to LEFT.
    pub kind: JoinKind,
    /// Columns the joined table adds to the SELECT list. Only named columns
    /// are added; the wildcard flag has no effect on a join.
    pub columns: ColumnSet,
    /// Predicates on the joined table, emitted in the WHERE clause.
    pub criteria: FilterExpression,
    /// Joins nested under this one.
    pub children: Vec<JoinNode>,
}

impl JoinNode {
    /// Creates a LEFT join from `from_alias.from_column` to
    /// `to_table.to_column`, aliased as the table name.
    #[must_use]
    pub fn new(from_alias: &str, from_column: &str, to_table: &str, to_column: &str) -> Self {
        Self {
            from_alias: String::from(from_alias),
            from_column: String::from(from_column),
            to_table: String::from(to_table),
            to_column: String::from(to_column),
            alias: String::from(to_table),
            kind: JoinKind::default(),
            columns: ColumnSet::new(),
            criteria: FilterExpression::default(),
            children: Vec::new(),
        }
    }

    /// Sets the alias of the joined table.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = String::from(alias);
        self
    }

    /// Sets the join kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: JoinKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the columns contributed by the joined table.
    #[must_use]
    pub fn select(mut self, columns: ColumnSet) -> Self {
        self.columns = columns;
        self
    }

    /// Replaces the join criteria.
    #[must_use]
    pub fn with_criteria(mut self, criteria: FilterExpression) -> Self {
        self.criteria = criteria;
        self
    }

    /// Appends a condition to the join criteria.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<ConditionExpression>) -> Self {
        self.criteria.add_condition(condition);
        self
    }

    /// Appends a nested join.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a nested join in place.
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Renders this node and its descendants, depth-first in pre-order.
    ///
    /// Returns the join text (this node's `JOIN ... ON ...` followed by each
    /// descendant's, space separated). The node's criteria and columns are
    /// pushed onto `clauses` before those of its children. A node with no
    /// named columns adds nothing to the SELECT list, even when its set is a
    /// wildcard.
    ///
    /// # Errors
    ///
    /// Propagates rendering errors from the criteria of any node in the subtree.
    pub fn render(&self, clauses: &mut Clauses) -> Result<String> {
        let mut sql = format!(
            "{} {} {} ON {}.{} = {}.{}",
            self.kind,
            self.to_table,
            self.alias,
            self.from_alias,
            self.from_column,
            self.alias,
            self.to_column
        );

        clauses.push_predicate(self.criteria.render(&self.alias)?);
        if !self.columns.columns.is_empty() {
            clauses.push_select(self.columns.render_columns(&self.alias));
        }

        for child in &self.children {
            sql.push(' ');
            sql.push_str(&child.render(clauses)?);
        }

        trace!(alias = %self.alias, children = self.children.len(), "rendered join node");
        Ok(sql)
    }
}
