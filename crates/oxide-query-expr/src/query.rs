//! The root query expression and SELECT statement assembly.

use tracing::{debug, trace};

use crate::error::Result;
use crate::expr::{
    Clauses, ColumnSet, ConditionExpression, FilterExpression, JoinNode, OrderExpression,
};

/// A SELECT statement as an expression tree.
///
/// The query owns its joins, filter and ordering outright; nothing in the
/// tree points back to it. Build the tree, then call [`render`] as often as
/// needed: rendering never mutates anything.
///
/// `render` borrows the tree immutably, so it cannot run while another
/// thread holds `&mut` to the same tree. Share a finished tree across
/// threads by reference or by cloning.
///
/// [`render`]: QueryExpression::render
///
/// # Example
///
/// ```rust
/// use oxide_query_expr::{ColumnSet, ConditionExpression, QueryExpression};
///
/// let query = QueryExpression::new("Accounts", ColumnSet::of(&["Name", "Email"]))
///     .with_alias("a1")
///     .where_clause(ConditionExpression::eq("Status", "Active"))
///     .with_paging(2, 10);
///
/// assert_eq!(
///     query.render().unwrap(),
///     "SELECT a1.Name, a1.Email FROM Accounts a1 WHERE (a1.Status = 'Active') \
///      OFFSET 10 ROWS FETCH NEXT 10 ROWS ONLY"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryExpression {
    /// Table selected from.
    pub table: String,
    /// Alias of the table. Defaults to the table name.
    pub alias: String,
    /// Columns of the root table.
    pub columns: ColumnSet,
    /// Root filter, emitted after every join's criteria.
    pub filter: FilterExpression,
    /// Sort keys, qualified by the root alias.
    pub order_by: Vec<OrderExpression>,
    /// Top-level joins.
    pub joins: Vec<JoinNode>,
    /// Row limit (`TOP n`).
    pub top: Option<u32>,
    /// One-based page number. Takes effect only together with `page_size`.
    pub page_number: Option<u32>,
    /// Rows per page. Takes effect only together with `page_number`.
    pub page_size: Option<u32>,
}

impl QueryExpression {
    /// Creates a query over `table`, aliased as the table name.
    #[must_use]
    pub fn new(table: &str, columns: ColumnSet) -> Self {
        Self {
            table: String::from(table),
            alias: String::from(table),
            columns,
            filter: FilterExpression::default(),
            order_by: Vec::new(),
            joins: Vec::new(),
            top: None,
            page_number: None,
            page_size: None,
        }
    }

    /// Sets the alias of the root table.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = String::from(alias);
        self
    }

    /// Sets the `TOP` row limit.
    #[must_use]
    pub const fn with_top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Sets page number and page size.
    #[must_use]
    pub const fn with_paging(mut self, page_number: u32, page_size: u32) -> Self {
        self.page_number = Some(page_number);
        self.page_size = Some(page_size);
        self
    }

    /// Replaces the root filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterExpression) -> Self {
        self.filter = filter;
        self
    }

    /// Appends a condition to the root filter.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<ConditionExpression>) -> Self {
        self.filter.add_condition(condition);
        self
    }

    /// Appends a sort key.
    #[must_use]
    pub fn order_by(mut self, order: OrderExpression) -> Self {
        self.order_by.push(order);
        self
    }

    /// Appends a top-level join.
    #[must_use]
    pub fn join(mut self, join: JoinNode) -> Self {
        self.joins.push(join);
        self
    }

    /// Row offset for the current page, if paging is fully configured.
    #[must_use]
    pub fn page_offset(&self) -> Option<u64> {
        match (self.page_number, self.page_size) {
            (Some(number), Some(size)) => {
                Some(u64::from(number.saturating_sub(1)) * u64::from(size))
            }
            _ => None,
        }
    }

    /// Renders the statement as T-SQL text.
    ///
    /// Sections are emitted in a fixed order: `SELECT [TOP n]`, the select
    /// list, `FROM` with every join, `WHERE` (join criteria in pre-order,
    /// then the root filter), `ORDER BY`, then `OFFSET ... FETCH NEXT`.
    ///
    /// Empty fragments never reach the output:
    /// - the select list is joined from non-empty fragments only, so a root
    ///   with no columns and one joined column gives `SELECT c1.FirstName`,
    ///   not `SELECT , c1.FirstName`;
    /// - empty filter groups are skipped, and `WHERE` is omitted when no
    ///   predicate text remains;
    /// - a joined table adds only its named columns, never `alias.*`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any condition in the tree; no
    /// partial text is produced.
    pub fn render(&self) -> Result<String> {
        debug!(
            table = %self.table,
            alias = %self.alias,
            joins = self.joins.len(),
            "rendering query expression"
        );

        let mut clauses = Clauses::new();
        clauses.push_select(self.columns.render(&self.alias));

        let mut join_sql = Vec::with_capacity(self.joins.len());
        for join in &self.joins {
            join_sql.push(join.render(&mut clauses)?);
        }

        let mut sql = String::from("SELECT ");

        if let Some(top) = self.top {
            sql.push_str(&format!("TOP {top} "));
        }

        if self.columns.include_all_columns {
            sql.push('*');
        } else {
            sql.push_str(&clauses.select_list());
        }

        sql.push_str(&format!(" FROM {} {}", self.table, self.alias));

        for join in &join_sql {
            sql.push(' ');
            sql.push_str(join);
        }

        clauses.push_predicate(self.filter.render(&self.alias)?);

        let where_clause = clauses.where_clause();
        if !where_clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause);
        }

        if !self.order_by.is_empty() {
            let orders: Vec<String> = self
                .order_by
                .iter()
                .map(|order| order.render(Some(&self.alias)))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        if let (Some(offset), Some(size)) = (self.page_offset(), self.page_size) {
            sql.push_str(&format!(" OFFSET {offset} ROWS FETCH NEXT {size} ROWS ONLY"));
        }

        trace!(sql = %sql, "rendered query expression");
        Ok(sql)
    }
}
