//! Fluent, chainable construction of query expressions.
//!
//! The fluent API builds the same [`QueryExpression`] tree as the direct
//! constructors. Join contexts are typed by what opened them:
//! `FluentJoin<FluentQuery>` is a top-level join and
//! `FluentJoin<FluentJoin<..>>` a sub-join, so `close_sub_join` and
//! `close_join` are only callable where they make sense.
//!
//! # Where closed joins go
//!
//! With the default [`JoinAttachment::Root`], closing any join context,
//! sub-joins included, appends its node to the root query's top-level join
//! list. A chain written as
//! `join(..).sub_join(..).close_sub_join().close_join()` therefore yields
//! two sibling joins, the sub-join first because it was closed first:
//!
//! ```rust
//! use oxide_query_expr::{FluentQuery, JoinKind};
//!
//! let sql = FluentQuery::query_table_as("Accounts", "a1")
//!     .select(&["Name"])
//!     .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Left)
//!         .sub_join(JoinKind::Inner, "Orders", "ContactId", "ContactId", Some("o1"))
//!         .close_sub_join()
//!     .close_join()
//!     .build_sql()
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT a1.Name FROM Accounts a1 \
//!      INNER JOIN Orders o1 ON c1.ContactId = o1.ContactId \
//!      LEFT JOIN Contacts c1 ON a1.AccountId = c1.AccountId"
//! );
//! ```
//!
//! [`JoinAttachment::Parent`] instead attaches a closed sub-join to the
//! join that opened it, producing the same tree the direct API would.

use tracing::debug;

use crate::error::Result;
use crate::expr::{
    ColumnSet, ConditionExpression, FilterExpression, JoinKind, JoinNode, OrderExpression,
};
use crate::query::QueryExpression;

/// Where a closed sub-join is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum JoinAttachment {
    /// Every closed join goes to the root query's join list, in closing order.
    #[default]
    Root,
    /// A closed sub-join becomes a child of the join that opened it.
    Parent,
}

/// Something a join context can be opened from and closed back into.
pub trait JoinScope {
    /// The root builder.
    fn root(&mut self) -> &mut FluentQuery;

    /// Alias that joins opened from this scope link from.
    fn scope_alias(&self) -> &str;

    /// Attachment policy of the root builder.
    fn attachment(&self) -> JoinAttachment;

    /// Takes ownership of a join node closed inside this scope.
    fn adopt(&mut self, node: JoinNode);
}

/// Fluent builder wrapping a [`QueryExpression`] under construction.
///
/// # Example
///
/// ```rust
/// use oxide_query_expr::{ConditionExpression, FluentQuery};
///
/// let sql = FluentQuery::query_table("Accounts")
///     .select(&["Name", "Email"])
///     .where_clause(ConditionExpression::eq("Status", "Active"))
///     .with_page_number(2)
///     .with_page_size(10)
///     .with_alias("a1")
///     .build_sql()
///     .unwrap();
///
/// assert_eq!(
///     sql,
///     "SELECT a1.Name, a1.Email FROM Accounts a1 WHERE (a1.Status = 'Active') \
///      OFFSET 10 ROWS FETCH NEXT 10 ROWS ONLY"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FluentQuery {
    query: QueryExpression,
    attachment: JoinAttachment,
}

impl FluentQuery {
    /// Starts a query over `table` with no columns selected.
    #[must_use]
    pub fn query_table(table: &str) -> Self {
        Self {
            query: QueryExpression::new(table, ColumnSet::new()),
            attachment: JoinAttachment::default(),
        }
    }

    /// Starts a query over `table` aliased as `alias`.
    #[must_use]
    pub fn query_table_as(table: &str, alias: &str) -> Self {
        Self::query_table(table).with_alias(alias)
    }

    /// Sets where closed sub-joins are attached.
    #[must_use]
    pub const fn with_join_attachment(mut self, attachment: JoinAttachment) -> Self {
        self.attachment = attachment;
        self
    }

    /// Sets the root alias.
    ///
    /// Joins opened earlier keep the alias that was current when they were
    /// opened.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.query.alias = String::from(alias);
        self
    }

    /// Sets the `TOP` row limit.
    #[must_use]
    pub const fn with_top_count(mut self, top: u32) -> Self {
        self.query.top = Some(top);
        self
    }

    /// Sets the one-based page number.
    #[must_use]
    pub const fn with_page_number(mut self, page_number: u32) -> Self {
        self.query.page_number = Some(page_number);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.query.page_size = Some(page_size);
        self
    }

    /// Appends root columns.
    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.query.columns.extend(columns);
        self
    }

    /// Selects every column (`*`).
    #[must_use]
    pub const fn select_all(mut self) -> Self {
        self.query.columns.include_all_columns = true;
        self
    }

    /// Copies the wildcard flag of `columns` and appends its columns.
    #[must_use]
    pub fn select_columns(mut self, columns: ColumnSet) -> Self {
        self.query.columns.include_all_columns = columns.include_all_columns;
        self.query.columns.columns.extend(columns.columns);
        self
    }

    /// Appends a condition to the root filter.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<ConditionExpression>) -> Self {
        self.query.filter.add_condition(condition);
        self
    }

    /// Appends a nested filter group to the root filter.
    #[must_use]
    pub fn where_filter(mut self, filter: FilterExpression) -> Self {
        self.query.filter.add_condition(ConditionExpression::nested(filter));
        self
    }

    /// Appends an ascending sort key.
    #[must_use]
    pub fn order_by(mut self, column: &str) -> Self {
        self.query.order_by.push(OrderExpression::asc(column));
        self
    }

    /// Appends a descending sort key.
    #[must_use]
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.query.order_by.push(OrderExpression::desc(column));
        self
    }

    /// Opens a join from the root table to `table`.
    ///
    /// The join links `root_alias.from_column` to `alias.to_column`; the
    /// alias defaults to the table name.
    pub fn join(
        self,
        table: &str,
        from_column: &str,
        to_column: &str,
        alias: Option<&str>,
        kind: JoinKind,
    ) -> FluentJoin<Self> {
        FluentJoin::open(self, kind, table, from_column, to_column, alias)
    }

    /// Returns the expression built so far.
    #[must_use]
    pub const fn expression(&self) -> &QueryExpression {
        &self.query
    }

    /// Finishes building and returns the expression tree.
    #[must_use]
    pub fn build_expression(self) -> QueryExpression {
        self.query
    }

    /// Renders the expression built so far.
    ///
    /// # Errors
    ///
    /// See [`QueryExpression::render`].
    pub fn build_sql(&self) -> Result<String> {
        self.query.render()
    }
}

impl JoinScope for FluentQuery {
    fn root(&mut self) -> &mut FluentQuery {
        self
    }

    fn scope_alias(&self) -> &str {
        &self.query.alias
    }

    fn attachment(&self) -> JoinAttachment {
        self.attachment
    }

    fn adopt(&mut self, node: JoinNode) {
        debug!(alias = %node.alias, attach_to = "root", "closing join");
        self.query.joins.push(node);
    }
}

/// An open join context.
///
/// `P` is the scope that opened it: [`FluentQuery`] for a top-level join,
/// another `FluentJoin` for a sub-join.
#[derive(Debug, Clone)]
#[must_use = "a join is only added to the query when it is closed"]
pub struct FluentJoin<P> {
    parent: P,
    node: JoinNode,
}

impl<P: JoinScope> FluentJoin<P> {
    fn open(
        parent: P,
        kind: JoinKind,
        table: &str,
        from_column: &str,
        to_column: &str,
        alias: Option<&str>,
    ) -> Self {
        let node = JoinNode::new(parent.scope_alias(), from_column, table, to_column)
            .with_alias(alias.unwrap_or(table))
            .with_kind(kind);
        Self { parent, node }
    }

    /// Appends columns of the joined table.
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.node.columns.extend(columns);
        self
    }

    /// Flags the join as selecting every column.
    ///
    /// Joined tables only ever contribute their named columns, so this adds
    /// nothing to the SELECT list on its own.
    pub fn select_all(mut self) -> Self {
        self.node.columns.include_all_columns = true;
        self
    }

    /// Appends a condition to the join criteria.
    pub fn where_clause(mut self, condition: impl Into<ConditionExpression>) -> Self {
        self.node.criteria.add_condition(condition);
        self
    }

    /// Appends a nested filter group to the join criteria.
    pub fn where_filter(mut self, filter: FilterExpression) -> Self {
        self.node.criteria.add_condition(ConditionExpression::nested(filter));
        self
    }

    /// Opens a join from this joined table to `table`.
    pub fn sub_join(
        self,
        kind: JoinKind,
        table: &str,
        from_column: &str,
        to_column: &str,
        alias: Option<&str>,
    ) -> FluentJoin<Self> {
        FluentJoin::open(self, kind, table, from_column, to_column, alias)
    }

    /// The join node built so far.
    #[must_use]
    pub const fn node(&self) -> &JoinNode {
        &self.node
    }
}

impl<P: JoinScope> FluentJoin<FluentJoin<P>> {
    /// Closes this sub-join and returns to the join that opened it.
    pub fn close_sub_join(self) -> FluentJoin<P> {
        let Self { mut parent, node } = self;
        parent.adopt(node);
        parent
    }
}

impl FluentJoin<FluentQuery> {
    /// Closes this join and returns to the root query.
    #[must_use]
    pub fn close_join(self) -> FluentQuery {
        let Self { mut parent, node } = self;
        parent.adopt(node);
        parent
    }
}

impl<P: JoinScope> JoinScope for FluentJoin<P> {
    fn root(&mut self) -> &mut FluentQuery {
        self.parent.root()
    }

    fn scope_alias(&self) -> &str {
        &self.node.alias
    }

    fn attachment(&self) -> JoinAttachment {
        self.parent.attachment()
    }

    fn adopt(&mut self, node: JoinNode) {
        match self.attachment() {
            JoinAttachment::Root => self.root().adopt(node),
            JoinAttachment::Parent => {
                debug!(alias = %node.alias, attach_to = %self.node.alias, "closing sub-join");
                self.node.add_child(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all() {
        let sql = FluentQuery::query_table("Accounts")
            .select_all()
            .with_alias("a1")
            .build_sql()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM Accounts a1");
    }

    #[test]
    fn test_select_columns_copies_wildcard() {
        let query = FluentQuery::query_table("Accounts")
            .select_columns(ColumnSet::all().add("Name"))
            .build_expression();
        assert!(query.columns.include_all_columns);
        assert_eq!(query.columns.columns, ["Name"]);
    }

    #[test]
    fn test_order_by() {
        let sql = FluentQuery::query_table_as("Accounts", "a1")
            .select(&["Name"])
            .order_by("Name")
            .order_by_desc("CreatedOn")
            .build_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT a1.Name FROM Accounts a1 ORDER BY a1.Name ASC, a1.CreatedOn DESC"
        );
    }

    #[test]
    fn test_join_alias_defaults_to_table() {
        let query = FluentQuery::query_table_as("Accounts", "a1")
            .join("Contacts", "AccountId", "AccountId", None, JoinKind::Left)
            .close_join()
            .build_expression();
        assert_eq!(query.joins[0].alias, "Contacts");
        assert_eq!(query.joins[0].from_alias, "a1");
    }

    #[test]
    fn test_join_keeps_alias_at_open_time() {
        let query = FluentQuery::query_table("Accounts")
            .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Inner)
            .close_join()
            .with_alias("a1")
            .build_expression();
        assert_eq!(query.joins[0].from_alias, "Accounts");
    }

    #[test]
    fn test_sub_join_links_from_opener() {
        let join = FluentQuery::query_table_as("Accounts", "a1")
            .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Left)
            .sub_join(JoinKind::Inner, "Orders", "ContactId", "ContactId", Some("o1"));
        assert_eq!(join.node().from_alias, "c1");
        assert_eq!(join.node().kind, JoinKind::Inner);
    }

    #[test]
    fn test_root_attachment_flattens_in_closing_order() {
        let query = FluentQuery::query_table_as("Accounts", "a1")
            .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Left)
            .sub_join(JoinKind::Inner, "Orders", "ContactId", "ContactId", Some("o1"))
            .close_sub_join()
            .close_join()
            .build_expression();
        let aliases: Vec<&str> = query.joins.iter().map(|j| j.alias.as_str()).collect();
        assert_eq!(aliases, ["o1", "c1"]);
        assert!(query.joins.iter().all(|j| j.children.is_empty()));
    }

    #[test]
    fn test_parent_attachment_nests() {
        let query = FluentQuery::query_table_as("Accounts", "a1")
            .with_join_attachment(JoinAttachment::Parent)
            .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Left)
            .sub_join(JoinKind::Inner, "Orders", "ContactId", "ContactId", Some("o1"))
            .sub_join(JoinKind::Left, "Lines", "OrderId", "OrderId", Some("l1"))
            .close_sub_join()
            .close_sub_join()
            .close_join()
            .build_expression();
        assert_eq!(query.joins.len(), 1);
        assert_eq!(query.joins[0].alias, "c1");
        assert_eq!(query.joins[0].children[0].alias, "o1");
        assert_eq!(query.joins[0].children[0].children[0].alias, "l1");
    }
}
