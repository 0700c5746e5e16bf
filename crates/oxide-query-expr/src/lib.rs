//! # oxide-query-expr
//!
//! Object-based SELECT statements that render themselves into T-SQL text.
//!
//! This crate provides:
//! - Expression types for columns, conditions, nested AND/OR filters,
//!   ordering and join trees
//! - [`QueryExpression`], the root of a tree, with a single pure
//!   [`render`](QueryExpression::render) operation
//! - [`FluentQuery`], a chainable front-end producing the same trees
//! - `UNION` / `EXCEPT ALL` composition and an opt-in validation pass
//!
//! Values are inlined as literals; nothing is escaped or parameterized.
//! Only feed trusted values into a query.
//!
//! ## Direct construction
//!
//! ```rust
//! use oxide_query_expr::{
//!     ColumnSet, ConditionExpression, JoinKind, JoinNode, QueryExpression,
//! };
//!
//! let query = QueryExpression::new("Accounts", ColumnSet::of(&["Name", "Email"]))
//!     .with_alias("a1")
//!     .where_clause(ConditionExpression::eq("Status", "Active"))
//!     .join(
//!         JoinNode::new("a1", "AccountId", "Contacts", "AccountId")
//!             .with_alias("c1")
//!             .with_kind(JoinKind::Inner)
//!             .select(ColumnSet::of(&["FirstName", "LastName"]))
//!             .where_clause(ConditionExpression::eq("Status", "Active")),
//!     );
//!
//! assert_eq!(
//!     query.render().unwrap(),
//!     "SELECT a1.Name, a1.Email, c1.FirstName, c1.LastName FROM Accounts a1 \
//!      INNER JOIN Contacts c1 ON a1.AccountId = c1.AccountId \
//!      WHERE (c1.Status = 'Active') AND (a1.Status = 'Active')"
//! );
//! ```
//!
//! ## Fluent construction
//!
//! ```rust
//! use oxide_query_expr::FluentQuery;
//!
//! let sql = FluentQuery::query_table("Accounts")
//!     .select_all()
//!     .with_top_count(10)
//!     .with_alias("a1")
//!     .build_sql()
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT TOP 10 * FROM Accounts a1");
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize` / `Deserialize` for the expression tree.

mod compound;
pub mod error;
pub mod expr;
pub mod fluent;
mod query;
mod validate;

pub use compound::UnionKind;
pub use error::{QueryError, Result};
pub use expr::{
    Clauses, ColumnSet, ConditionExpression, ConditionOperator, FilterExpression, JoinKind,
    JoinNode, LogicalOperator, OrderExpression, SortDirection, SqlValue, ToSqlValue,
};
pub use fluent::{FluentJoin, FluentQuery, JoinAttachment, JoinScope};
pub use query::QueryExpression;
