//! Expression building blocks: columns, values, conditions, filters,
//! ordering and joins.

mod column_set;
mod condition;
mod filter;
mod join;
mod order;
pub mod value;

pub use column_set::ColumnSet;
pub use condition::{ConditionExpression, ConditionOperator};
pub use filter::{FilterExpression, LogicalOperator};
pub use join::{Clauses, JoinKind, JoinNode};
pub use order::{OrderExpression, SortDirection};
pub use value::{SqlValue, ToSqlValue};
