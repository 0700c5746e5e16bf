#![allow(dead_code)]

use oxide_query_expr::{
    ColumnSet, ConditionExpression, FilterExpression, JoinKind, JoinNode, LogicalOperator,
    QueryExpression,
};

pub fn accounts() -> QueryExpression {
    QueryExpression::new("Accounts", ColumnSet::of(&["Name", "Email"])).with_alias("a1")
}

pub fn accounts_all() -> QueryExpression {
    QueryExpression::new("Accounts", ColumnSet::all()).with_alias("a1")
}

pub fn active() -> ConditionExpression {
    ConditionExpression::eq("Status", "Active")
}

pub fn customer_or_vendor() -> FilterExpression {
    let mut filter = FilterExpression::new(LogicalOperator::Or);
    filter.add_condition(ConditionExpression::eq("Type", "Customer"));
    filter.add_condition(ConditionExpression::eq("Type", "Vendor"));
    filter
}

pub fn contacts(kind: JoinKind) -> JoinNode {
    JoinNode::new("a1", "AccountId", "Contacts", "AccountId")
        .with_alias("c1")
        .with_kind(kind)
        .select(ColumnSet::of(&["FirstName", "LastName"]))
        .where_clause(active())
}

pub fn orders() -> JoinNode {
    JoinNode::new("c1", "ContactId", "Orders", "ContactId")
        .with_alias("o1")
        .with_kind(JoinKind::Inner)
        .select(ColumnSet::of(&["OrderId", "TotalAmount"]))
        .where_clause(ConditionExpression::eq("Status", "Completed"))
}

pub fn render(query: &QueryExpression) -> String {
    query
        .render()
        .unwrap_or_else(|e| panic!("Failed to render {query:?}\nError: {e}"))
}

/// Renders twice and checks both renderings agree.
pub fn render_stable(query: &QueryExpression) -> String {
    let first = render(query);
    let second = render(query);
    assert_eq!(first, second, "rendering is not repeatable");
    first
}
