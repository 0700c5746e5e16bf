//! Expression trees survive a trip through JSON.

#![cfg(feature = "serde")]

mod common;
use common::*;

use oxide_query_expr::{ConditionExpression, JoinKind, QueryExpression};
use uuid::Uuid;

#[test]
fn stored_tree_renders_the_same_statement() {
    let mut contacts = contacts(JoinKind::Left);
    contacts.add_child(orders());
    let query = accounts()
        .where_clause(active())
        .where_clause(customer_or_vendor())
        .where_clause(ConditionExpression::in_list("OwnerId", vec![Uuid::nil()]))
        .join(contacts)
        .with_paging(2, 50);

    let json = serde_json::to_string(&query).unwrap();
    let restored: QueryExpression = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, query);
    assert_eq!(render(&restored), render(&query));
}
