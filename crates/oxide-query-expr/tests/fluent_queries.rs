//! Statements built through the fluent front-end.

mod common;
use common::*;

use oxide_query_expr::{ConditionExpression, FluentQuery, JoinAttachment, JoinKind};

fn render_fluent(query: &FluentQuery) -> String {
    query
        .build_sql()
        .unwrap_or_else(|e| panic!("Failed to render fluent query\nError: {e}"))
}

#[test]
fn column_set_wildcard() {
    let query = FluentQuery::query_table("Accounts").select_all().with_alias("a1");
    assert_eq!(render_fluent(&query), "SELECT * FROM Accounts a1");
}

#[test]
fn top_count() {
    let query = FluentQuery::query_table("Accounts")
        .select_all()
        .with_top_count(10)
        .with_alias("a1");
    assert_eq!(render_fluent(&query), "SELECT TOP 10 * FROM Accounts a1");
}

#[test]
fn basic_filter() {
    let query = FluentQuery::query_table("Accounts")
        .select(&["Name", "Email"])
        .where_clause(active())
        .with_alias("a1");
    assert_eq!(
        render_fluent(&query),
        "SELECT a1.Name, a1.Email FROM Accounts a1 WHERE (a1.Status = 'Active')"
    );
}

#[test]
fn basic_filter_with_pagination() {
    let query = FluentQuery::query_table("Accounts")
        .select(&["Name", "Email"])
        .where_clause(active())
        .with_page_number(2)
        .with_page_size(10)
        .with_alias("a1");
    assert_eq!(
        render_fluent(&query),
        "SELECT a1.Name, a1.Email FROM Accounts a1 WHERE (a1.Status = 'Active') \
         OFFSET 10 ROWS FETCH NEXT 10 ROWS ONLY"
    );
}

#[test]
fn nested_filter_with_and_or() {
    let query = FluentQuery::query_table("Accounts")
        .with_alias("a1")
        .select(&["Name", "Email"])
        .where_clause(active())
        .where_filter(customer_or_vendor());
    assert_eq!(
        render_fluent(&query),
        "SELECT a1.Name, a1.Email FROM Accounts a1 \
         WHERE (a1.Status = 'Active' AND (a1.Type = 'Customer' OR a1.Type = 'Vendor'))"
    );
}

#[test]
fn join_with_filters() {
    let query = FluentQuery::query_table("Accounts")
        .with_alias("a1")
        .select(&["Name", "Email"])
        .where_clause(active())
        .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Inner)
        .select(&["FirstName", "LastName"])
        .where_clause(active())
        .close_join();
    assert_eq!(
        render_fluent(&query),
        "SELECT a1.Name, a1.Email, c1.FirstName, c1.LastName FROM Accounts a1 \
         INNER JOIN Contacts c1 ON a1.AccountId = c1.AccountId \
         WHERE (c1.Status = 'Active') AND (a1.Status = 'Active')"
    );
}

#[test]
fn join_select_all_keeps_named_columns_only() {
    let query = FluentQuery::query_table_as("Accounts", "a1")
        .select(&["Name"])
        .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Left)
        .select_all()
        .select(&["FirstName"])
        .close_join();
    assert_eq!(
        render_fluent(&query),
        "SELECT a1.Name, c1.FirstName FROM Accounts a1 \
         LEFT JOIN Contacts c1 ON a1.AccountId = c1.AccountId"
    );
}

fn nested_join_chain(attachment: JoinAttachment) -> FluentQuery {
    FluentQuery::query_table_as("Accounts", "a1")
        .with_join_attachment(attachment)
        .select(&["Name", "Email"])
        .where_clause(active())
        .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Left)
        .select(&["FirstName", "LastName"])
        .where_clause(active())
        .sub_join(JoinKind::Inner, "Orders", "ContactId", "ContactId", Some("o1"))
        .select(&["OrderId", "TotalAmount"])
        .where_clause(ConditionExpression::eq("Status", "Completed"))
        .close_sub_join()
        .close_join()
}

#[test]
fn nested_join_is_flattened_in_closing_order() {
    assert_eq!(
        render_fluent(&nested_join_chain(JoinAttachment::Root)),
        "SELECT a1.Name, a1.Email, o1.OrderId, o1.TotalAmount, c1.FirstName, c1.LastName \
         FROM Accounts a1 \
         INNER JOIN Orders o1 ON c1.ContactId = o1.ContactId \
         LEFT JOIN Contacts c1 ON a1.AccountId = c1.AccountId \
         WHERE (o1.Status = 'Completed') AND (c1.Status = 'Active') AND (a1.Status = 'Active')"
    );
}

#[test]
fn default_attachment_is_root() {
    let default = FluentQuery::query_table_as("Accounts", "a1")
        .select(&["Name", "Email"])
        .where_clause(active())
        .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Left)
        .select(&["FirstName", "LastName"])
        .where_clause(active())
        .sub_join(JoinKind::Inner, "Orders", "ContactId", "ContactId", Some("o1"))
        .select(&["OrderId", "TotalAmount"])
        .where_clause(ConditionExpression::eq("Status", "Completed"))
        .close_sub_join()
        .close_join();
    assert_eq!(
        render_fluent(&default),
        render_fluent(&nested_join_chain(JoinAttachment::Root))
    );
}

#[test]
fn parent_attachment_matches_direct_tree() {
    let mut contacts = contacts(JoinKind::Left);
    contacts.add_child(orders());
    let direct = accounts().where_clause(active()).join(contacts);

    let fluent = nested_join_chain(JoinAttachment::Parent).build_expression();

    assert_eq!(fluent, direct);
    assert_eq!(render(&fluent), render(&direct));
}

#[test]
fn expression_is_shared_with_direct_api() {
    let fluent = FluentQuery::query_table_as("Accounts", "a1")
        .select(&["Name", "Email"])
        .where_clause(active())
        .order_by("Name")
        .with_top_count(3);
    let direct = accounts()
        .where_clause(active())
        .order_by(oxide_query_expr::OrderExpression::asc("Name"))
        .with_top(3);
    assert_eq!(fluent.expression(), &direct);
}
