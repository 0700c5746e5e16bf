//! Accounts and Contacts - Query Expression Example
//!
//! This example builds the same account/contact/order report three ways:
//! - Directly, as a nested join tree
//! - Fluently, with the default root attachment (joins flattened in closing order)
//! - Fluently, with parent attachment (same tree as the direct build)
//!
//! Pass `-v` to see the rendering trace.
//!
//! Run with: cargo run --example accounts [-- -v]

use clap::Parser;
use oxide_query_expr::{
    ColumnSet, ConditionExpression, FilterExpression, FluentQuery, JoinAttachment, JoinKind,
    JoinNode, OrderExpression, QueryExpression, UnionKind,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Renders an account report with each query front-end.
#[derive(Parser)]
#[command(name = "accounts")]
#[command(about, long_about = None)]
struct Cli {
    /// Show the rendering trace.
    #[arg(short, long)]
    verbose: bool,
}

fn direct() -> QueryExpression {
    let orders = JoinNode::new("c1", "ContactId", "Orders", "ContactId")
        .with_alias("o1")
        .with_kind(JoinKind::Inner)
        .select(ColumnSet::of(&["OrderId", "TotalAmount"]))
        .where_clause(ConditionExpression::eq("Status", "Completed"));

    let contacts = JoinNode::new("a1", "AccountId", "Contacts", "AccountId")
        .with_alias("c1")
        .select(ColumnSet::of(&["FirstName", "LastName"]))
        .where_clause(ConditionExpression::eq("Status", "Active"))
        .with_child(orders);

    QueryExpression::new("Accounts", ColumnSet::of(&["Name", "Email"]))
        .with_alias("a1")
        .where_clause(ConditionExpression::eq("Status", "Active"))
        .where_clause(
            FilterExpression::or()
                .with(ConditionExpression::eq("Type", "Customer"))
                .with(ConditionExpression::eq("Type", "Vendor")),
        )
        .join(contacts)
        .order_by(OrderExpression::asc("Name"))
        .with_paging(1, 50)
}

fn fluent(attachment: JoinAttachment) -> FluentQuery {
    FluentQuery::query_table_as("Accounts", "a1")
        .with_join_attachment(attachment)
        .select(&["Name", "Email"])
        .where_clause(ConditionExpression::eq("Status", "Active"))
        .join("Contacts", "AccountId", "AccountId", Some("c1"), JoinKind::Left)
        .select(&["FirstName", "LastName"])
        .where_clause(ConditionExpression::eq("Status", "Active"))
        .sub_join(JoinKind::Inner, "Orders", "ContactId", "ContactId", Some("o1"))
        .select(&["OrderId", "TotalAmount"])
        .where_clause(ConditionExpression::eq("Status", "Completed"))
        .close_sub_join()
        .close_join()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let query = direct();
    query.validate()?;
    info!("direct tree:\n{}", query.render()?);

    let flattened = fluent(JoinAttachment::Root);
    info!("fluent, root attachment:\n{}", flattened.build_sql()?);
    if let Err(err) = flattened.expression().validate() {
        info!("fluent, root attachment does not validate: {err}");
    }

    info!(
        "fluent, parent attachment:\n{}",
        fluent(JoinAttachment::Parent).build_sql()?
    );

    let vendors = QueryExpression::new("Vendors", ColumnSet::of(&["Name", "Email"]));
    let customers = QueryExpression::new("Customers", ColumnSet::of(&["Name", "Email"]));
    info!(
        "union:\n{}",
        vendors.union(UnionKind::All, &[customers])?
    );

    Ok(())
}
