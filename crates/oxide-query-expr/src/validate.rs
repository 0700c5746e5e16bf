//! Structural validation of a query expression.
//!
//! Rendering never validates; call [`QueryExpression::validate`] explicitly
//! to catch mistakes that would otherwise only surface when the database
//! executes the text.

use std::collections::HashSet;

use crate::error::{QueryError, Result};
use crate::expr::{FilterExpression, JoinNode};
use crate::query::QueryExpression;

impl QueryExpression {
    /// Checks identifiers, alias scoping and paging.
    ///
    /// Aliases must be unique across the statement, and every join must
    /// link from the root alias or from a join that appears before it in
    /// rendering order.
    ///
    /// # Errors
    ///
    /// Returns the single failure found, or [`QueryError::Multiple`] when
    /// there are several.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        require(&self.table, "query table", &mut errors);
        require(&self.alias, "query alias", &mut errors);
        for column in &self.columns.columns {
            require(column, &format!("column of '{}'", self.alias), &mut errors);
        }
        check_filter(&self.filter, &self.alias, &mut errors);
        for order in &self.order_by {
            require(order.column(), &format!("ORDER BY column of '{}'", self.alias), &mut errors);
        }

        let mut scope: HashSet<&str> = HashSet::new();
        scope.insert(&self.alias);
        for join in &self.joins {
            check_join(join, &mut scope, &mut errors);
        }

        match (self.page_number, self.page_size) {
            (Some(_), None) | (None, Some(_)) => errors.push(QueryError::InvalidPaging(
                String::from("page number and page size must be set together"),
            )),
            (Some(number), Some(size)) => {
                if number == 0 {
                    errors.push(QueryError::InvalidPaging(String::from(
                        "page number starts at 1",
                    )));
                }
                if size == 0 {
                    errors.push(QueryError::InvalidPaging(String::from(
                        "page size must be at least 1",
                    )));
                }
            }
            (None, None) => {}
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(QueryError::Multiple(errors)),
        }
    }
}

fn require(identifier: &str, context: &str, errors: &mut Vec<QueryError>) {
    if identifier.trim().is_empty() {
        errors.push(QueryError::EmptyIdentifier {
            context: String::from(context),
        });
    }
}

fn check_filter(filter: &FilterExpression, alias: &str, errors: &mut Vec<QueryError>) {
    for condition in filter.conditions() {
        if let Some(nested) = condition.nested_filter() {
            check_filter(nested, alias, errors);
        } else if let Some(column) = condition.column_name() {
            require(column, &format!("condition column of '{alias}'"), errors);
        }
    }
}

fn check_join<'a>(join: &'a JoinNode, scope: &mut HashSet<&'a str>, errors: &mut Vec<QueryError>) {
    let label = format!("join to '{}'", join.to_table);
    require(&join.to_table, "joined table", errors);
    require(&join.alias, &format!("alias of {label}"), errors);
    require(&join.from_alias, &format!("source alias of {label}"), errors);
    require(&join.from_column, &format!("source column of {label}"), errors);
    require(&join.to_column, &format!("target column of {label}"), errors);
    for column in &join.columns.columns {
        require(column, &format!("column of '{}'", join.alias), errors);
    }
    check_filter(&join.criteria, &join.alias, errors);

    if !join.from_alias.is_empty() && !scope.contains(join.from_alias.as_str()) {
        errors.push(QueryError::UnknownAlias {
            alias: join.from_alias.clone(),
            join: join.alias.clone(),
        });
    }
    if !scope.insert(&join.alias) {
        errors.push(QueryError::DuplicateAlias(join.alias.clone()));
    }

    for child in &join.children {
        check_join(child, scope, errors);
    }
}
