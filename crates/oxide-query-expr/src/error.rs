//! Error types for rendering and validating query expressions.

use thiserror::Error;

/// Errors produced while rendering or validating a query expression.
///
/// `render` only ever returns [`QueryError::InvalidArgument`] or
/// [`QueryError::NotSupported`]. The remaining variants are reported by the
/// separate validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A value does not fit the operator it was paired with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operator outside the recognized set.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// A table, alias or column name is empty.
    #[error("empty identifier: {context}")]
    EmptyIdentifier {
        /// Where the empty identifier was found.
        context: String,
    },

    /// Two tables in one statement share an alias.
    #[error("alias '{0}' is used more than once")]
    DuplicateAlias(String),

    /// A join refers to an alias that is not in scope.
    #[error("join to '{join}' links from unknown alias '{alias}'")]
    UnknownAlias {
        /// The alias the join links from.
        alias: String,
        /// The alias of the offending join.
        join: String,
    },

    /// Paging options are incomplete or out of range.
    #[error("invalid paging: {0}")]
    InvalidPaging(String),

    /// Several validation failures at once.
    #[error("{} validation errors:\n{}", .0.len(), .0.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    Multiple(Vec<QueryError>),
}

/// Result type alias for query expression operations.
pub type Result<T> = std::result::Result<T, QueryError>;
