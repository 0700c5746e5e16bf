//! Compound statements built from several queries.
//!
//! These are plain text concatenations: the member statements are not
//! checked for matching column shapes.

use crate::error::Result;
use crate::query::QueryExpression;

/// Flavor of `UNION`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnionKind {
    /// `UNION`, removing duplicate rows.
    #[default]
    Distinct,
    /// `UNION ALL`, keeping duplicate rows.
    All,
}

impl UnionKind {
    /// Returns the SQL keyword for the union.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Distinct => "UNION",
            Self::All => "UNION ALL",
        }
    }
}

impl QueryExpression {
    /// Renders this query followed by each of `others`, separated by
    /// `UNION` or `UNION ALL` on its own line.
    ///
    /// # Errors
    ///
    /// Returns the first rendering error of any member query.
    pub fn union(&self, kind: UnionKind, others: &[Self]) -> Result<String> {
        self.compound(kind.as_sql(), others)
    }

    /// Renders this query followed by each of `others`, separated by
    /// `EXCEPT ALL` on its own line.
    ///
    /// # Errors
    ///
    /// Returns the first rendering error of any member query.
    pub fn except_all(&self, others: &[Self]) -> Result<String> {
        self.compound("EXCEPT ALL", others)
    }

    fn compound(&self, keyword: &str, others: &[Self]) -> Result<String> {
        let mut sql = self.render()?;
        for other in others {
            sql.push('\n');
            sql.push_str(keyword);
            sql.push('\n');
            sql.push_str(&other.render()?);
        }
        Ok(sql)
    }
}
