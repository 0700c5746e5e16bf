//! SQL literal values.
//!
//! Values are resolved into a closed [`SqlValue`] when a condition is built,
//! and rendered as inline T-SQL literals. Nothing is escaped or
//! parameterized: text goes between single quotes exactly as given.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SecondsFormat, Utc};
use tracing::warn;
use uuid::Uuid;

/// A literal value that can appear on the right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    ///
    /// Rendered as the bit literal `1` or `0`, never as `True` or `False`:
    /// T-SQL has no boolean literal.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    ///
    /// NaN and the infinities have no SQL literal; they render as `NULL`
    /// with a warning.
    Float(f64),
    /// Text value.
    Text(String),
    /// Date and time with a UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Unique identifier.
    Uuid(Uuid),
    /// Ordered list of values, used with the `IN` operator.
    List(Vec<SqlValue>),
}

impl SqlValue {
    /// Returns the inline SQL literal for a scalar value.
    ///
    /// Lists have no scalar literal and return `None`.
    #[must_use]
    pub fn to_sql_literal(&self) -> Option<String> {
        let literal = match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => String::from(if *b { "1" } else { "0" }),
            Self::Int(n) => format!("{n}"),
            Self::Float(f) if !f.is_finite() => {
                warn!(value = %f, "non-finite float rendered as NULL");
                String::from("NULL")
            }
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => format!("'{s}'"),
            Self::DateTime(dt) => {
                format!("'{}'", dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            Self::Uuid(id) => format!("'{}'", id.hyphenated()),
            Self::List(_) => return None,
        };
        Some(literal)
    }

    /// Returns `true` for [`SqlValue::List`].
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Short name of the variant, used in error messages and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::DateTime(_) => "datetime",
            Self::Uuid(_) => "uuid",
            Self::List(_) => "list",
        }
    }
}

/// Renders the elements of an `IN` list as `lit1,lit2,...`.
///
/// NULL, non-finite floats and nested lists have no place in a membership
/// list. They are dropped from the output and reported with a warning.
pub(crate) fn render_in_list(values: &[SqlValue]) -> String {
    let mut literals = Vec::with_capacity(values.len());
    for (position, value) in values.iter().enumerate() {
        match value {
            SqlValue::Float(f) if !f.is_finite() => {
                warn!(position, value = %f, "skipping non-finite float in IN list");
            }
            SqlValue::Null | SqlValue::List(_) => {
                warn!(
                    position,
                    kind = value.kind(),
                    "skipping unsupported element in IN list"
                );
            }
            scalar => {
                if let Some(literal) = scalar.to_sql_literal() {
                    literals.push(literal);
                }
            }
        }
    }
    literals.join(",")
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! impl_int_value {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

impl_int_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Uuid {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Uuid(self)
    }
}

impl ToSqlValue for DateTime<FixedOffset> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self)
    }
}

impl ToSqlValue for DateTime<Utc> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self.fixed_offset())
    }
}

impl ToSqlValue for DateTime<Local> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self.fixed_offset())
    }
}

/// Naive timestamps are taken to be UTC.
impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self.and_utc().fixed_offset())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl<T: ToSqlValue> ToSqlValue for Vec<T> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

impl<T: ToSqlValue, const N: usize> ToSqlValue for [T; N] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

impl<T: ToSqlValue + Clone> ToSqlValue for &[T] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.iter().cloned().map(ToSqlValue::to_sql_value).collect())
    }
}
