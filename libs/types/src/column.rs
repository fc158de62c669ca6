//! Values crossing the generic SQL driver boundary.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::fmt;

/// A value a database driver can bind as a parameter or hand back from a
/// column scan.
///
/// Timestamps accept only the [`Text`](ColumnValue::Text) and
/// [`Instant`](ColumnValue::Instant) cases; the remaining cases exist so
/// a scan of the wrong column type can be rejected with an error naming
/// the value it received.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// SQL NULL.
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// A date-time value decoded natively by the driver.
    Instant(DateTime<FixedOffset>),
}

impl ColumnValue {
    /// Returns the text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Null => write!(f, "NULL"),
            ColumnValue::Bool(b) => write!(f, "{b}"),
            ColumnValue::Integer(i) => write!(f, "{i}"),
            ColumnValue::Float(x) => write!(f, "{x}"),
            ColumnValue::Text(s) => write!(f, "{s:?}"),
            ColumnValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            ColumnValue::Instant(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<String> for ColumnValue {
    fn from(text: String) -> Self {
        ColumnValue::Text(text)
    }
}

impl From<&str> for ColumnValue {
    fn from(text: &str) -> Self {
        ColumnValue::Text(text.to_owned())
    }
}

impl From<DateTime<FixedOffset>> for ColumnValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        ColumnValue::Instant(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_value() {
        assert_eq!(ColumnValue::Float(1.24).to_string(), "1.24");
        assert_eq!(ColumnValue::Integer(-7).to_string(), "-7");
        assert_eq!(ColumnValue::Null.to_string(), "NULL");
        assert_eq!(
            ColumnValue::Text("someT123".into()).to_string(),
            "\"someT123\""
        );
        assert_eq!(ColumnValue::Bytes(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }

    #[test]
    fn test_as_text() {
        assert_eq!(ColumnValue::from("abc").as_text(), Some("abc"));
        assert_eq!(ColumnValue::Integer(1).as_text(), None);
    }
}
