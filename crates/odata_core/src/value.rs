//! Literal values embedded in query clauses.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A literal value carried by a clause and rendered into the compiled query.
///
/// `Raw` is the unescaped escape hatch: its content is emitted verbatim and
/// never recorded as a binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// UTF-8 string, quoted on render.
    String(String),
    /// Signed integer.
    Integer(i64),
    /// Double-precision float.
    Float(f64),
    /// Boolean, rendered lowercase.
    Bool(bool),
    /// UTC timestamp, rendered RFC 3339.
    DateTime(DateTime<Utc>),
    /// Calendar date, rendered ISO 8601.
    Date(NaiveDate),
    /// GUID, rendered bare per OData v4.
    Guid(Uuid),
    /// Explicit null.
    Null,
    /// Raw expression fragment, rendered verbatim.
    Raw(String),
}

impl Value {
    /// Construct a raw expression fragment.
    ///
    /// The content bypasses quoting and escaping entirely, so it must already
    /// be valid in the target grammar.
    pub fn raw(expr: impl Into<String>) -> Self {
        Self::Raw(expr.into())
    }

    /// Whether this value is the raw-expression marker.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render this value as an OData v4 literal.
    ///
    /// Strings are single-quoted with embedded quotes doubled; this is the
    /// only place quoting rules live.
    pub fn to_literal(&self) -> String {
        match self {
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Integer(i) => i.to_string(),
            // Debug formatting keeps the decimal point on round floats.
            Self::Float(f) => format!("{f:?}"),
            Self::Bool(b) => b.to_string(),
            Self::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            Self::Date(d) => d.to_string(),
            Self::Guid(g) => g.to_string(),
            Self::Null => "null".to_string(),
            Self::Raw(expr) => expr.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<Uuid> for Value {
    fn from(g: Uuid) -> Self {
        Self::Guid(g)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_literals_are_quoted_and_escaped() {
        assert_eq!(Value::from("bob").to_literal(), "'bob'");
        assert_eq!(Value::from("O'Neil").to_literal(), "'O''Neil'");
    }

    #[test]
    fn scalar_literals() {
        assert_eq!(Value::from(42).to_literal(), "42");
        assert_eq!(Value::from(1.5).to_literal(), "1.5");
        assert_eq!(Value::from(2.0).to_literal(), "2.0");
        assert_eq!(Value::from(true).to_literal(), "true");
        assert_eq!(Value::Null.to_literal(), "null");
    }

    #[test]
    fn temporal_literals() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Value::from(date).to_literal(), "2024-03-09");

        let dt = DateTime::parse_from_rfc3339("2024-03-09T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Value::from(dt).to_literal(), "2024-03-09T12:30:00Z");
    }

    #[test]
    fn guid_literals_are_bare() {
        let g = Uuid::parse_str("c93d2bbc-8e48-47e4-89c2-5c6f4ff5b686").unwrap();
        assert_eq!(
            Value::from(g).to_literal(),
            "c93d2bbc-8e48-47e4-89c2-5c6f4ff5b686"
        );
    }

    #[test]
    fn raw_values_render_verbatim() {
        let raw = Value::raw("year(BirthDate)");
        assert!(raw.is_raw());
        assert_eq!(raw.to_literal(), "year(BirthDate)");
    }

    #[test]
    fn option_none_maps_to_null() {
        let v: Value = Option::<i64>::None.into();
        assert!(v.is_null());
        let v: Value = Some("x").into();
        assert_eq!(v, Value::from("x"));
    }
}
