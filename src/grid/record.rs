//! Field values and the row abstraction
//!
//! The grid never sees concrete record types. Rows expose their fields as
//! [`Value`]s through the [`Row`] trait, and the pipeline stages compare,
//! search and coerce those values without any domain knowledge.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// A single field value as seen by the grid
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing or unset field
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
}

impl Value {
    /// True for missing/unset fields
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce to a number, if the value can represent one
    ///
    /// Text is parsed as f64; booleans map to 0/1; dates map to epoch
    /// milliseconds. `None` means the value is not numeric - range filters
    /// treat that as unfilterable and keep the row.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Date(d) => Some(d.timestamp_millis() as f64),
            Value::Null => None,
        }
    }

    /// Coerce to a date, if the value can represent one
    ///
    /// Text is parsed as RFC 3339, then as a plain `YYYY-MM-DD` day at
    /// midnight UTC. Numbers are taken as epoch milliseconds.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => {
                let s = s.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.with_timezone(&Utc));
                }
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| Utc.from_utc_datetime(&dt))
            }
            Value::Number(n) => Utc.timestamp_millis_opt(*n as i64).single(),
            _ => None,
        }
    }

    /// String representation used for search and mixed-type sorting
    ///
    /// Null renders empty and therefore never matches a search needle.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    /// Truthiness, for boolean flag filters
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::Date(_) => true,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Value::from).unwrap_or(Value::Null)
    }
}

/// A record the grid can operate on
///
/// Unknown field keys must yield [`Value::Null`].
pub trait Row {
    fn field(&self, key: &str) -> Value;
}

impl Row for std::collections::BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_coercions() {
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::Text(" 30 ".into()).as_number(), Some(30.0));
        assert_eq!(Value::Bool(true).as_number(), Some(1.0));
        assert_eq!(Value::Text("n/a".into()).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_as_date_coercions() {
        let d = Value::Text("2026-03-01".into()).as_date().unwrap();
        assert_eq!(d.format("%Y-%m-%d").to_string(), "2026-03-01");

        let rfc = Value::Text("2026-03-01T12:30:00Z".into()).as_date().unwrap();
        assert_eq!(rfc.format("%H:%M").to_string(), "12:30");

        assert_eq!(Value::Text("soon".into()).as_date(), None);
        assert_eq!(Value::Bool(true).as_date(), None);
    }

    #[test]
    fn test_render_null_is_empty() {
        assert_eq!(Value::Null.render(), "");
        assert_eq!(Value::Number(30.0).render(), "30");
        assert_eq!(Value::Bool(false).render(), "false");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.truthy());
        assert!(!Value::Text("".into()).truthy());
        assert!(Value::Text("x".into()).truthy());
        assert!(!Value::Number(0.0).truthy());
        assert!(Value::Number(-1.0).truthy());
    }

    #[test]
    fn test_map_row_unknown_key_is_null() {
        let mut row = std::collections::BTreeMap::new();
        row.insert("name".to_string(), Value::from("Bob"));

        assert_eq!(row.field("name"), Value::Text("Bob".into()));
        assert_eq!(row.field("missing"), Value::Null);
    }
}
