//! Typed field access shared by the list-query pipeline and the data table.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A single field value read from a record by name.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    Time(DateTime<Utc>),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Time(_) => 3,
            FieldValue::Text(_) => 4,
        }
    }

    /// Total ordering between two values.
    ///
    /// Values of the same kind compare naturally; different kinds fall back
    /// to a fixed kind order so sorting never sees an inconsistent comparator.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Time(a), FieldValue::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Compare two optional field values; a missing value sorts first.
pub fn compare_fields(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Format a number without a trailing `.0` for whole values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", format_number(*n)),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Time(value)
    }
}

/// Named field access for a record.
pub trait Record {
    /// Read a field by name; `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A record stored in its own table.
pub trait Entity: Record + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Table (collection) name.
    const TABLE: &'static str;
    /// Fields matched by free-text search when a caller gives none.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Unique key within the table.
    fn key(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_sort_first() {
        let a = FieldValue::from("Alder");
        assert_eq!(compare_fields(None, Some(&a)), Ordering::Less);
        assert_eq!(compare_fields(Some(&a), None), Ordering::Greater);
        assert_eq!(compare_fields(None, None), Ordering::Equal);
    }

    #[test]
    fn mixed_kinds_have_a_fixed_order() {
        let flag = FieldValue::from(true);
        let count = FieldValue::from(3u32);
        let name = FieldValue::from("Birch");
        assert_eq!(flag.compare(&count), Ordering::Less);
        assert_eq!(name.compare(&count), Ordering::Greater);
        assert_eq!(count.compare(&name), Ordering::Less);
        assert_eq!(FieldValue::from(2.5).compare(&FieldValue::from(10.0)), Ordering::Less);
    }

    #[test]
    fn whole_numbers_drop_the_fraction() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(16.5), "16.5");
        assert_eq!(FieldValue::from(1200u32).to_string(), "1200");
    }
}
