//! Structural values compared by the diff engine.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Number, Value};

use flowhub_core::AppResult;

/// A recursive structured value.
///
/// `Date` is atomic: it is compared by instant and never recursed into.
/// `Opaque` stands for callables and other values with no data
/// representation; nested opaque values are dropped when flattening.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    List(Vec<AuditValue>),
    Map(Vec<(String, AuditValue)>),
    Opaque,
}

impl AuditValue {
    /// Build a map value from key/value pairs, keeping their order.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AuditValue)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Convert any serializable value. Timestamps serialize as strings and
    /// are therefore compared textually; use [`AuditValue::Date`] directly
    /// when instant comparison matters.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> AppResult<Self> {
        Ok(Self::from(serde_json::to_value(value)?))
    }

    /// Whether this value is recursed into when flattening.
    pub(crate) fn is_container(&self) -> bool {
        match self {
            Self::List(items) => !items.is_empty(),
            Self::Map(entries) => !entries.is_empty(),
            _ => false,
        }
    }

    /// Structural equality with numbers compared by value, so `1` and
    /// `1.0` are equal. Map entries are matched by key.
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => numbers_equal(a, b),
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equivalent(y))
            }
            (Self::Map(a), Self::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, x)| {
                        b.iter()
                            .find(|(other_key, _)| other_key == key)
                            .is_some_and(|(_, y)| x.equivalent(y))
                    })
            }
            _ => self == other,
        }
    }

    /// JSON form of the value. `None` for opaque values.
    pub fn to_json(&self) -> Option<Value> {
        let value = match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Date(d) => Value::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::List(items) => Value::Array(items.iter().filter_map(Self::to_json).collect()),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .filter_map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
                    .collect(),
            ),
            Self::Opaque => return None,
        };
        Some(value)
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    a.as_f64() == b.as_f64()
}

impl From<Value> for AuditValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<DateTime<Utc>> for AuditValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for AuditValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AuditValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AuditValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AuditValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_key_order() {
        let value = AuditValue::from(json!({ "z": 1, "a": [true, null] }));
        let AuditValue::Map(entries) = value else {
            panic!("expected a map");
        };
        assert_eq!(entries[0].0, "z");
        assert_eq!(
            entries[1].1,
            AuditValue::List(vec![AuditValue::Bool(true), AuditValue::Null])
        );
    }

    #[test]
    fn test_numbers_are_equivalent_by_value() {
        let int = AuditValue::from(json!({ "cpu": 1, "limits": [2, { "mem": 512 }] }));
        let float = AuditValue::from(json!({ "limits": [2.0, { "mem": 512.0 }], "cpu": 1.0 }));
        assert!(int.equivalent(&float));
        assert!(!AuditValue::from(json!(1)).equivalent(&AuditValue::from(json!(1.5))));
        assert!(!AuditValue::from(json!([1])).equivalent(&AuditValue::from(json!([1, 2]))));
        assert!(!AuditValue::from(json!({ "a": 1 })).equivalent(&AuditValue::from(json!({ "b": 1 }))));
    }

    #[test]
    fn test_to_json_drops_opaque_and_formats_dates() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let value = AuditValue::map([
            ("at", AuditValue::Date(at)),
            ("callback", AuditValue::Opaque),
        ]);
        assert_eq!(
            value.to_json().unwrap(),
            json!({ "at": "2024-03-01T12:00:00.000Z" })
        );
        assert_eq!(AuditValue::Opaque.to_json(), None);
    }
}
