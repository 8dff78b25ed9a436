//! Typed values produced by conversion.

use avrotype_logical::LogicalValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

/// A hydrated record instance. Fields appear in declared schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub name: String,
    pub fields: Vec<(String, Value)>,
}

impl RecordValue {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(k, v)| (k == name).then_some(v))
    }
}

/// A converted value: a primitive passed through, a rich logical-type value,
/// or a recursively converted container.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
    LocalTimestamp(NaiveDateTime),
    Decimal(Decimal),
    Array(Vec<Value>),
    Map(Vec<(String, Value)>),
    Record(RecordValue),
}

impl Value {
    /// Structurally wrap a raw JSON value without consulting any schema.
    /// This is the identity pass-through used for already-typed, empty, and
    /// primitive raw values.
    pub fn from_json(raw: &JsonValue) -> Value {
        match raw {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            JsonValue::String(s) => Value::Str(s.clone()),
            JsonValue::Array(items) => Value::Array(items.iter().map(Value::from_json).collect()),
            JsonValue::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<LogicalValue> for Value {
    fn from(v: LogicalValue) -> Self {
        match v {
            LogicalValue::Date(d) => Value::Date(d),
            LogicalValue::Time(t) => Value::Time(t),
            LogicalValue::Timestamp(ts) => Value::Timestamp(ts),
            LogicalValue::LocalTimestamp(ts) => Value::LocalTimestamp(ts),
            LogicalValue::Decimal(d) => Value::Decimal(d),
        }
    }
}
