//! Type-directed hydration of parsed records into typed values.
//!
//! Given a record schema (built with [`SchemaBuilder`] or loaded from an Avro
//! JSON declaration with [`parse_record`]) and a plain parsed mapping, the
//! converter walks the raw data guided by the schema and produces a typed
//! [`RecordValue`]. Avro logical types (dates, times, timestamps, decimals)
//! come out as `chrono` and `rust_decimal` values.
//!
//! ```
//! use avrotype::{from_record, parse_record, Value};
//! use serde_json::json;
//!
//! let schema = parse_record(&json!({
//!     "type": "record", "name": "Event",
//!     "fields": [
//!         {"name": "id", "type": "long"},
//!         {"name": "at", "type": {"type": "long", "logicalType": "timestamp-millis"}}
//!     ]
//! }))
//! .unwrap();
//!
//! let raw = json!({"id": 7, "at": 0});
//! let event = from_record(&schema, raw.as_object().unwrap()).unwrap();
//! assert_eq!(event.get("id"), Some(&Value::Int(7)));
//! ```

pub mod avsc;
pub mod convert;
pub mod schema;
pub mod value;

pub use avsc::{parse_record, parse_schema, SchemaError};
pub use convert::{from_record, ConvertError};
pub use schema::{
    validate_schema, ArraySchema, Field, LiteralSchema, MapSchema, RecordSchema, RefSchema, Schema,
    SchemaBuilder, UnionSchema, Walker,
};
pub use value::{RecordValue, Value};

pub use avrotype_logical::{LogicalError, LogicalType, LogicalValue};
