//! Avro JSON schema declarations.

pub mod parse;

pub use parse::{parse_record, parse_schema, SchemaError};
