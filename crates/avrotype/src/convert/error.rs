//! Conversion error type.

use avrotype_logical::LogicalError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// No conversion rule applies to the raw value under the declared schema.
    #[error("cannot convert `{value}` to {schema}")]
    Mismatch { schema: String, value: String },
    /// A logical-type parser rejected its input.
    #[error(transparent)]
    Logical(#[from] LogicalError),
    /// The raw mapping carries a key the record does not declare.
    #[error("record `{record}` has no field `{field}`")]
    UnknownField { record: String, field: String },
    /// A declared field without a default is absent from the raw mapping.
    #[error("record `{record}` is missing field `{field}`")]
    MissingField { record: String, field: String },
    /// A reference does not name the record being converted.
    #[error("unresolved reference `{name}`")]
    UnknownRef { name: String },
}
