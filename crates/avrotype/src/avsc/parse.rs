//! Parses Avro JSON schema declarations into schema descriptors.
//!
//! Covers the declaration forms a schema document uses: primitive name
//! strings, `record`/`enum`/`array`/`map`/`fixed` objects, JSON arrays as
//! unions, `logicalType` attributes, and bare names referencing an already
//! declared record (recursive schemas).

use avrotype_logical::LogicalType;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::debug;

use crate::schema::schema::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("missing `{attr}` in {within} declaration")]
    Missing {
        attr: &'static str,
        within: &'static str,
    },
    #[error("invalid {what}: {found}")]
    Invalid { what: &'static str, found: String },
}

/// Parse any schema declaration.
pub fn parse_schema(decl: &JsonValue) -> Result<Schema, SchemaError> {
    parse(decl, &mut Vec::new())
}

/// Parse a declaration that must be a record.
pub fn parse_record(decl: &JsonValue) -> Result<RecordSchema, SchemaError> {
    match parse_schema(decl)? {
        Schema::Record(r) => Ok(r),
        other => Err(SchemaError::Invalid {
            what: "record declaration",
            found: other.kind().to_string(),
        }),
    }
}

/// `names` tracks record names declared so far; a record's own name is pushed
/// before its fields parse, so self-references resolve.
fn parse(decl: &JsonValue, names: &mut Vec<String>) -> Result<Schema, SchemaError> {
    match decl {
        JsonValue::String(name) => named(name, names),
        JsonValue::Array(variants) => {
            let variants = variants
                .iter()
                .map(|v| parse(v, names))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Schema::Union(UnionSchema { variants }))
        }
        JsonValue::Object(attrs) => {
            if let Some(tag) = attrs.get("logicalType").and_then(JsonValue::as_str) {
                if let Some(lt) = LogicalType::from_tag(tag) {
                    return Ok(Schema::Logical(lt));
                }
                debug!(tag, "unrecognized logicalType, using the underlying type");
            }
            let ty = attrs.get("type").ok_or(SchemaError::Missing {
                attr: "type",
                within: "schema",
            })?;
            match ty.as_str() {
                Some("record") => parse_record_decl(attrs, names),
                Some("enum") => parse_enum_decl(attrs),
                Some("array") => {
                    let items = attrs.get("items").ok_or(SchemaError::Missing {
                        attr: "items",
                        within: "array",
                    })?;
                    Ok(Schema::Array(ArraySchema {
                        items: Box::new(parse(items, names)?),
                    }))
                }
                Some("map") => {
                    let values = attrs.get("values").ok_or(SchemaError::Missing {
                        attr: "values",
                        within: "map",
                    })?;
                    Ok(Schema::Map(MapSchema {
                        values: Box::new(parse(values, names)?),
                    }))
                }
                // Fixed is an opaque byte string at this level.
                Some("fixed") => Ok(Schema::Str),
                // Primitive name, or an inline nested declaration.
                _ => parse(ty, names),
            }
        }
        other => Err(SchemaError::Invalid {
            what: "schema declaration",
            found: other.to_string(),
        }),
    }
}

fn named(name: &str, names: &mut Vec<String>) -> Result<Schema, SchemaError> {
    match name {
        "null" => Ok(Schema::Null),
        "boolean" => Ok(Schema::Boolean),
        "int" | "long" => Ok(Schema::Int),
        "float" | "double" => Ok(Schema::Float),
        "string" | "bytes" => Ok(Schema::Str),
        other => {
            if names.iter().any(|n| n.as_str() == other) {
                Ok(Schema::Ref(RefSchema {
                    name: other.to_string(),
                }))
            } else {
                Err(SchemaError::UnknownType(other.to_string()))
            }
        }
    }
}

fn parse_record_decl(
    attrs: &serde_json::Map<String, JsonValue>,
    names: &mut Vec<String>,
) -> Result<Schema, SchemaError> {
    let name = attrs
        .get("name")
        .and_then(JsonValue::as_str)
        .ok_or(SchemaError::Missing {
            attr: "name",
            within: "record",
        })?;
    names.push(name.to_string());
    let declared = attrs
        .get("fields")
        .and_then(JsonValue::as_array)
        .ok_or(SchemaError::Missing {
            attr: "fields",
            within: "record",
        })?;
    let mut fields = Vec::with_capacity(declared.len());
    for decl in declared {
        let field_attrs = decl.as_object().ok_or_else(|| SchemaError::Invalid {
            what: "record field",
            found: decl.to_string(),
        })?;
        let field_name = field_attrs
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or(SchemaError::Missing {
                attr: "name",
                within: "field",
            })?;
        let ty = field_attrs.get("type").ok_or(SchemaError::Missing {
            attr: "type",
            within: "field",
        })?;
        let mut field = Field::new(field_name, parse(ty, names)?);
        field.default = field_attrs.get("default").cloned();
        field.doc = field_attrs
            .get("doc")
            .and_then(JsonValue::as_str)
            .map(String::from);
        fields.push(field);
    }
    Ok(Schema::Record(RecordSchema {
        name: name.to_string(),
        fields,
    }))
}

fn parse_enum_decl(attrs: &serde_json::Map<String, JsonValue>) -> Result<Schema, SchemaError> {
    let symbols = attrs
        .get("symbols")
        .and_then(JsonValue::as_array)
        .ok_or(SchemaError::Missing {
            attr: "symbols",
            within: "enum",
        })?;
    for symbol in symbols {
        if !symbol.is_string() {
            return Err(SchemaError::Invalid {
                what: "enum symbol",
                found: symbol.to_string(),
            });
        }
    }
    Ok(Schema::Literal(LiteralSchema {
        values: symbols.clone(),
    }))
}
