//! Type-directed conversion of raw mappings into typed record values.
//!
//! [`from_record`] walks a raw `serde_json` mapping guided by a
//! [`RecordSchema`], converting each present field per its declared schema:
//! primitives pass through, logical types parse into rich values, records and
//! containers recurse, unions resolve by trial in declared order, and
//! references resolve by name against the record being converted.

pub mod error;

pub use error::ConvertError;

use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{debug, trace};

use crate::schema::schema::{RecordSchema, Schema};
use crate::value::{RecordValue, Value};

/// Convert a raw field mapping into an instance of `schema`.
///
/// Every key present in `raw` must name a declared field. A declared field
/// absent from `raw` takes its declared default, or fails when it has none.
pub fn from_record(
    schema: &RecordSchema,
    raw: &JsonMap<String, JsonValue>,
) -> Result<RecordValue, ConvertError> {
    Converter { record: schema }.convert(raw)
}

/// One level of record conversion. `record` is the enclosing context that
/// references resolve against; nested record fields get their own converter.
struct Converter<'a> {
    record: &'a RecordSchema,
}

impl<'a> Converter<'a> {
    fn convert(&self, raw: &JsonMap<String, JsonValue>) -> Result<RecordValue, ConvertError> {
        trace!(record = %self.record.name, keys = raw.len(), "converting record");
        for key in raw.keys() {
            if self.record.field(key).is_none() {
                return Err(ConvertError::UnknownField {
                    record: self.record.name.clone(),
                    field: key.clone(),
                });
            }
        }
        let mut fields = Vec::with_capacity(self.record.fields.len());
        for field in &self.record.fields {
            let value = match raw.get(&field.name) {
                Some(v) => self.handle(&field.schema, v)?,
                None => match &field.default {
                    Some(d) => self.handle(&field.schema, d)?,
                    None => {
                        return Err(ConvertError::MissingField {
                            record: self.record.name.clone(),
                            field: field.name.clone(),
                        })
                    }
                },
            };
            fields.push((field.name.clone(), value));
        }
        Ok(RecordValue {
            name: self.record.name.clone(),
            fields,
        })
    }

    /// Convert one raw value per its declared schema.
    ///
    /// Short-circuits run first, in order: null passes through regardless of
    /// schema; a raw value that already has the declared primitive shape
    /// passes through; an empty string, array, or object passes through
    /// without recursion. Everything else dispatches on the schema variant.
    fn handle(&self, schema: &Schema, raw: &JsonValue) -> Result<Value, ConvertError> {
        if raw.is_null() {
            return Ok(Value::Null);
        }
        if schema.is_already(raw) {
            return Ok(Value::from_json(raw));
        }
        if is_empty(raw) {
            return Ok(Value::from_json(raw));
        }
        match schema {
            Schema::Null => Err(self.mismatch(schema, raw)),
            Schema::Boolean | Schema::Int | Schema::Float | Schema::Str => match raw {
                // Scalars pass through without coercion; a container never
                // satisfies a primitive.
                JsonValue::Array(_) | JsonValue::Object(_) => Err(self.mismatch(schema, raw)),
                _ => Ok(Value::from_json(raw)),
            },
            Schema::Logical(lt) => Ok(lt.parse(raw)?.into()),
            Schema::Record(nested) => {
                let entries = self.expect_object(schema, raw)?;
                Converter { record: nested }.convert(entries).map(Value::Record)
            }
            Schema::Literal(_) => Ok(Value::from_json(raw)),
            Schema::Array(a) => {
                let items = match raw {
                    JsonValue::Array(items) => items,
                    _ => return Err(self.mismatch(schema, raw)),
                };
                items
                    .iter()
                    .map(|item| self.handle(&a.items, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            Schema::Map(m) => {
                let entries = self.expect_object(schema, raw)?;
                if let Schema::Ref(r) = &*m.values {
                    // A self-referential mapping: the raw mapping itself is
                    // one field set of the record being converted.
                    if r.name != self.record.name {
                        return Err(ConvertError::UnknownRef {
                            name: r.name.clone(),
                        });
                    }
                    return self.convert(entries).map(Value::Record);
                }
                entries
                    .iter()
                    .map(|(k, v)| self.handle(&m.values, v).map(|v| (k.clone(), v)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Map)
            }
            Schema::Union(u) => {
                for variant in &u.variants {
                    if let Ok(value) = self.handle(variant, raw) {
                        return Ok(value);
                    }
                }
                debug!(record = %self.record.name, "no union variant matched");
                Err(self.mismatch(schema, raw))
            }
            Schema::Ref(r) => {
                if r.name != self.record.name {
                    return Err(ConvertError::UnknownRef {
                        name: r.name.clone(),
                    });
                }
                let entries = self.expect_object(schema, raw)?;
                self.convert(entries).map(Value::Record)
            }
        }
    }

    fn expect_object<'r>(
        &self,
        schema: &Schema,
        raw: &'r JsonValue,
    ) -> Result<&'r JsonMap<String, JsonValue>, ConvertError> {
        raw.as_object().ok_or_else(|| self.mismatch(schema, raw))
    }

    fn mismatch(&self, schema: &Schema, raw: &JsonValue) -> ConvertError {
        ConvertError::Mismatch {
            schema: schema.describe(),
            value: raw.to_string(),
        }
    }
}

/// Structure-less emptiness: converting an empty string, sequence, or mapping
/// is a no-op regardless of the declared nested shape. Numbers and booleans
/// are never empty; `0` and `false` convert normally.
fn is_empty(raw: &JsonValue) -> bool {
    match raw {
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(entries) => entries.is_empty(),
        _ => false,
    }
}
