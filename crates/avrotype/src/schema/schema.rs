//! Schema descriptors for record hydration.
//!
//! A `Schema` describes the shape a raw value must be converted into. The set
//! of variants is closed; conversion dispatches on it by exhaustive matching.

use avrotype_logical::LogicalType;
use serde_json::Value as JsonValue;

/// A named record type with declared, named, typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<Field>,
}

impl RecordSchema {
    /// Name-indexed lookup of the record's own declared fields. Reference
    /// resolution goes through this rather than through a nested descriptor.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single declared field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    /// Raw default value, converted like any raw input when the field is
    /// absent from the incoming mapping.
    pub default: Option<JsonValue>,
    pub doc: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            default: None,
            doc: None,
        }
    }

    pub fn with_default(mut self, default: JsonValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// Homogeneous sequence of `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Box<Schema>,
}

/// String-keyed mapping with homogeneous `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSchema {
    pub values: Box<Schema>,
}

/// Ordered union of variant schemas, resolved by trial in declared order.
/// The optional/nullable case is a union with a `Null` member.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    pub variants: Vec<Schema>,
}

impl UnionSchema {
    /// Whether any direct variant is a reference to the named record.
    pub fn contains_ref(&self, name: &str) -> bool {
        self.variants
            .iter()
            .any(|v| matches!(v, Schema::Ref(r) if r.name == name))
    }
}

/// A finite set of accepted exact values (an Avro enum's symbols). The set
/// documents what is allowed; conversion passes the raw value through.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralSchema {
    pub values: Vec<JsonValue>,
}

/// A named back-reference to an enclosing record, used by recursive schemas
/// that cannot declare a direct type cycle. Resolved lazily against the
/// record being converted.
#[derive(Debug, Clone, PartialEq)]
pub struct RefSchema {
    pub name: String,
}

/// The unified schema descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Accepts only null; the "absence" member of optional unions.
    Null,
    Boolean,
    Int,
    Float,
    Str,
    /// A primitive encoding refined by a logical-type tag.
    Logical(LogicalType),
    Record(RecordSchema),
    Array(ArraySchema),
    Map(MapSchema),
    Union(UnionSchema),
    Literal(LiteralSchema),
    Ref(RefSchema),
}

impl Schema {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "string",
            Self::Logical(_) => "logical",
            Self::Record(_) => "record",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Union(_) => "union",
            Self::Literal(_) => "literal",
            Self::Ref(_) => "ref",
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Boolean | Self::Int | Self::Float | Self::Str)
    }

    /// Whether a raw JSON value already has the declared shape, making
    /// conversion an identity pass-through.
    ///
    /// Only primitives can test positive: the converted representation of
    /// every composite and logical variant differs from raw JSON, so their
    /// applicability test is defined as false.
    pub fn is_already(&self, raw: &JsonValue) -> bool {
        match self {
            Self::Null => raw.is_null(),
            Self::Boolean => raw.is_boolean(),
            Self::Int => raw.is_i64() || raw.is_u64(),
            Self::Float => raw.is_f64(),
            Self::Str => raw.is_string(),
            _ => false,
        }
    }

    /// Human-readable label used in conversion errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Record(r) => format!("record `{}`", r.name),
            Self::Ref(r) => format!("ref `{}`", r.name),
            Self::Logical(lt) => format!("logical `{}`", lt.tag()),
            other => other.kind().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> RecordSchema {
        RecordSchema {
            name: "User".into(),
            fields: vec![
                Field::new("id", Schema::Int),
                Field::new("name", Schema::Str),
            ],
        }
    }

    #[test]
    fn field_lookup_by_name() {
        let r = user();
        assert_eq!(r.field("id").map(|f| &f.schema), Some(&Schema::Int));
        assert!(r.field("age").is_none());
    }

    #[test]
    fn is_already_matches_primitive_runtime_types() {
        assert!(Schema::Int.is_already(&json!(5)));
        assert!(Schema::Str.is_already(&json!("5")));
        assert!(Schema::Boolean.is_already(&json!(true)));
        assert!(Schema::Float.is_already(&json!(5.5)));
        assert!(!Schema::Int.is_already(&json!("5")));
        assert!(!Schema::Float.is_already(&json!(5)));
    }

    #[test]
    fn is_already_false_for_composites() {
        let rec = Schema::Record(user());
        assert!(!rec.is_already(&json!({"id": 1, "name": "a"})));
        let arr = Schema::Array(ArraySchema {
            items: Box::new(Schema::Int),
        });
        assert!(!arr.is_already(&json!([1, 2])));
        assert!(!Schema::Logical(LogicalType::Date).is_already(&json!("2024-03-01")));
    }

    #[test]
    fn union_contains_ref_checks_direct_variants_only() {
        let u = UnionSchema {
            variants: vec![
                Schema::Null,
                Schema::Ref(RefSchema {
                    name: "Node".into(),
                }),
            ],
        };
        assert!(u.contains_ref("Node"));
        assert!(!u.contains_ref("Leaf"));
    }

    #[test]
    fn describe_names_records_and_tags() {
        assert_eq!(Schema::Record(user()).describe(), "record `User`");
        assert_eq!(
            Schema::Logical(LogicalType::TimestampMillis).describe(),
            "logical `timestamp-millis`"
        );
        assert_eq!(Schema::Int.describe(), "int");
    }
}
