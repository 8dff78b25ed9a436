//! Schema builder.
//!
//! Provides a fluent API for constructing schema values.

use avrotype_logical::LogicalType;
use serde_json::Value as JsonValue;

use super::schema::*;

/// Builder for constructing schema values.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    // ------------------------------------------------------------------
    // Primitives

    pub fn null(&self) -> Schema {
        Schema::Null
    }

    pub fn bool(&self) -> Schema {
        Schema::Boolean
    }

    pub fn int(&self) -> Schema {
        Schema::Int
    }

    pub fn float(&self) -> Schema {
        Schema::Float
    }

    pub fn str(&self) -> Schema {
        Schema::Str
    }

    // ------------------------------------------------------------------
    // Logical types

    pub fn logical(&self, logical: LogicalType) -> Schema {
        Schema::Logical(logical)
    }

    pub fn date(&self) -> Schema {
        Schema::Logical(LogicalType::Date)
    }

    pub fn decimal(&self) -> Schema {
        Schema::Logical(LogicalType::Decimal)
    }

    pub fn timestamp_millis(&self) -> Schema {
        Schema::Logical(LogicalType::TimestampMillis)
    }

    // ------------------------------------------------------------------
    // Composites

    pub fn record(&self, name: impl Into<String>, fields: Vec<Field>) -> Schema {
        Schema::Record(RecordSchema {
            name: name.into(),
            fields,
        })
    }

    pub fn field(&self, name: impl Into<String>, schema: Schema) -> Field {
        Field::new(name, schema)
    }

    pub fn array(&self, items: Schema) -> Schema {
        Schema::Array(ArraySchema {
            items: Box::new(items),
        })
    }

    pub fn map(&self, values: Schema) -> Schema {
        Schema::Map(MapSchema {
            values: Box::new(values),
        })
    }

    pub fn union(&self, variants: Vec<Schema>) -> Schema {
        Schema::Union(UnionSchema { variants })
    }

    /// Optional `inner`: a union whose first variant accepts absence.
    pub fn nullable(&self, inner: Schema) -> Schema {
        self.union(vec![Schema::Null, inner])
    }

    pub fn literal(&self, values: Vec<JsonValue>) -> Schema {
        Schema::Literal(LiteralSchema { values })
    }

    pub fn reference(&self, name: impl Into<String>) -> Schema {
        Schema::Ref(RefSchema { name: name.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn b() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    #[test]
    fn builds_primitives() {
        assert_eq!(b().int(), Schema::Int);
        assert_eq!(b().str(), Schema::Str);
        assert_eq!(b().null(), Schema::Null);
    }

    #[test]
    fn builds_nested_record() {
        let s = b().record(
            "Order",
            vec![
                b().field("id", b().int()),
                b().field("lines", b().array(b().record(
                    "Line",
                    vec![b().field("sku", b().str())],
                ))),
            ],
        );
        let Schema::Record(r) = &s else {
            panic!("expected record");
        };
        assert_eq!(r.name, "Order");
        assert_eq!(r.fields.len(), 2);
    }

    #[test]
    fn nullable_puts_null_first() {
        let Schema::Union(u) = b().nullable(b().str()) else {
            panic!("expected union");
        };
        assert_eq!(u.variants, vec![Schema::Null, Schema::Str]);
    }

    #[test]
    fn literal_keeps_values() {
        let Schema::Literal(l) = b().literal(vec![json!("A"), json!("B")]) else {
            panic!("expected literal");
        };
        assert_eq!(l.values.len(), 2);
    }
}
