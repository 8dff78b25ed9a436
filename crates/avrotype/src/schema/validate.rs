//! Schema integrity validator.

use std::collections::HashSet;

use super::schema::*;
use super::walker::Walker;

/// Validate a schema for structural integrity.
///
/// Returns `Ok(())` if the schema is valid, or `Err(code)` with a short
/// description code. Checked: record and field naming, union shape (non-empty,
/// no immediate nesting), non-empty literal sets, and that every reference
/// resolves to a record declared somewhere in the tree.
pub fn validate_schema(schema: &Schema) -> Result<(), String> {
    validate_node(schema)?;
    validate_refs(schema)
}

fn validate_node(schema: &Schema) -> Result<(), String> {
    match schema {
        Schema::Null
        | Schema::Boolean
        | Schema::Int
        | Schema::Float
        | Schema::Str
        | Schema::Logical(_) => Ok(()),
        Schema::Record(s) => validate_record(s),
        Schema::Array(s) => validate_node(&s.items),
        Schema::Map(s) => validate_node(&s.values),
        Schema::Union(s) => validate_union(s),
        Schema::Literal(s) => validate_literal(s),
        Schema::Ref(s) => validate_ref(s),
    }
}

fn validate_record(s: &RecordSchema) -> Result<(), String> {
    if s.name.is_empty() {
        return Err("NAME_EMPTY".into());
    }
    let mut seen = HashSet::new();
    for field in &s.fields {
        if field.name.is_empty() {
            return Err("FIELD_EMPTY".into());
        }
        if !seen.insert(field.name.as_str()) {
            return Err("FIELD_DUP".into());
        }
        validate_node(&field.schema)?;
    }
    Ok(())
}

fn validate_union(s: &UnionSchema) -> Result<(), String> {
    if s.variants.is_empty() {
        return Err("UNION_EMPTY".into());
    }
    for variant in &s.variants {
        // Avro forbids immediate union-in-union nesting.
        if matches!(variant, Schema::Union(_)) {
            return Err("UNION_NESTED".into());
        }
        validate_node(variant)?;
    }
    Ok(())
}

fn validate_literal(s: &LiteralSchema) -> Result<(), String> {
    if s.values.is_empty() {
        return Err("CON_EMPTY".into());
    }
    Ok(())
}

fn validate_ref(s: &RefSchema) -> Result<(), String> {
    if s.name.is_empty() {
        return Err("REF_EMPTY".into());
    }
    Ok(())
}

fn validate_refs(schema: &Schema) -> Result<(), String> {
    let mut names = HashSet::new();
    Walker::walk(schema, &mut |s| {
        if let Schema::Record(r) = s {
            names.insert(r.name.clone());
        }
    });
    let mut unresolved = false;
    Walker::walk(schema, &mut |s| {
        if let Schema::Ref(r) = s {
            if !names.contains(&r.name) {
                unresolved = true;
            }
        }
    });
    if unresolved {
        return Err("REF_UNRESOLVED".into());
    }
    Ok(())
}
