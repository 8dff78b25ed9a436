//! Schema tree walker.

use super::schema::Schema;

/// Walks every node in a schema tree, calling the visitor for each node.
pub struct Walker;

impl Walker {
    /// Walk the entire schema tree rooted at `schema`, calling `on_type` for
    /// every node. References are not followed; they are visited as nodes.
    pub fn walk(schema: &Schema, on_type: &mut dyn FnMut(&Schema)) {
        let mut w = Walker;
        w.walk_node(schema, on_type);
    }

    fn walk_node(&mut self, schema: &Schema, on_type: &mut dyn FnMut(&Schema)) {
        match schema {
            Schema::Null
            | Schema::Boolean
            | Schema::Int
            | Schema::Float
            | Schema::Str
            | Schema::Logical(_)
            | Schema::Literal(_)
            | Schema::Ref(_) => {
                on_type(schema);
            }
            Schema::Record(s) => {
                on_type(schema);
                for field in &s.fields {
                    self.walk_node(&field.schema, on_type);
                }
            }
            Schema::Array(s) => {
                on_type(schema);
                self.walk_node(&s.items, on_type);
            }
            Schema::Map(s) => {
                on_type(schema);
                self.walk_node(&s.values, on_type);
            }
            Schema::Union(s) => {
                on_type(schema);
                for variant in &s.variants {
                    self.walk_node(variant, on_type);
                }
            }
        }
    }
}
