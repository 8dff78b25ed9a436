//! Schema descriptor module.

pub mod builder;
pub mod schema;
pub mod validate;
pub mod walker;

pub use builder::SchemaBuilder;
pub use schema::*;
pub use validate::validate_schema;
pub use walker::Walker;
