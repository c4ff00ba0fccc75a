//! Schema system - JSON Schema validation and form definitions

pub mod definition;
pub mod resolver;

pub use definition::{fields_from_schema, FieldDefinition, FormDefinition};
pub use resolver::{rules_from_schema, SchemaResolver};
