//! formkit: typed input registry and field resolver
//!
//! Register named input renderers, resolve them by field-type tag, and bind
//! them to form state validated by rules or a JSON Schema.

pub mod cli;
pub mod core;
pub mod inputs;
pub mod schema;
