//! Built-in inputs

pub mod checkbox;
pub mod demo;
pub mod number;
pub mod select;
pub mod template;
pub(crate) mod templates;
pub mod text;

use std::sync::Arc;

use crate::core::registry::InputRegistry;
use crate::core::renderer::Typed;

pub use checkbox::CheckboxInput;
pub use demo::{demo_fields, demo_schema, register_demo_inputs, AgeInput, NameInput};
pub use number::NumberInput;
pub use select::{SelectInput, SelectOption};
pub use template::TemplateInput;
pub use text::TextInput;

/// Tags of the inputs added by [`register_builtins`]
pub const BUILTIN_TAGS: &[&str] = &["checkbox", "number", "select", "text"];

/// Add `text`, `number`, `select` and `checkbox` to `registry`
pub fn register_builtins(registry: &mut InputRegistry) {
    registry.register("text", Arc::new(Typed::new("text", TextInput)));
    registry.register("number", Arc::new(Typed::new("number", NumberInput)));
    registry.register("select", Arc::new(Typed::new("select", SelectInput)));
    registry.register("checkbox", Arc::new(Typed::new("checkbox", CheckboxInput)));
}
