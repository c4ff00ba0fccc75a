//! The `name` and `age` inputs used by `formkit demo`
//!
//! Both render an HTML-like `<input>` line carrying every merged property,
//! followed by a `<p>` line with the field error when there is one.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::error::FormError;
use crate::core::error_view::ErrorMessage;
use crate::core::field::FormField;
use crate::core::registry::form_input;
use crate::core::renderer::{Fragment, InputProps, Typed, TypedInput};

#[derive(Debug, Deserialize)]
pub struct NameProps {
    pub seila: String,
    pub aaa: i64,
}

#[derive(Debug, Deserialize)]
pub struct AgeProps {
    pub livro: String,
}

pub struct NameInput;

pub struct AgeInput;

fn html_input(kind: &str, props: &InputProps) -> Fragment {
    let merged = props.merged();
    let mut attrs: Vec<(&String, &Value)> = merged.iter().collect();
    attrs.sort_by(|a, b| a.0.cmp(b.0));

    let mut line = format!("<input type=\"{kind}\"");
    for (key, value) in attrs {
        line.push_str(&format!(" {key}={value}"));
    }
    line.push('>');

    let mut fragment = Fragment::line(line);
    if let Some(error) = ErrorMessage::new(&props.name).render(&props.binding, |message| format!("<p>{message}</p>")) {
        fragment.push(error);
    }
    fragment
}

impl TypedInput for NameInput {
    type Config = NameProps;

    fn render(&self, props: &InputProps, _config: &NameProps) -> Result<Fragment, FormError> {
        Ok(html_input("text", props))
    }
}

impl TypedInput for AgeInput {
    type Config = AgeProps;

    fn render(&self, props: &InputProps, _config: &AgeProps) -> Result<Fragment, FormError> {
        Ok(html_input("number", props))
    }
}

/// Register `name` and `age` in the process-wide registry
pub fn register_demo_inputs() {
    form_input("name", Typed::new("name", NameInput));
    form_input("age", Typed::new("age", AgeInput));
}

pub fn demo_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "age": { "type": "number", "minimum": 1 }
        },
        "required": ["name", "age"]
    })
}

pub fn demo_fields() -> Vec<FormField> {
    vec![
        FormField::new("name", "name").prop("aaa", 1).prop("seila", ""),
        FormField::new("age", "age").prop("livro", "aaa"),
    ]
}
