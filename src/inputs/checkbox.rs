use dialoguer::theme::Theme;
use dialoguer::Confirm;
use serde::Deserialize;
use serde_json::Value;

use crate::core::error::FormError;
use crate::core::renderer::{Fragment, InputProps, TypedInput};
use crate::inputs::templates::{base_context, render_builtin};

/// Yes/no input bound to a boolean value
pub struct CheckboxInput;

/// Checkbox takes no configuration beyond the common keys
#[derive(Debug, Default, Deserialize)]
pub struct CheckboxConfig {}

fn is_checked(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.as_str(), "true" | "yes" | "on"),
        _ => false,
    }
}

impl TypedInput for CheckboxInput {
    type Config = CheckboxConfig;

    fn render(&self, props: &InputProps, _config: &CheckboxConfig) -> Result<Fragment, FormError> {
        let mut context = base_context(props);
        context.insert("checked", &is_checked(props.value()));
        render_builtin("checkbox.tera", &context, props)
    }

    fn prompt(
        &self,
        props: &InputProps,
        _config: &CheckboxConfig,
        theme: &dyn Theme,
    ) -> Result<Option<Value>, FormError> {
        let answer = Confirm::with_theme(theme)
            .with_prompt(props.label())
            .default(is_checked(props.value()))
            .interact()?;
        Ok(Some(Value::Bool(answer)))
    }
}
