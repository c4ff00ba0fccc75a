use dialoguer::theme::Theme;
use dialoguer::Input;
use serde::Deserialize;
use serde_json::Value;

use crate::core::error::FormError;
use crate::core::renderer::{display_value, Fragment, InputProps, TypedInput};
use crate::inputs::templates::{base_context, render_builtin};

/// Numeric input; integers stay integers, anything else becomes a float
pub struct NumberInput;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NumberConfig {
    pub unit: Option<String>,
}

/// Parse user input into a JSON number
pub fn parse_number(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    s.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

impl TypedInput for NumberInput {
    type Config = NumberConfig;

    fn render(&self, props: &InputProps, config: &NumberConfig) -> Result<Fragment, FormError> {
        let mut context = base_context(props);
        context.insert("unit", config.unit.as_deref().unwrap_or(""));
        render_builtin("number.tera", &context, props)
    }

    fn prompt(
        &self,
        props: &InputProps,
        _config: &NumberConfig,
        theme: &dyn Theme,
    ) -> Result<Option<Value>, FormError> {
        let current = display_value(props.value());
        let mut input = Input::<String>::with_theme(theme)
            .with_prompt(props.label())
            .allow_empty(true)
            .validate_with(|s: &String| -> Result<(), String> {
                if s.trim().is_empty() || parse_number(s).is_some() {
                    Ok(())
                } else {
                    Err("Enter a number".to_string())
                }
            });
        if !current.is_empty() {
            input = input.with_initial_text(current);
        }

        let text = input.interact_text()?;
        Ok(parse_number(&text))
    }
}
