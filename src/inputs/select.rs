use dialoguer::theme::Theme;
use dialoguer::Select;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::FormError;
use crate::core::renderer::{display_value, Fragment, InputProps, TypedInput};
use crate::inputs::templates::{base_context, render_builtin};

/// Pick one value from a fixed list
pub struct SelectInput;

#[derive(Debug, Deserialize)]
pub struct SelectConfig {
    pub options: Vec<SelectOption>,
}

/// An option given either as a bare value or as `{ value, label }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    Labeled { value: Value, label: String },
    Plain(Value),
}

impl SelectOption {
    pub fn value(&self) -> &Value {
        match self {
            SelectOption::Labeled { value, .. } => value,
            SelectOption::Plain(value) => value,
        }
    }

    pub fn label(&self) -> String {
        match self {
            SelectOption::Labeled { label, .. } => label.clone(),
            SelectOption::Plain(value) => display_value(value),
        }
    }
}

#[derive(Serialize)]
struct OptionView {
    label: String,
    selected: bool,
}

impl SelectConfig {
    fn selected_index(&self, current: &Value) -> Option<usize> {
        self.options.iter().position(|o| o.value() == current)
    }
}

impl TypedInput for SelectInput {
    type Config = SelectConfig;

    fn render(&self, props: &InputProps, config: &SelectConfig) -> Result<Fragment, FormError> {
        let options: Vec<OptionView> = config
            .options
            .iter()
            .map(|o| OptionView {
                label: o.label(),
                selected: o.value() == props.value(),
            })
            .collect();

        let mut context = base_context(props);
        context.insert("options", &options);
        render_builtin("select.tera", &context, props)
    }

    fn prompt(
        &self,
        props: &InputProps,
        config: &SelectConfig,
        theme: &dyn Theme,
    ) -> Result<Option<Value>, FormError> {
        if config.options.is_empty() {
            return Ok(None);
        }

        let labels: Vec<String> = config.options.iter().map(SelectOption::label).collect();
        let default_idx = config.selected_index(props.value()).unwrap_or(0);

        let selection = Select::with_theme(theme)
            .with_prompt(props.label())
            .items(&labels)
            .default(default_idx)
            .interact()?;

        Ok(Some(config.options[selection].value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::FieldBinding;
    use crate::core::renderer::InputRenderer;
    use crate::core::Typed;
    use serde_json::json;

    fn props(value: Value, config: Value) -> InputProps {
        let binding = FieldBinding::detached("role", value);
        InputProps::new(binding, config.as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn test_marks_selected_option() {
        let config = json!({"options": ["admin", {"value": "user", "label": "Regular user"}]});
        let fragment = Typed::new("select", SelectInput)
            .render(&props(json!("user"), config))
            .unwrap();
        assert_eq!(fragment.to_string(), "Role:\n  ( ) admin\n  (*) Regular user");
    }

    #[test]
    fn test_options_are_required() {
        let err = Typed::new("select", SelectInput)
            .render(&props(json!(null), json!({})))
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidConfig { .. }));
    }

    #[test]
    fn test_non_string_options() {
        let config: SelectConfig = serde_json::from_value(json!({"options": [1, 2]})).unwrap();
        assert_eq!(config.options[1].label(), "2");
        assert_eq!(config.selected_index(&json!(2)), Some(1));
    }
}
