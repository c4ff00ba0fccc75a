//! Inputs defined by a user-supplied Tera template

use tera::Tera;

use crate::core::error::FormError;
use crate::core::identity::FieldTag;
use crate::core::renderer::{Fragment, InputProps, InputRenderer};
use crate::inputs::templates::{base_context, with_error_line};

/// Renders a field through its own Tera template
///
/// The template sees the same variables as the built-in inputs (`name`,
/// `label`, `value`, `raw`, `error`, `config`, ...).
pub struct TemplateInput {
    tag: FieldTag,
    tera: Tera,
}

impl TemplateInput {
    /// Compile `template`; syntax errors are reported immediately
    pub fn new(tag: impl Into<FieldTag>, template: &str) -> Result<Self, FormError> {
        let tag = tag.into();
        let mut tera = Tera::default();
        tera.add_raw_template(tag.as_str(), template)
            .map_err(|e| FormError::Template(format!("input '{}': {}", tag, e)))?;
        Ok(Self { tag, tera })
    }

    pub fn tag(&self) -> &FieldTag {
        &self.tag
    }
}

impl InputRenderer for TemplateInput {
    fn render(&self, props: &InputProps) -> Result<Fragment, FormError> {
        let context = base_context(props);
        let text = self.tera.render(self.tag.as_str(), &context)?;
        Ok(with_error_line(&text, props))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::FieldBinding;
    use serde_json::json;

    #[test]
    fn test_renders_template_variables() {
        let input = TemplateInput::new("email", "{{ label }} <{{ value }}>").unwrap();
        let props = InputProps::new(
            FieldBinding::detached("email", json!("ana@example.com")),
            Default::default(),
        );
        assert_eq!(input.render(&props).unwrap().to_string(), "Email <ana@example.com>");
    }

    #[test]
    fn test_config_is_exposed() {
        let input = TemplateInput::new("badge", "[{{ config.icon }} {{ value }}]").unwrap();
        let props = InputProps::new(
            FieldBinding::detached("nick", json!("ana")),
            json!({"icon": "*"}).as_object().cloned().unwrap(),
        );
        assert_eq!(input.render(&props).unwrap().to_string(), "[* ana]");
    }

    #[test]
    fn test_bad_template_is_rejected() {
        let err = TemplateInput::new("broken", "{{ value").err().unwrap();
        assert!(matches!(err, FormError::Template(ref m) if m.contains("broken")));
    }
}
