use serde::Deserialize;

use crate::core::error::FormError;
use crate::core::renderer::{Fragment, InputProps, TypedInput};
use crate::inputs::templates::{base_context, render_builtin};

/// Single-line text input
pub struct TextInput;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub placeholder: Option<String>,
}

impl TypedInput for TextInput {
    type Config = TextConfig;

    fn render(&self, props: &InputProps, config: &TextConfig) -> Result<Fragment, FormError> {
        let mut context = base_context(props);
        context.insert("placeholder", config.placeholder.as_deref().unwrap_or(""));
        render_builtin("text.tera", &context, props)
    }
}
