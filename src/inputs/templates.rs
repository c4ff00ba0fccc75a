//! Embedded Tera templates for the built-in inputs

use once_cell::sync::Lazy;
use rust_embed::Embed;
use serde_json::Value;
use tera::{Context, Tera};

use crate::core::error::FormError;
use crate::core::error_view::ErrorMessage;
use crate::core::renderer::{display_value, Fragment, InputProps};

#[derive(Embed)]
#[folder = "templates/inputs/"]
struct EmbeddedTemplates;

static TEMPLATES: Lazy<Tera> = Lazy::new(load_embedded);

fn load_embedded() -> Tera {
    let mut tera = Tera::default();

    for file in EmbeddedTemplates::iter() {
        let filename = file.as_ref();
        let Some(content) = EmbeddedTemplates::get(filename) else {
            continue;
        };
        match std::str::from_utf8(&content.data) {
            Ok(template_str) => {
                if let Err(e) = tera.add_raw_template(filename, template_str) {
                    tracing::error!(template = filename, error = %e, "failed to load input template");
                }
            }
            Err(e) => {
                tracing::error!(template = filename, error = %e, "input template is not UTF-8");
            }
        }
    }

    tera
}

/// Variables every input template can use
pub(crate) fn base_context(props: &InputProps) -> Context {
    let mut context = Context::new();
    context.insert("name", props.name.as_str());
    context.insert("label", &props.label());
    context.insert("value", &display_value(props.value()));
    context.insert("raw", props.value());
    context.insert(
        "required",
        &props.config.get("required").and_then(Value::as_bool).unwrap_or(false),
    );
    context.insert("placeholder", props.config_str("placeholder").unwrap_or(""));
    context.insert("description", props.config_str("description").unwrap_or(""));
    context.insert(
        "error",
        &props.error().map(|e| e.message.clone()).unwrap_or_default(),
    );
    context.insert("touched", &props.binding.touched);
    context.insert("dirty", &props.binding.dirty);
    context.insert("config", &props.config);
    context
}

/// Render text produced by a template, followed by the field's error line
pub(crate) fn with_error_line(text: &str, props: &InputProps) -> Fragment {
    let mut fragment = Fragment::from_text(text);
    fragment.append(ErrorMessage::new(&props.name).line(&props.binding));
    fragment
}

/// Render one of the embedded templates (`text.tera`, `select.tera`, ...)
pub(crate) fn render_builtin(template: &str, context: &Context, props: &InputProps) -> Result<Fragment, FormError> {
    let text = TEMPLATES.render(template, context)?;
    Ok(with_error_line(&text, props))
}
