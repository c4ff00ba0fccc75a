//! Field resolver: tag lookup, binding and delegation to the renderer

use dialoguer::theme::Theme;
use serde_json::{Map, Value};

use crate::core::error::FormError;
use crate::core::form::FormState;
use crate::core::identity::{FieldPath, FieldTag};
use crate::core::registry::{InputHandle, InputRegistry};
use crate::core::renderer::{Fragment, InputProps};
use crate::core::rules::Rules;

/// One form field: which input renders it, where its value lives, and the
/// input-specific properties
#[derive(Debug, Clone)]
pub struct FormField {
    tag: FieldTag,
    name: FieldPath,
    rules: Option<Rules>,
    props: Map<String, Value>,
}

impl FormField {
    pub fn new(tag: impl Into<FieldTag>, name: impl Into<FieldPath>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            rules: None,
            props: Map::new(),
        }
    }

    pub fn rules(mut self, rules: Rules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn props(mut self, props: Map<String, Value>) -> Self {
        self.props.extend(props);
        self
    }

    pub fn tag(&self) -> &FieldTag {
        &self.tag
    }

    pub fn name(&self) -> &FieldPath {
        &self.name
    }

    pub fn field_rules(&self) -> Option<&Rules> {
        self.rules.as_ref()
    }

    fn resolve(&self, registry: &InputRegistry) -> Result<InputHandle, FormError> {
        registry.lookup(self.tag.as_str()).ok_or_else(|| {
            tracing::debug!(tag = %self.tag, field = %self.name, "no input registered");
            FormError::UnregisteredTag {
                tag: self.tag.clone(),
            }
        })
    }

    /// Bind this field to the form and build the renderer's props
    pub fn bind<S: FormState + ?Sized>(&self, form: &S) -> InputProps {
        let binding = form.bind(&self.name, self.rules.as_ref());
        InputProps::new(binding, self.props.clone())
    }

    /// Render the field with the renderer registered for its tag
    ///
    /// Fails with [`FormError::UnregisteredTag`] when the tag has no
    /// renderer; the form is not touched in that case.
    pub fn render<S: FormState + ?Sized>(
        &self,
        registry: &InputRegistry,
        form: &S,
    ) -> Result<Fragment, FormError> {
        let input = self.resolve(registry)?;
        let props = self.bind(form);
        tracing::debug!(tag = %self.tag, field = %self.name, "rendering field");
        input.render(&props)
    }

    /// Prompt for this field's value and feed it to the form's change
    /// handler
    pub fn prompt<S: FormState + ?Sized>(
        &self,
        registry: &InputRegistry,
        form: &S,
        theme: &dyn Theme,
    ) -> Result<(), FormError> {
        let input = self.resolve(registry)?;
        let props = self.bind(form);
        if let Some(value) = input.prompt(&props, theme)? {
            props.binding.on_change(value)?;
        }
        props.binding.on_blur();
        Ok(())
    }
}
