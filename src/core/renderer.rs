//! Renderer handles and the props they receive

use dialoguer::theme::Theme;
use dialoguer::Input;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

use crate::core::error::FormError;
use crate::core::form::FieldBinding;
use crate::core::identity::{FieldPath, FieldTag};
use crate::core::issue::FieldIssue;

/// Rendered output of one input: an ordered list of terminal lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    lines: Vec<String>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    /// Split rendered text into lines, dropping trailing blank lines
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(String::from).collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        Self { lines }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn append(&mut self, other: Fragment) {
        self.lines.extend(other.lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Everything a renderer receives for one field
#[derive(Debug, Clone)]
pub struct InputProps {
    pub name: FieldPath,
    pub binding: FieldBinding,
    /// Type-specific configuration supplied with the field
    pub config: Map<String, Value>,
}

impl InputProps {
    pub fn new(binding: FieldBinding, config: Map<String, Value>) -> Self {
        Self {
            name: binding.name.clone(),
            binding,
            config,
        }
    }

    pub fn value(&self) -> &Value {
        &self.binding.value
    }

    pub fn error(&self) -> Option<&FieldIssue> {
        self.binding.error.as_ref()
    }

    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }

    /// The `label` property, or the field path turned into words
    pub fn label(&self) -> String {
        match self.config_str("label") {
            Some(label) => label.to_string(),
            None => humanize(self.name.as_str()),
        }
    }

    /// Configuration and binding flattened into one property bag
    ///
    /// Configuration comes first and the binding's `name` and `value` are
    /// laid over it, so a configuration key only disappears when it collides
    /// with one of those two.
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = self.config.clone();
        merged.insert("name".to_string(), Value::String(self.name.to_string()));
        merged.insert("value".to_string(), self.binding.value.clone());
        merged
    }
}

/// Turn `first_name` or `address.city` into `First Name` / `Address City`
pub fn humanize(path: &str) -> String {
    path.split(['_', '.', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form of a bound value (strings unquoted, null empty)
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A renderer for one field type
pub trait InputRenderer: Send + Sync {
    fn render(&self, props: &InputProps) -> Result<Fragment, FormError>;

    /// Ask the user for a value; `None` leaves the field unchanged
    fn prompt(&self, props: &InputProps, theme: &dyn Theme) -> Result<Option<Value>, FormError> {
        prompt_text(props, theme)
    }
}

impl<F> InputRenderer for F
where
    F: Fn(&InputProps) -> Fragment + Send + Sync,
{
    fn render(&self, props: &InputProps) -> Result<Fragment, FormError> {
        Ok(self(props))
    }
}

/// Free-text prompt used by renderers without their own
pub fn prompt_text(props: &InputProps, theme: &dyn Theme) -> Result<Option<Value>, FormError> {
    let current = display_value(props.value());
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(props.label())
        .allow_empty(true);
    if !current.is_empty() {
        input = input.with_initial_text(current);
    }
    let text = input.interact_text()?;
    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Value::String(text)))
    }
}

/// An input whose configuration has a fixed, deserializable shape
pub trait TypedInput: Send + Sync {
    type Config: DeserializeOwned;

    fn render(&self, props: &InputProps, config: &Self::Config) -> Result<Fragment, FormError>;

    fn prompt(
        &self,
        props: &InputProps,
        _config: &Self::Config,
        theme: &dyn Theme,
    ) -> Result<Option<Value>, FormError> {
        prompt_text(props, theme)
    }
}

/// Adapts a [`TypedInput`] into a renderer handle for `tag`
pub struct Typed<T> {
    tag: FieldTag,
    input: T,
}

impl<T: TypedInput> Typed<T> {
    pub fn new(tag: impl Into<FieldTag>, input: T) -> Self {
        Self {
            tag: tag.into(),
            input,
        }
    }

    pub fn inner(&self) -> &T {
        &self.input
    }

    fn config(&self, props: &InputProps) -> Result<T::Config, FormError> {
        serde_json::from_value(Value::Object(props.config.clone())).map_err(|e| {
            FormError::InvalidConfig {
                tag: self.tag.clone(),
                message: e.to_string(),
            }
        })
    }
}

impl<T: TypedInput> InputRenderer for Typed<T> {
    fn render(&self, props: &InputProps) -> Result<Fragment, FormError> {
        let config = self.config(props)?;
        self.input.render(props, &config)
    }

    fn prompt(&self, props: &InputProps, theme: &dyn Theme) -> Result<Option<Value>, FormError> {
        let config = self.config(props)?;
        self.input.prompt(props, &config, theme)
    }
}
