//! Form state: values, bindings, validation and submit
//!
//! [`FormState`] is the narrow contract the field resolver depends on.
//! [`Form`] is the implementation shipped with the crate: a cheaply
//! cloneable handle over shared state, so change and blur handlers handed to
//! renderers can update the form they were bound from.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::core::error::FormError;
use crate::core::identity::FieldPath;
use crate::core::issue::{FieldErrors, FieldIssue};
use crate::core::rules::Rules;

/// Called with the new value when an input changes
pub type ChangeHandler = Arc<dyn Fn(Value) -> Result<(), FormError> + Send + Sync>;

/// Called when an input loses focus
pub type BlurHandler = Arc<dyn Fn() + Send + Sync>;

/// Contract between the field resolver and whatever tracks form state
pub trait FormState {
    /// Produce a live binding for `path`, registering it (and `rules`, when
    /// given) for tracking
    fn bind(&self, path: &FieldPath, rules: Option<&Rules>) -> FieldBinding;

    /// Current validation errors keyed by field path
    fn errors(&self) -> FieldErrors;

    /// Register validation rules for a path
    fn register(&self, path: &FieldPath, rules: Rules);
}

/// Converts form values into per-path errors (schema validation)
///
/// A form with a resolver ignores per-field [`Rules`] when validating.
pub trait Resolver: Send + Sync {
    fn resolve(&self, values: &Value) -> FieldErrors;
}

/// Anything an error message can be read from
pub trait ErrorSource {
    fn error_for(&self, path: &str) -> Option<FieldIssue>;
}

impl ErrorSource for FieldErrors {
    fn error_for(&self, path: &str) -> Option<FieldIssue> {
        self.get(path).cloned()
    }
}

/// Value, error state and handlers for one field during one render
#[derive(Clone)]
pub struct FieldBinding {
    pub name: FieldPath,
    pub value: Value,
    pub error: Option<FieldIssue>,
    pub touched: bool,
    pub dirty: bool,
    on_change: ChangeHandler,
    on_blur: BlurHandler,
}

impl FieldBinding {
    /// A binding not attached to any form; handlers do nothing
    pub fn detached(name: impl Into<FieldPath>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            error: None,
            touched: false,
            dirty: false,
            on_change: Arc::new(|_| Ok(())),
            on_blur: Arc::new(|| {}),
        }
    }

    pub fn with_error(mut self, error: FieldIssue) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_handlers(mut self, on_change: ChangeHandler, on_blur: BlurHandler) -> Self {
        self.on_change = on_change;
        self.on_blur = on_blur;
        self
    }

    /// Notify the form of a new value
    pub fn on_change(&self, value: Value) -> Result<(), FormError> {
        (self.on_change)(value)
    }

    /// Notify the form that the field lost focus
    pub fn on_blur(&self) {
        (self.on_blur)()
    }
}

impl ErrorSource for FieldBinding {
    fn error_for(&self, path: &str) -> Option<FieldIssue> {
        if self.name.as_str() == path {
            self.error.clone()
        } else {
            None
        }
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("error", &self.error)
            .field("touched", &self.touched)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct FormData {
    values: Value,
    fields: BTreeMap<FieldPath, Rules>,
    order: Vec<FieldPath>,
    touched: BTreeSet<FieldPath>,
    dirty: BTreeSet<FieldPath>,
    errors: FieldErrors,
    resolver: Option<Arc<dyn Resolver>>,
    submit_count: u32,
}

impl FormData {
    /// Track `path`, replacing its rules when given
    fn track(&mut self, path: &FieldPath, rules: Option<Rules>) {
        if !self.fields.contains_key(path) {
            self.order.push(path.clone());
        }
        match rules {
            Some(rules) => {
                self.fields.insert(path.clone(), rules);
            }
            None => {
                self.fields.entry(path.clone()).or_default();
            }
        }
    }

    fn collect_errors(&self) -> FieldErrors {
        if let Some(resolver) = &self.resolver {
            return resolver.resolve(&self.values);
        }
        self.fields
            .iter()
            .filter_map(|(path, rules)| {
                let value = path.lookup(&self.values).unwrap_or(&Value::Null);
                rules.check(value).map(|issue| (path.clone(), issue))
            })
            .collect()
    }
}

/// Shared form state
#[derive(Clone)]
pub struct Form {
    inner: Arc<Mutex<FormData>>,
}

impl Form {
    pub fn new() -> Self {
        Self::with_defaults(Value::Object(Map::new()))
    }

    /// Start from default values (a JSON object)
    pub fn with_defaults(values: Value) -> Self {
        let values = if values.is_object() {
            values
        } else {
            tracing::warn!("ignoring non-object default values");
            Value::Object(Map::new())
        };
        Self {
            inner: Arc::new(Mutex::new(FormData {
                values,
                ..FormData::default()
            })),
        }
    }

    /// Validate with a resolver instead of per-field rules
    pub fn with_resolver(self, resolver: impl Resolver + 'static) -> Self {
        self.inner.lock().resolver = Some(Arc::new(resolver));
        self
    }

    pub fn value(&self, path: &FieldPath) -> Option<Value> {
        path.lookup(&self.inner.lock().values).cloned()
    }

    /// Snapshot of all values
    pub fn values(&self) -> Value {
        self.inner.lock().values.clone()
    }

    /// Paths registered through `bind` or `register`, in registration order
    pub fn fields(&self) -> Vec<FieldPath> {
        self.inner.lock().order.clone()
    }

    pub fn is_touched(&self, path: &FieldPath) -> bool {
        self.inner.lock().touched.contains(path)
    }

    pub fn is_dirty(&self, path: &FieldPath) -> bool {
        self.inner.lock().dirty.contains(path)
    }

    pub fn submit_count(&self) -> u32 {
        self.inner.lock().submit_count
    }

    /// Update a value; after the first submit the field is re-validated
    ///
    /// Fails without touching the form when the path cannot be written
    /// (e.g. a non-numeric segment into an existing array).
    pub fn set_value(&self, path: &FieldPath, value: Value) -> Result<(), FormError> {
        let mut data = self.inner.lock();
        path.assign(&mut data.values, value)?;
        data.dirty.insert(path.clone());
        tracing::debug!(field = %path, "value changed");

        if data.submit_count > 0 {
            let errors = data.collect_errors();
            match errors.get(path.as_str()) {
                Some(issue) => data.errors.set(path, issue.clone()),
                None => {
                    data.errors.remove(path.as_str());
                }
            }
        }
        Ok(())
    }

    pub fn blur(&self, path: &FieldPath) {
        self.inner.lock().touched.insert(path.clone());
    }

    pub fn set_error(&self, path: impl Into<FieldPath>, issue: FieldIssue) {
        self.inner.lock().errors.set(path, issue);
    }

    pub fn clear_errors(&self) {
        self.inner.lock().errors.clear();
    }

    /// Validate every registered field, replacing the error snapshot
    ///
    /// Returns true when the form is valid.
    pub fn validate(&self) -> bool {
        let mut data = self.inner.lock();
        data.errors = data.collect_errors();
        tracing::debug!(errors = data.errors.len(), "form validated");
        data.errors.is_empty()
    }

    /// Validate, then hand the values to `on_valid`
    pub fn handle_submit<T, F>(&self, on_valid: F) -> Result<T, FormError>
    where
        F: FnOnce(Value) -> T,
    {
        self.inner.lock().submit_count += 1;
        if self.validate() {
            Ok(on_valid(self.values()))
        } else {
            Err(FormError::Invalid {
                errors: self.errors(),
            })
        }
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState for Form {
    fn bind(&self, path: &FieldPath, rules: Option<&Rules>) -> FieldBinding {
        let mut data = self.inner.lock();
        data.track(path, rules.cloned());

        let value = path.lookup(&data.values).cloned().unwrap_or(Value::Null);
        let change_form = self.clone();
        let change_path = path.clone();
        let blur_form = self.clone();
        let blur_path = path.clone();

        FieldBinding {
            name: path.clone(),
            value,
            error: data.errors.get(path.as_str()).cloned(),
            touched: data.touched.contains(path),
            dirty: data.dirty.contains(path),
            on_change: Arc::new(move |value| change_form.set_value(&change_path, value)),
            on_blur: Arc::new(move || blur_form.blur(&blur_path)),
        }
    }

    fn errors(&self) -> FieldErrors {
        self.inner.lock().errors.clone()
    }

    fn register(&self, path: &FieldPath, rules: Rules) {
        self.inner.lock().track(path, Some(rules));
    }
}

impl ErrorSource for Form {
    fn error_for(&self, path: &str) -> Option<FieldIssue> {
        self.inner.lock().errors.get(path).cloned()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.lock();
        f.debug_struct("Form")
            .field("values", &data.values)
            .field("errors", &data.errors)
            .field("submit_count", &data.submit_count)
            .finish_non_exhaustive()
    }
}
