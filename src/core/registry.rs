//! Input registry: field-type tag -> renderer handle
//!
//! The registry is an ordinary value that callers construct and pass to the
//! field resolver. A lazily created process-wide instance is also available
//! through [`InputRegistry::instance`] for registration helpers such as
//! [`form_input`].

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::error::FormError;
use crate::core::identity::FieldTag;
use crate::core::renderer::InputRenderer;

/// Shared reference to a renderer
pub type InputHandle = Arc<dyn InputRenderer>;

static INSTANCE: Lazy<RwLock<InputRegistry>> = Lazy::new(|| RwLock::new(InputRegistry::new()));

/// Mapping from field-type tag to renderer handle
#[derive(Default, Clone)]
pub struct InputRegistry {
    inputs: HashMap<FieldTag, InputHandle>,
}

impl InputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in inputs
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::inputs::register_builtins(&mut registry);
        registry
    }

    /// The process-wide registry, created on first use
    pub fn instance() -> &'static RwLock<InputRegistry> {
        &INSTANCE
    }

    /// Insert or replace the renderer for `tag` (last registration wins)
    pub fn register(&mut self, tag: impl Into<FieldTag>, handle: InputHandle) {
        let tag = tag.into();
        if self.inputs.insert(tag.clone(), handle).is_some() {
            tracing::debug!(tag = %tag, "replaced input registration");
        } else {
            tracing::debug!(tag = %tag, "registered input");
        }
    }

    /// Register only if `tag` is free
    pub fn register_unique(
        &mut self,
        tag: impl Into<FieldTag>,
        handle: InputHandle,
    ) -> Result<(), FormError> {
        let tag = tag.into();
        if self.inputs.contains_key(&tag) {
            return Err(FormError::DuplicateTag { tag });
        }
        self.register(tag, handle);
        Ok(())
    }

    /// Replace the renderer for `tag`, returning the previous one
    pub fn replace(&mut self, tag: impl Into<FieldTag>, handle: InputHandle) -> Option<InputHandle> {
        let tag = tag.into();
        let previous = self.inputs.insert(tag.clone(), handle);
        if previous.is_none() {
            tracing::warn!(tag = %tag, "replace() called for an unregistered input");
        }
        previous
    }

    pub fn lookup(&self, tag: &str) -> Option<InputHandle> {
        self.inputs.get(tag).cloned()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.inputs.contains_key(tag)
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<FieldTag> {
        let mut tags: Vec<FieldTag> = self.inputs.keys().cloned().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Check that every tag has a renderer before anything is rendered
    pub fn ensure_registered<'a, I>(&self, tags: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = &'a FieldTag>,
    {
        for tag in tags {
            if !self.contains(tag.as_str()) {
                return Err(FormError::UnregisteredTag { tag: tag.clone() });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for InputRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

/// Register `renderer` under `tag` in the process-wide registry and hand it
/// back
pub fn form_input<R>(tag: impl Into<FieldTag>, renderer: R) -> Arc<R>
where
    R: InputRenderer + 'static,
{
    let handle = Arc::new(renderer);
    InputRegistry::instance().write().register(tag, handle.clone());
    handle
}
