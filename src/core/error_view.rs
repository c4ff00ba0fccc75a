//! Field-level error display

use crate::core::form::ErrorSource;
use crate::core::identity::FieldPath;
use crate::core::renderer::Fragment;

/// Projects the current error for one field path into caller-rendered output
#[derive(Debug, Clone)]
pub struct ErrorMessage {
    name: FieldPath,
}

impl ErrorMessage {
    pub fn new(name: impl Into<FieldPath>) -> Self {
        Self { name: name.into() }
    }

    /// Call `render` with the field's message, or return `None` without
    /// calling it when the field has no error
    pub fn render<S, T, F>(&self, source: &S, render: F) -> Option<T>
    where
        S: ErrorSource + ?Sized,
        F: FnOnce(&str) -> T,
    {
        source
            .error_for(self.name.as_str())
            .map(|issue| render(&issue.message))
    }

    /// Standard styled error line used by the built-in inputs
    pub fn line<S: ErrorSource + ?Sized>(&self, source: &S) -> Fragment {
        self.render(source, |message| {
            Fragment::line(format!("  {} {}", console::style("✗").red(), console::style(message).red()))
        })
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{Form, FormState};
    use crate::core::issue::{FieldErrors, FieldIssue};
    use std::cell::Cell;

    #[test]
    fn test_invokes_callback_with_message() {
        let form = Form::new();
        form.set_error("age", FieldIssue::required());

        let rendered = ErrorMessage::new("age").render(&form, |message| format!("<p>{message}</p>"));
        assert_eq!(rendered.as_deref(), Some("<p>Required</p>"));
    }

    #[test]
    fn test_no_error_never_invokes_callback() {
        let form = Form::new();
        form.set_error("age", FieldIssue::required());

        let called = Cell::new(false);
        let rendered = ErrorMessage::new("name").render(&form, |_| called.set(true));
        assert!(rendered.is_none());
        assert!(!called.get());
    }

    #[test]
    fn test_reads_error_snapshot() {
        let form = Form::new();
        form.set_error("age", FieldIssue::required());
        let snapshot: FieldErrors = form.errors();

        let rendered = ErrorMessage::new("age").render(&snapshot, str::to_string);
        assert_eq!(rendered.as_deref(), Some("Required"));
    }

    #[test]
    fn test_line_is_empty_without_error() {
        let snapshot = FieldErrors::new();
        assert!(ErrorMessage::new("age").line(&snapshot).is_empty());
    }
}
