//! Core module - registry, field resolver and form state

pub mod config;
pub mod error;
pub mod error_view;
pub mod field;
pub mod form;
pub mod identity;
pub mod issue;
pub mod registry;
pub mod renderer;
pub mod rules;

pub use config::Config;
pub use error::FormError;
pub use error_view::ErrorMessage;
pub use field::FormField;
pub use form::{ErrorSource, FieldBinding, Form, FormState, Resolver};
pub use identity::{FieldPath, FieldTag, PathParseError, PathWriteError};
pub use issue::{FieldErrors, FieldIssue, IssueKind};
pub use registry::{form_input, InputHandle, InputRegistry};
pub use renderer::{Fragment, InputProps, InputRenderer, Typed, TypedInput};
pub use rules::{Pattern, PatternError, Rules};
