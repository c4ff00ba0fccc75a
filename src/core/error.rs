//! Error types for registration, resolution and submission

use miette::Diagnostic;
use thiserror::Error;

use crate::core::identity::{FieldTag, PathParseError, PathWriteError};
use crate::core::issue::FieldErrors;

/// Errors raised by the registry, the field resolver and the form
#[derive(Debug, Error, Diagnostic)]
pub enum FormError {
    /// A field used a tag that has no registered renderer.
    ///
    /// This is a programming or configuration error: the registration is
    /// missing and must be added before the field is rendered.
    #[error("FormField '{tag}' not found")]
    #[diagnostic(
        code(formkit::unregistered_tag),
        help("register a renderer for this tag before rendering fields that use it")
    )]
    UnregisteredTag { tag: FieldTag },

    #[error("input '{tag}' is already registered")]
    #[diagnostic(
        code(formkit::duplicate_tag),
        help("use `replace` to override an existing registration on purpose")
    )]
    DuplicateTag { tag: FieldTag },

    #[error("invalid configuration for input '{tag}': {message}")]
    #[diagnostic(code(formkit::invalid_config))]
    InvalidConfig { tag: FieldTag, message: String },

    #[error("form has {} invalid field(s)", .errors.len())]
    #[diagnostic(code(formkit::invalid))]
    Invalid { errors: FieldErrors },

    #[error("schema error: {0}")]
    #[diagnostic(code(formkit::schema))]
    Schema(String),

    #[error("form definition error: {0}")]
    #[diagnostic(code(formkit::definition))]
    Definition(String),

    #[error("template error: {0}")]
    #[diagnostic(code(formkit::template))]
    Template(String),

    #[error("prompt failed: {0}")]
    #[diagnostic(code(formkit::prompt))]
    Prompt(String),

    #[error(transparent)]
    #[diagnostic(code(formkit::path))]
    Path(#[from] PathParseError),

    #[error(transparent)]
    #[diagnostic(code(formkit::path_write))]
    PathWrite(#[from] PathWriteError),

    #[error("IO error: {0}")]
    #[diagnostic(code(formkit::io))]
    Io(#[from] std::io::Error),
}

impl FormError {
    /// The tag this error is about, if any
    pub fn tag(&self) -> Option<&FieldTag> {
        match self {
            FormError::UnregisteredTag { tag }
            | FormError::DuplicateTag { tag }
            | FormError::InvalidConfig { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

impl From<dialoguer::Error> for FormError {
    fn from(e: dialoguer::Error) -> Self {
        FormError::Prompt(e.to_string())
    }
}

impl From<tera::Error> for FormError {
    fn from(e: tera::Error) -> Self {
        // tera nests the useful message in its source chain
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        FormError::Template(message)
    }
}
