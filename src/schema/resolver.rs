//! JSON Schema resolver: schema violations as per-field errors

use jsonschema::error::ValidationErrorKind;
use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use serde_json::Value;

use crate::core::error::FormError;
use crate::core::form::Resolver;
use crate::core::identity::FieldPath;
use crate::core::issue::{FieldErrors, FieldIssue, IssueKind};
use crate::core::rules::{Pattern, Rules};

/// Validates form values against a compiled JSON Schema
pub struct SchemaResolver {
    validator: JsonValidator,
}

impl SchemaResolver {
    pub fn new(schema: &Value) -> Result<Self, FormError> {
        let validator = validator_for(schema).map_err(|e| FormError::Schema(e.to_string()))?;
        Ok(Self { validator })
    }

    pub fn is_valid(&self, values: &Value) -> bool {
        self.validator.is_valid(values)
    }
}

impl Resolver for SchemaResolver {
    fn resolve(&self, values: &Value) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for error in self.validator.iter_errors(values) {
            let (path, issue) = error_to_issue(&error);
            tracing::debug!(field = %path, message = %issue.message, "schema violation");
            errors.insert(path, issue);
        }
        errors
    }
}

/// Map a schema error to the field it belongs to
///
/// `required` violations are reported by the validator on the parent
/// object; they are moved onto the missing property.
fn error_to_issue(error: &JsonSchemaError) -> (FieldPath, FieldIssue) {
    let base = FieldPath::from_pointer(error.instance_path.as_str());

    if let ValidationErrorKind::Required { property } = &error.kind {
        let property = property
            .as_str()
            .map(String::from)
            .unwrap_or_else(|| property.to_string());
        let path = match base {
            Some(parent) => parent.join(&property),
            None => FieldPath::parse(&property).unwrap_or_else(|_| FieldPath::root()),
        };
        return (path, FieldIssue::required());
    }

    let path = base.unwrap_or_else(FieldPath::root);
    (path, format_issue(error))
}

fn format_issue(error: &JsonSchemaError) -> FieldIssue {
    match &error.kind {
        ValidationErrorKind::MinLength { limit } => FieldIssue::new(
            IssueKind::MinLength,
            format!("Must be at least {} characters", limit),
        ),
        ValidationErrorKind::MaxLength { limit } => FieldIssue::new(
            IssueKind::MaxLength,
            format!("Must be at most {} characters", limit),
        ),
        ValidationErrorKind::Minimum { limit } => {
            FieldIssue::new(IssueKind::Minimum, format!("Must be at least {}", limit))
        }
        ValidationErrorKind::Maximum { limit } => {
            FieldIssue::new(IssueKind::Maximum, format!("Must be at most {}", limit))
        }
        ValidationErrorKind::Pattern { pattern } => {
            FieldIssue::new(IssueKind::Pattern, format!("Must match pattern {}", pattern))
        }
        ValidationErrorKind::Enum { options } => FieldIssue::new(
            IssueKind::Enum,
            format!("Must be one of: {}", format_enum_options(options)),
        ),
        ValidationErrorKind::Type { .. } => FieldIssue::new(IssueKind::Type, error.to_string()),
        _ => FieldIssue::new(IssueKind::Schema, error.to_string()),
    }
}

/// Format enum options as a string
fn format_enum_options(options: &Value) -> String {
    if let Some(arr) = options.as_array() {
        arr.iter()
            .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}

/// Derive per-field rules from the top-level properties of an object schema
pub fn rules_from_schema(schema: &Value) -> Vec<(FieldPath, Rules)> {
    let required = required_properties(schema);
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .filter_map(|(name, prop)| {
            let path = FieldPath::parse(name).ok()?;
            let pattern = prop
                .get("pattern")
                .and_then(Value::as_str)
                .and_then(|p| Pattern::new(p).ok());
            let rules = Rules {
                required: required.iter().any(|r| r == name),
                min_length: prop.get("minLength").and_then(Value::as_u64),
                max_length: prop.get("maxLength").and_then(Value::as_u64),
                minimum: prop.get("minimum").and_then(Value::as_f64),
                maximum: prop.get("maximum").and_then(Value::as_f64),
                pattern,
                message: None,
            };
            Some((path, rules))
        })
        .collect()
}

pub(crate) fn required_properties(schema: &Value) -> Vec<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
