//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::core::error::FormError;
use crate::core::issue::FieldErrors;
use crate::core::registry::InputRegistry;
use crate::schema::FormDefinition;

/// Read a YAML or JSON file of field values; the document must be a mapping
pub fn load_values(path: &Path) -> Result<Value, FormError> {
    let content = std::fs::read_to_string(path)?;
    let values: Value = serde_yml::from_str(&content)
        .map_err(|e| FormError::Definition(format!("{}: {}", path.display(), e)))?;
    match values {
        Value::Object(_) => Ok(values),
        Value::Null => Ok(Value::Object(Default::default())),
        _ => Err(FormError::Definition(format!(
            "{}: values must be a mapping of field names to values",
            path.display()
        ))),
    }
}

/// Load a form definition and a registry holding the built-ins plus the
/// definition's template inputs
pub fn load_form(path: &Path) -> Result<(FormDefinition, InputRegistry), FormError> {
    let definition = FormDefinition::load(path)?;
    let mut registry = InputRegistry::with_builtins();
    definition.register_inputs(&mut registry)?;
    Ok((definition, registry))
}

/// Print every error, one per line, to stderr
pub fn print_errors(errors: &FieldErrors) {
    for (path, issue) in errors {
        eprintln!("{} {}: {}", style("✗").red(), style(path).bold(), issue.message);
    }
}

/// Serialize submitted values
pub fn format_values(values: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(values).into_diagnostic(),
        OutputFormat::Yaml => serde_yml::to_string(values).into_diagnostic(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_values_accepts_yaml_and_json() {
        let tmp = TempDir::new().unwrap();
        let yaml = tmp.path().join("values.yaml");
        std::fs::write(&yaml, "name: Ana\nage: 30\n").unwrap();
        assert_eq!(load_values(&yaml).unwrap(), json!({"name": "Ana", "age": 30}));

        let json_file = tmp.path().join("values.json");
        std::fs::write(&json_file, r#"{"address": {"city": "Porto"}}"#).unwrap();
        assert_eq!(load_values(&json_file).unwrap()["address"]["city"], json!("Porto"));
    }

    #[test]
    fn test_load_values_rejects_non_mapping() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("values.yaml");
        std::fs::write(&path, "- a\n- b\n").unwrap();
        let err = load_values(&path).unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_format_values() {
        let values = json!({"name": "Ana"});
        assert!(format_values(&values, OutputFormat::Json).unwrap().contains("\"name\": \"Ana\""));
        assert_eq!(format_values(&values, OutputFormat::Yaml).unwrap().trim(), "name: Ana");
    }
}
