//! Declarative per-field validation rules

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::issue::{FieldIssue, IssueKind};

/// Validation rules registered with the form for one field path
///
/// Empty values (`null`, `""`, `[]`) only fail `required`; the remaining
/// checks apply once a value is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,

    /// Replaces the generated message for any failed check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Rules {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn with_min_length(mut self, min: u64) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: u64) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    pub fn with_maximum(mut self, max: f64) -> Self {
        self.maximum = Some(max);
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, PatternError> {
        self.pattern = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// True when no check is configured
    pub fn is_empty(&self) -> bool {
        !self.required
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
            && self.pattern.is_none()
    }

    /// Check a value, returning the first failed rule
    pub fn check(&self, value: &Value) -> Option<FieldIssue> {
        self.first_issue(value).map(|issue| match &self.message {
            Some(message) => FieldIssue::new(issue.kind, message.clone()),
            None => issue,
        })
    }

    fn first_issue(&self, value: &Value) -> Option<FieldIssue> {
        if is_empty_value(value) {
            return self.required.then(FieldIssue::required);
        }

        if let Some(len) = length_of(value) {
            if let Some(min) = self.min_length {
                if len < min {
                    return Some(FieldIssue::new(
                        IssueKind::MinLength,
                        format!("Must be at least {} characters", min),
                    ));
                }
            }
            if let Some(max) = self.max_length {
                if len > max {
                    return Some(FieldIssue::new(
                        IssueKind::MaxLength,
                        format!("Must be at most {} characters", max),
                    ));
                }
            }
        }

        if let Some(number) = value.as_f64() {
            if let Some(min) = self.minimum {
                if number < min {
                    return Some(FieldIssue::new(
                        IssueKind::Minimum,
                        format!("Must be at least {}", min),
                    ));
                }
            }
            if let Some(max) = self.maximum {
                if number > max {
                    return Some(FieldIssue::new(
                        IssueKind::Maximum,
                        format!("Must be at most {}", max),
                    ));
                }
            }
        }

        if let (Some(pattern), Some(text)) = (&self.pattern, value.as_str()) {
            if !pattern.is_match(text) {
                return Some(FieldIssue::new(
                    IssueKind::Pattern,
                    format!("Must match pattern {}", pattern.as_str()),
                ));
            }
        }

        None
    }
}

/// A regular expression compiled once, stored as its source text
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

#[derive(Debug, Error)]
#[error("invalid pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Regex::new(pattern).map(Self).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Character count for strings, item count for arrays
fn length_of(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => Some(s.chars().count() as u64),
        Value::Array(items) => Some(items.len() as u64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_rejects_empty_values() {
        let rules = Rules::required();
        for empty in [json!(null), json!(""), json!([])] {
            let issue = rules.check(&empty).unwrap();
            assert_eq!(issue.kind, IssueKind::Required);
            assert_eq!(issue.message, "Required");
        }
        assert!(rules.check(&json!("x")).is_none());
        assert!(rules.check(&json!(0)).is_none());
    }

    #[test]
    fn test_optional_empty_skips_other_checks() {
        let rules = Rules::default().with_min_length(3);
        assert!(rules.check(&json!("")).is_none());
        assert_eq!(
            rules.check(&json!("ab")).unwrap().message,
            "Must be at least 3 characters"
        );
    }

    #[test]
    fn test_length_counts_chars() {
        let rules = Rules::default().with_max_length(3);
        assert!(rules.check(&json!("çãé")).is_none());
        assert_eq!(rules.check(&json!("abcd")).unwrap().kind, IssueKind::MaxLength);
    }

    #[test]
    fn test_numeric_bounds() {
        let rules = Rules::required().with_minimum(1.0).with_maximum(120.0);
        assert_eq!(rules.check(&json!(0)).unwrap().message, "Must be at least 1");
        assert_eq!(rules.check(&json!(121)).unwrap().message, "Must be at most 120");
        assert!(rules.check(&json!(30)).is_none());
    }

    #[test]
    fn test_pattern() {
        let rules = Rules::default().with_pattern(r"^\S+@\S+$").unwrap();
        assert!(rules.check(&json!("a@b")).is_none());
        let issue = rules.check(&json!("nope")).unwrap();
        assert_eq!(issue.kind, IssueKind::Pattern);
        assert_eq!(issue.message, r"Must match pattern ^\S+@\S+$");
    }

    #[test]
    fn test_invalid_pattern_is_rejected_up_front() {
        let err = Rules::default().with_pattern("(").unwrap_err();
        assert_eq!(err.pattern, "(");
        assert!(err.to_string().starts_with("invalid pattern '('"));

        let err = serde_yml::from_str::<Rules>("pattern: \"(\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn test_pattern_round_trips_as_text() {
        let rules: Rules = serde_yml::from_str("pattern: \"^[a-z]+$\"\n").unwrap();
        assert_eq!(rules.pattern.as_ref().map(Pattern::as_str), Some("^[a-z]+$"));
        assert_eq!(serde_json::to_value(&rules).unwrap()["pattern"], json!("^[a-z]+$"));
    }

    #[test]
    fn test_custom_message_overrides() {
        let rules = Rules::required().with_message("Tell us your name");
        let issue = rules.check(&json!("")).unwrap();
        assert_eq!(issue.kind, IssueKind::Required);
        assert_eq!(issue.message, "Tell us your name");
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let rules: Rules = serde_yml::from_str("required: true\nmin_length: 2\n").unwrap();
        assert!(rules.required);
        assert_eq!(rules.min_length, Some(2));
        assert!(!rules.is_empty());
        assert!(Rules::default().is_empty());
    }
}
