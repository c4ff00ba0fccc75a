//! Per-field validation issues

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::identity::FieldPath;

/// Which check produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Required,
    MinLength,
    MaxLength,
    Minimum,
    Maximum,
    Pattern,
    Type,
    Enum,
    Schema,
    Custom,
}

/// A validation error for one field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub kind: IssueKind,
    pub message: String,
}

impl FieldIssue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn required() -> Self {
        Self::new(IssueKind::Required, "Required")
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Custom, message)
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Snapshot of validation errors keyed by field path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldPath, FieldIssue>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&FieldIssue> {
        self.0.get(path)
    }

    pub fn message(&self, path: &str) -> Option<&str> {
        self.get(path).map(|issue| issue.message.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Record an issue unless the path already has one (first issue wins)
    pub fn insert(&mut self, path: impl Into<FieldPath>, issue: FieldIssue) {
        self.0.entry(path.into()).or_insert(issue);
    }

    /// Record an issue, replacing any existing one for the path
    pub fn set(&mut self, path: impl Into<FieldPath>, issue: FieldIssue) {
        self.0.insert(path.into(), issue);
    }

    pub fn remove(&mut self, path: &str) -> Option<FieldIssue> {
        self.0.remove(path)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldIssue)> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a FieldPath, &'a FieldIssue);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldPath, FieldIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(FieldPath, FieldIssue)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (FieldPath, FieldIssue)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (path, issue) in iter {
            errors.insert(path, issue);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_issue_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("age", FieldIssue::required());
        errors.insert("age", FieldIssue::custom("too young"));
        assert_eq!(errors.message("age"), Some("Required"));

        errors.set("age", FieldIssue::custom("too young"));
        assert_eq!(errors.message("age"), Some("too young"));
    }

    #[test]
    fn test_lookup_by_str() {
        let mut errors = FieldErrors::new();
        errors.insert("address.city", FieldIssue::required());
        assert!(errors.contains("address.city"));
        assert!(errors.get("address").is_none());
        assert_eq!(errors.len(), 1);
        assert!(errors.remove("address.city").is_some());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_serializes_as_map() {
        let mut errors = FieldErrors::new();
        errors.insert("name", FieldIssue::required());
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"]["message"], "Required");
        assert_eq!(json["name"]["kind"], "required");
    }
}
