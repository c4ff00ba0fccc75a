//! Field identity: type tags and field paths

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque key naming a kind of input (e.g. "text", "name", "age")
///
/// Any string is a valid tag. Tags are compared exactly, so `"Name"` and
/// `"name"` are distinct registrations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTag(String);

impl FieldTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldTag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&FieldTag> for FieldTag {
    fn from(tag: &FieldTag) -> Self {
        tag.clone()
    }
}

impl Borrow<str> for FieldTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Dot-separated path addressing a value in the form's value tree
///
/// `address.city` addresses `{"address": {"city": ...}}`. Numeric segments
/// index into arrays when the parent value is an array.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(String);

impl FieldPath {
    /// Path used for errors that belong to the whole form
    pub const ROOT: &'static str = "root";

    /// Parse a path, rejecting empty segments
    pub fn parse(s: &str) -> Result<Self, PathParseError> {
        s.parse()
    }

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Append a segment, producing a child path
    pub fn join(&self, segment: &str) -> Self {
        Self(format!("{}.{}", self.0, segment))
    }

    /// Build a path from a JSON pointer (`/address/city` -> `address.city`)
    ///
    /// Returns `None` for the document root.
    pub fn from_pointer(pointer: &str) -> Option<Self> {
        let segments: Vec<String> = pointer
            .split('/')
            .skip(1)
            .map(|s| s.replace("~1", "/").replace("~0", "~"))
            .collect();
        if segments.is_empty() || segments.iter().all(|s| s.is_empty()) {
            return None;
        }
        Some(Self(segments.join(".")))
    }

    /// Read the value at this path
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments().try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Write a value at this path, creating intermediate objects as needed
    ///
    /// Numeric segments index into existing arrays; an index past the end
    /// pads the array with `null`. Existing values are never replaced by a
    /// container of another kind, so a path that would need that fails and
    /// leaves `root` untouched.
    pub fn assign(&self, root: &mut Value, value: Value) -> Result<(), PathWriteError> {
        let segments: Vec<&str> = self.segments().collect();
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        self.check_writable(root, parents, last)?;

        let mut current = root;
        for segment in parents {
            current = self.slot(current, segment)?;
        }
        *self.slot(current, last)? = value;
        Ok(())
    }

    /// Walk the existing values along the path without modifying them
    fn check_writable(&self, root: &Value, parents: &[&str], last: &str) -> Result<(), PathWriteError> {
        let mut current = Some(root);
        for segment in parents.iter().chain(std::iter::once(&last)) {
            current = match current {
                None | Some(Value::Null) => return Ok(()),
                Some(Value::Object(map)) => map.get(*segment),
                Some(Value::Array(items)) => match segment.parse::<usize>() {
                    Ok(i) => items.get(i),
                    Err(_) => return Err(self.not_an_index(segment)),
                },
                Some(_) => return Err(self.not_a_container(segment)),
            };
        }
        Ok(())
    }

    /// Mutable slot for `segment` inside `current`, created when missing
    fn slot<'a>(&self, current: &'a mut Value, segment: &str) -> Result<&'a mut Value, PathWriteError> {
        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        match current {
            Value::Object(map) => Ok(map.entry(segment.to_string()).or_insert(Value::Null)),
            Value::Array(items) => {
                let index = segment
                    .parse::<usize>()
                    .map_err(|_| self.not_an_index(segment))?;
                if index >= items.len() {
                    items.resize(index + 1, Value::Null);
                }
                Ok(&mut items[index])
            }
            _ => Err(self.not_a_container(segment)),
        }
    }

    fn not_an_index(&self, segment: &str) -> PathWriteError {
        PathWriteError::NotAnIndex {
            path: self.0.clone(),
            segment: segment.to_string(),
        }
    }

    fn not_a_container(&self, segment: &str) -> PathWriteError {
        PathWriteError::NotAContainer {
            path: self.0.clone(),
            segment: segment.to_string(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }
        if s.split('.').any(str::is_empty) {
            return Err(PathParseError::EmptySegment(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = PathParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.0
    }
}

impl From<&str> for FieldPath {
    /// Conversion for literal paths; use [`FieldPath::parse`] for untrusted
    /// input. Malformed literals panic in debug builds.
    fn from(s: &str) -> Self {
        debug_assert!(
            s.parse::<FieldPath>().is_ok(),
            "malformed field path literal '{s}'"
        );
        Self(s.to_string())
    }
}

impl From<&FieldPath> for FieldPath {
    fn from(path: &FieldPath) -> Self {
        path.clone()
    }
}

impl Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing field paths
#[derive(Debug, Error)]
pub enum PathParseError {
    #[error("field path cannot be empty")]
    Empty,

    #[error("field path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// Errors from writing a value at a field path
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathWriteError {
    #[error("cannot write '{path}': '{segment}' is not an index into an array")]
    NotAnIndex { path: String, segment: String },

    #[error("cannot write '{path}': the value holding '{segment}' is not an object or array")]
    NotAContainer { path: String, segment: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_display_and_borrow() {
        let tag = FieldTag::from("name");
        assert_eq!(tag.to_string(), "name");
        let as_str: &str = tag.borrow();
        assert_eq!(as_str, "name");
    }

    #[test]
    fn test_path_parse_rejects_empty_segments() {
        assert!(matches!(FieldPath::parse(""), Err(PathParseError::Empty)));
        assert!(matches!(
            FieldPath::parse("address..city"),
            Err(PathParseError::EmptySegment(_))
        ));
        assert_eq!(FieldPath::parse("address.city").unwrap().as_str(), "address.city");
    }

    #[test]
    fn test_path_from_pointer() {
        assert_eq!(FieldPath::from_pointer("/age").unwrap().as_str(), "age");
        assert_eq!(
            FieldPath::from_pointer("/address/city").unwrap().as_str(),
            "address.city"
        );
        assert_eq!(FieldPath::from_pointer("/a~1b").unwrap().as_str(), "a/b");
        assert!(FieldPath::from_pointer("").is_none());
    }

    #[test]
    fn test_lookup_nested_values() {
        let values = json!({"address": {"city": "Lisbon"}, "tags": ["a", "b"]});
        assert_eq!(
            FieldPath::from("address.city").lookup(&values),
            Some(&json!("Lisbon"))
        );
        assert_eq!(FieldPath::from("tags.1").lookup(&values), Some(&json!("b")));
        assert!(FieldPath::from("address.zip").lookup(&values).is_none());
    }

    #[test]
    fn test_assign_creates_intermediate_objects() {
        let mut values = json!({});
        FieldPath::from("address.city").assign(&mut values, json!("Porto")).unwrap();
        assert_eq!(values, json!({"address": {"city": "Porto"}}));

        FieldPath::from("name").assign(&mut values, json!("Ana")).unwrap();
        assert_eq!(values["name"], json!("Ana"));
    }

    #[test]
    fn test_assign_into_array() {
        let mut values = json!({"tags": ["a"]});
        FieldPath::from("tags.0").assign(&mut values, json!("z")).unwrap();
        FieldPath::from("tags.1").assign(&mut values, json!("y")).unwrap();
        assert_eq!(values["tags"], json!(["z", "y"]));
    }

    #[test]
    fn test_assign_past_end_pads_with_null() {
        let mut values = json!({"tags": ["a"]});
        FieldPath::from("tags.3").assign(&mut values, json!("x")).unwrap();
        assert_eq!(values["tags"], json!(["a", null, null, "x"]));
    }

    #[test]
    fn test_assign_nested_past_end_keeps_array() {
        let mut values = json!({"tags": ["a", "b"]});
        FieldPath::from("tags.5.label").assign(&mut values, json!("x")).unwrap();
        assert_eq!(
            values["tags"],
            json!(["a", "b", null, null, null, {"label": "x"}])
        );
    }

    #[test]
    fn test_assign_never_replaces_existing_values() {
        let mut values = json!({"tags": ["a"], "name": "Ana"});
        let before = values.clone();

        let err = FieldPath::from("tags.first").assign(&mut values, json!("x")).unwrap_err();
        assert!(matches!(err, PathWriteError::NotAnIndex { ref segment, .. } if segment == "first"));

        let err = FieldPath::from("name.given").assign(&mut values, json!("x")).unwrap_err();
        assert!(matches!(err, PathWriteError::NotAContainer { .. }));

        assert_eq!(values, before);
    }

    #[test]
    fn test_assign_through_null_creates_object() {
        let mut values = json!({"address": null});
        FieldPath::from("address.city").assign(&mut values, json!("Porto")).unwrap();
        assert_eq!(values, json!({"address": {"city": "Porto"}}));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "malformed field path literal")]
    fn test_malformed_literal_panics_in_debug() {
        let _ = FieldPath::from("a..b");
    }

    #[test]
    fn test_path_serde_validates() {
        let ok: FieldPath = serde_json::from_value(json!("a.b")).unwrap();
        assert_eq!(ok.as_str(), "a.b");
        assert!(serde_json::from_value::<FieldPath>(json!("a.")).is_err());
    }
}
