//! Form definitions loaded from YAML or JSON files
//!
//! A definition names the fields of a form, the input each one uses, and
//! optionally a JSON Schema and template-based inputs:
//!
//! ```yaml
//! title: Profile
//! schema:
//!   type: object
//!   properties:
//!     name: { type: string, minLength: 1 }
//!   required: [name]
//! inputs:
//!   badge: "[{{ label }}: {{ value }}]"
//! fields:
//!   - type: text
//!     name: name
//!     props: { label: Full name }
//! ```
//!
//! When `fields` is omitted, fields are derived from the schema properties.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::error::FormError;
use crate::core::field::FormField;
use crate::core::form::{Form, FormState};
use crate::core::identity::{FieldPath, FieldTag};
use crate::core::registry::InputRegistry;
use crate::core::rules::Rules;
use crate::inputs::TemplateInput;
use crate::schema::resolver::{rules_from_schema, SchemaResolver};

/// A whole form: fields plus optional schema and template inputs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefinition {
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Template-based inputs, tag -> Tera template
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<FieldTag, String>,

    pub fields: Vec<FieldDefinition>,
}

/// One field entry of a definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub tag: FieldTag,

    pub name: FieldPath,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Rules>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl FieldDefinition {
    pub fn to_field(&self) -> FormField {
        let field = FormField::new(&self.tag, &self.name).props(self.props.clone());
        match &self.rules {
            Some(rules) => field.rules(rules.clone()),
            None => field,
        }
    }
}

impl FormDefinition {
    /// Load a definition file (YAML or JSON)
    pub fn load(path: &Path) -> Result<Self, FormError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| FormError::Definition(format!("{}: {}", path.display(), e)))
    }

    /// Parse a definition; a bad field entry (malformed path, invalid
    /// pattern, ...) is reported with the field's name
    pub fn parse(content: &str) -> Result<Self, FormError> {
        let raw: RawDefinition =
            serde_yml::from_str(content).map_err(|e| FormError::Definition(e.to_string()))?;

        let fields = raw
            .fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| parse_field(index, field))
            .collect::<Result<Vec<_>, _>>()?;

        let mut definition = FormDefinition {
            title: raw.title,
            schema: raw.schema,
            inputs: raw.inputs,
            fields,
        };

        if definition.fields.is_empty() {
            if let Some(schema) = &definition.schema {
                definition.fields = fields_from_schema(schema);
            }
        }
        Ok(definition)
    }

    /// Distinct tags used by the fields, in field order
    pub fn tags(&self) -> Vec<FieldTag> {
        let mut tags: Vec<FieldTag> = Vec::new();
        for field in &self.fields {
            if !tags.contains(&field.tag) {
                tags.push(field.tag.clone());
            }
        }
        tags
    }

    pub fn form_fields(&self) -> Vec<FormField> {
        self.fields.iter().map(FieldDefinition::to_field).collect()
    }

    /// Register the definition's template inputs, overriding same-named tags
    pub fn register_inputs(&self, registry: &mut InputRegistry) -> Result<(), FormError> {
        for (tag, template) in &self.inputs {
            let input = TemplateInput::new(tag.clone(), template)?;
            registry.register(tag.clone(), Arc::new(input));
        }
        Ok(())
    }

    /// Build the form state: defaults from `values`, schema resolver when a
    /// schema is present, and every field's rules registered
    pub fn build_form(&self, values: Option<Value>) -> Result<Form, FormError> {
        let mut form = Form::with_defaults(values.unwrap_or_else(|| json!({})));
        if let Some(schema) = &self.schema {
            form = form.with_resolver(SchemaResolver::new(schema)?);
        }
        for field in &self.fields {
            let rules = field.rules.clone().unwrap_or_default();
            form.register(&field.name, rules);
        }
        Ok(form)
    }
}

/// A definition whose fields have not been checked yet
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawDefinition {
    title: Option<String>,
    schema: Option<Value>,
    inputs: BTreeMap<FieldTag, String>,
    fields: Vec<Value>,
}

fn parse_field(index: usize, field: Value) -> Result<FieldDefinition, FormError> {
    let label = match field.get("name").and_then(Value::as_str) {
        Some(name) => format!("'{}'", name),
        None => format!("#{}", index + 1),
    };
    serde_json::from_value(field)
        .map_err(|e| FormError::Definition(format!("field {}: {}", label, e)))
}

/// Pick an input for each schema property
///
/// Each field carries the rules implied by its property, and required
/// properties get `required: true` in their props.
pub fn fields_from_schema(schema: &Value) -> Vec<FieldDefinition> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };
    let mut rules: BTreeMap<FieldPath, Rules> = rules_from_schema(schema).into_iter().collect();

    properties
        .iter()
        .filter_map(|(name, prop)| {
            let Ok(path) = FieldPath::parse(name) else {
                tracing::debug!(property = %name, "schema property is not a usable field path");
                return None;
            };
            let field_rules = rules.remove(&path).filter(|r| !r.is_empty());

            let mut props = Map::new();
            if field_rules.as_ref().is_some_and(|r| r.required) {
                props.insert("required".to_string(), json!(true));
            }
            if let Some(title) = prop.get("title").and_then(Value::as_str) {
                props.insert("label".to_string(), json!(title));
            }
            if let Some(description) = prop.get("description").and_then(Value::as_str) {
                props.insert("description".to_string(), json!(description));
            }

            let tag = if let Some(options) = prop.get("enum").and_then(Value::as_array) {
                props.insert("options".to_string(), Value::Array(options.clone()));
                "select"
            } else {
                match prop.get("type").and_then(Value::as_str) {
                    Some("string") => "text",
                    Some("integer") | Some("number") => "number",
                    Some("boolean") => "checkbox",
                    _ => {
                        tracing::debug!(property = %name, "no input for schema property");
                        return None;
                    }
                }
            };

            Some(FieldDefinition {
                tag: FieldTag::from(tag),
                name: path,
                rules: field_rules,
                props,
            })
        })
        .collect()
}
