//! Custom field declarations and their typed API payloads

use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Numeric or string identifier as written in the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldId {
    Number(u64),
    Text(String),
}

impl FieldId {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// One entry of `params.custom_fields`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomFieldSpec {
    pub id: FieldId,
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub value_id: Option<FieldId>,
}

impl CustomFieldSpec {
    /// The Jira field key, `customfield_<id>`
    pub fn api_key(&self) -> String {
        format!("customfield_{}", self.id)
    }

    /// Build the typed custom field for this declaration
    pub fn build(&self) -> CustomField {
        CustomField::from(self)
    }
}

/// `custom_fields` may be written as a list or as a mapping of labels to
/// declarations. The labels carry no meaning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CustomFieldList {
    List(Vec<CustomFieldSpec>),
    Named(BTreeMap<String, CustomFieldSpec>),
}

impl Default for CustomFieldList {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl CustomFieldList {
    pub fn specs(&self) -> Vec<&CustomFieldSpec> {
        match self {
            Self::List(specs) => specs.iter().collect(),
            Self::Named(specs) => specs.values().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(specs) => specs.is_empty(),
            Self::Named(specs) => specs.is_empty(),
        }
    }
}

/// Typed custom field
#[derive(Debug, Clone, PartialEq)]
pub enum CustomField {
    FreeText { value: Value },
    SelectList { value: Value, value_id: Option<FieldId> },
}

impl From<&CustomFieldSpec> for CustomField {
    /// Dispatch on the declared type; unknown or missing types are free text.
    fn from(spec: &CustomFieldSpec) -> Self {
        match spec.kind.as_deref().map(str::to_lowercase).as_deref() {
            Some("selectlist") => Self::SelectList {
                value: spec.value.clone(),
                value_id: spec.value_id.clone(),
            },
            _ => Self::FreeText {
                value: spec.value.clone(),
            },
        }
    }
}

impl CustomField {
    pub fn to_api_payload(&self) -> Value {
        match self {
            Self::FreeText { value } => value.clone(),
            Self::SelectList {
                value_id: Some(id), ..
            } if !id.is_empty() => json!({ "id": id.to_string() }),
            Self::SelectList { value, .. } => json!({ "value": value }),
        }
    }
}
