//! `out` step parameters

use super::{CustomFieldList, FieldValue};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Desired issue state as declared in a pipeline's `put` step
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OutParams {
    #[serde(default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub summary: Option<FieldValue>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub custom_fields: CustomFieldList,
    #[serde(default)]
    pub issue_key: Option<FieldValue>,
    #[serde(default)]
    pub search_filters: BTreeMap<String, Value>,
    #[serde(default)]
    pub watchers: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<String>,
    #[serde(default)]
    pub comments: Vec<CommentSpec>,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentSpec {
    pub content: FieldValue,
}
