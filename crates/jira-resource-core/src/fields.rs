//! Issue `fields` assembly

use crate::models::{FieldValue, OutParams, Source};
use crate::{Error, Result, ValueResolver};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Whether the assembled fields are for a create or an update request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Create,
    Update,
}

/// Builds the outbound `fields` object from the step parameters.
///
/// Layers, lowest precedence first:
///
/// 1. custom fields whose payload is a primitive (resolved)
/// 2. `params.fields` (resolved)
/// 3. `params.summary` (resolved)
/// 4. custom fields whose payload is structured (verbatim)
/// 5. `project`, `issuetype` and `parent` linkage
pub struct FieldAssembler<'a> {
    resolver: &'a ValueResolver,
}

impl<'a> FieldAssembler<'a> {
    pub fn new(resolver: &'a ValueResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &'a ValueResolver {
        self.resolver
    }

    pub fn assemble(
        &self,
        source: &Source,
        params: &OutParams,
        kind: RequestKind,
    ) -> Result<Map<String, Value>> {
        let summary = params.summary.as_ref().filter(|summary| !summary.is_empty());

        if kind == RequestKind::Create && summary.is_none() {
            return Err(Error::Validation(
                "summary field is required for creating new issue".to_string(),
            ));
        }

        let (expandable, structured) = partition_custom_fields(params);

        let mut unresolved = expandable;
        unresolved.extend(params.fields.clone());
        if let Some(summary) = summary {
            unresolved.insert("summary".to_string(), summary.clone());
        }

        let mut fields = Map::new();
        for (key, value) in &unresolved {
            fields.insert(key.clone(), Value::String(self.resolver.resolve(value)?));
        }

        let mut fields = overlay(fields, structured);

        fields.insert("project".to_string(), json!({ "key": source.project }));

        if let Some(issue_type) = &params.issue_type {
            fields.insert("issuetype".to_string(), json!({ "name": issue_type }));
        }

        if let Some(parent) = &params.parent {
            fields.insert("parent".to_string(), json!({ "key": parent }));
        }

        Ok(fields)
    }
}

/// Split custom field payloads into those eligible for text resolution and
/// those passed through untouched.
fn partition_custom_fields(
    params: &OutParams,
) -> (BTreeMap<String, FieldValue>, Map<String, Value>) {
    let mut expandable = BTreeMap::new();
    let mut structured = Map::new();

    for spec in params.custom_fields.specs() {
        let payload = spec.build().to_api_payload();

        match FieldValue::from_primitive(&payload) {
            Some(value) => {
                structured.remove(&spec.api_key());
                expandable.insert(spec.api_key(), value);
            }
            None => {
                expandable.remove(&spec.api_key());
                structured.insert(spec.api_key(), payload);
            }
        }
    }

    (expandable, structured)
}

/// Apply `top` over `base`; keys in `top` win.
fn overlay(mut base: Map<String, Value>, top: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in top {
        base.insert(key, value);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuildMetadata;
    use tempfile::TempDir;

    fn source() -> Source {
        Source {
            url: "http://jira.com".to_string(),
            project: "ATP".to_string(),
            ..Source::default()
        }
    }

    fn params(json: &str) -> OutParams {
        serde_json::from_str(json).unwrap()
    }

    fn fixture() -> (TempDir, ValueResolver) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("resources")).unwrap();
        std::fs::write(dir.path().join("resources/sample.out"), "Text from file").unwrap();
        std::fs::write(dir.path().join("resources/sample.version"), "1.0.1").unwrap();

        let resolver = ValueResolver::new(dir.path(), BuildMetadata::default());
        (dir, resolver)
    }

    #[test]
    fn test_create_fields() {
        let (_dir, resolver) = fixture();
        let params = params(
            r#"{
                "issue_type": "Feature",
                "summary": {"file": "resources/sample.version", "text": "TEST - $FILE"},
                "fields": {
                    "description": {"file": "resources/sample.out", "text": "Sample description [$FILE]"},
                    "environment": "Prod"
                },
                "custom_fields": {
                    "a_custom_field": {"id": 10201, "value": 12345},
                    "another_one": {"id": 76552, "value": "something"}
                }
            }"#,
        );

        let fields = FieldAssembler::new(&resolver)
            .assemble(&source(), &params, RequestKind::Create)
            .unwrap();

        assert_eq!(
            Value::Object(fields),
            json!({
                "project": {"key": "ATP"},
                "issuetype": {"name": "Feature"},
                "summary": "TEST - 1.0.1",
                "description": "Sample description [Text from file]",
                "environment": "Prod",
                "customfield_10201": "12345",
                "customfield_76552": "something"
            })
        );
    }

    #[test]
    fn test_summary_required_on_create_only() {
        let (_dir, resolver) = fixture();
        let assembler = FieldAssembler::new(&resolver);
        let params = params(r#"{"fields": {"environment": "Prod"}}"#);

        let error = assembler
            .assemble(&source(), &params, RequestKind::Create)
            .unwrap_err();
        assert!(matches!(error, Error::Validation(ref msg) if msg.contains("summary")));

        let fields = assembler
            .assemble(&source(), &params, RequestKind::Update)
            .unwrap();
        assert!(!fields.contains_key("summary"));
        assert!(!fields.contains_key("issuetype"));
        assert_eq!(fields["project"], json!({"key": "ATP"}));
    }

    #[test]
    fn test_empty_summary_counts_as_missing() {
        let (_dir, resolver) = fixture();
        let assembler = FieldAssembler::new(&resolver);
        let params = params(r#"{"summary": "", "issue_type": "Bug"}"#);

        let error = assembler
            .assemble(&source(), &params, RequestKind::Create)
            .unwrap_err();
        assert!(matches!(error, Error::Validation(ref msg) if msg.contains("summary")));

        let fields = assembler
            .assemble(&source(), &params, RequestKind::Update)
            .unwrap();
        assert!(!fields.contains_key("summary"));
    }

    #[test]
    fn test_standard_fields_win_over_free_text_custom_fields() {
        let (_dir, resolver) = fixture();
        let params = params(
            r#"{
                "fields": {"customfield_1": "standard"},
                "custom_fields": [{"id": 1, "value": "custom"}]
            }"#,
        );

        let fields = FieldAssembler::new(&resolver)
            .assemble(&source(), &params, RequestKind::Update)
            .unwrap();
        assert_eq!(fields["customfield_1"], json!("standard"));
    }

    #[test]
    fn test_summary_param_wins_over_fields_summary() {
        let (_dir, resolver) = fixture();
        let params = params(r#"{"summary": "from param", "fields": {"summary": "from fields"}}"#);

        let fields = FieldAssembler::new(&resolver)
            .assemble(&source(), &params, RequestKind::Create)
            .unwrap();
        assert_eq!(fields["summary"], json!("from param"));
    }

    #[test]
    fn test_select_list_wins_over_resolved_text() {
        let (_dir, resolver) = fixture();
        let params = params(
            r#"{
                "fields": {"customfield_5": "$NOW"},
                "custom_fields": [{"id": 5, "value": "High", "type": "selectlist", "value_id": 99}]
            }"#,
        );

        let fields = FieldAssembler::new(&resolver)
            .assemble(&source(), &params, RequestKind::Update)
            .unwrap();
        assert_eq!(fields["customfield_5"], json!({"id": "99"}));
    }

    #[test]
    fn test_select_list_is_not_resolved() {
        let (_dir, resolver) = fixture();
        let params = params(
            r#"{"custom_fields": [{"id": 7, "value": "$NOW", "type": "selectlist"}]}"#,
        );

        let fields = FieldAssembler::new(&resolver)
            .assemble(&source(), &params, RequestKind::Update)
            .unwrap();
        assert_eq!(fields["customfield_7"], json!({"value": "$NOW"}));
    }

    #[test]
    fn test_free_text_custom_fields_are_resolved() {
        let (_dir, resolver) = fixture();
        let params = params(
            r#"{"custom_fields": [{"id": 10201, "value": "dave!"}, {"id": 2, "value": "$NOW+1d"}]}"#,
        );

        let fields = FieldAssembler::new(&resolver)
            .assemble(&source(), &params, RequestKind::Update)
            .unwrap();
        assert_eq!(fields["customfield_10201"], json!("dave!"));
        assert!(!fields["customfield_2"].as_str().unwrap().contains("$NOW"));
    }

    #[test]
    fn test_parent_and_project_linkage() {
        let (_dir, resolver) = fixture();
        let params = params(
            r#"{"summary": "child", "issue_type": "Sub-task", "parent": "ATP-1", "fields": {"project": "ignored"}}"#,
        );

        let fields = FieldAssembler::new(&resolver)
            .assemble(&source(), &params, RequestKind::Create)
            .unwrap();
        assert_eq!(fields["project"], json!({"key": "ATP"}));
        assert_eq!(fields["issuetype"], json!({"name": "Sub-task"}));
        assert_eq!(fields["parent"], json!({"key": "ATP-1"}));
    }

    #[test]
    fn test_missing_file_aborts_assembly() {
        let (_dir, resolver) = fixture();
        let params = params(r#"{"summary": {"file": "resources/missing"}}"#);

        let result =
            FieldAssembler::new(&resolver).assemble(&source(), &params, RequestKind::Create);
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
