//! Concourse `check`, `in` and `out`

use crate::error::{ResourceError, Result};
use crate::reconcile::IssueReconciler;
use crate::search::IssueSearcher;
use crate::workflow::PostIssueWorkflow;
use jira_resource_client::JiraTransport;
use jira_resource_core::models::{OutParams, Source};
use jira_resource_core::{BuildMetadata, FieldAssembler, ValueResolver};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub type Version = BTreeMap<String, String>;

/// The single version this resource reports
pub fn none_version() -> Version {
    Version::from([("ref".to_string(), "none".to_string())])
}

/// Request for `check` and `in`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionRequest {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutRequest {
    pub source: Source,
    #[serde(default)]
    pub params: OutParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionResponse {
    pub version: Version,
    pub metadata: Vec<MetadataField>,
}

/// The resource has no versions of its own to discover
pub fn check(_request: &VersionRequest) -> Vec<Version> {
    Vec::new()
}

/// Echo the requested version without touching the tracker
pub fn fetch(request: &VersionRequest) -> VersionResponse {
    VersionResponse {
        version: request.version.clone().unwrap_or_else(none_version),
        metadata: Vec::new(),
    }
}

/// Search, reconcile, then run watchers, transitions and comments.
/// Files referenced by the params are read relative to `base_dir`.
pub async fn out<T: JiraTransport>(
    transport: &T,
    request: &OutRequest,
    base_dir: &Path,
    build: BuildMetadata,
) -> Result<VersionResponse> {
    let source = &request.source;
    let params = &request.params;
    source.validate()?;

    let resolver = ValueResolver::new(base_dir, build);

    let matched = IssueSearcher::new(transport, &resolver)
        .search(source, params)
        .await?;

    let issues = IssueReconciler::new(transport, FieldAssembler::new(&resolver))
        .reconcile(matched, source, params)
        .await?;

    let issues = PostIssueWorkflow::new(transport, &resolver)
        .run(issues, params)
        .await?;

    if issues.is_empty() {
        return Err(ResourceError::NoIssues);
    }

    let metadata = issues
        .iter()
        .map(|issue| MetadataField {
            name: issue.key.clone(),
            value: source.issue_link(&issue.key),
        })
        .collect();

    Ok(VersionResponse {
        version: none_version(),
        metadata,
    })
}
