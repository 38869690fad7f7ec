//! Issue lookup by key or summary

use crate::error::{ResourceError, Result};
use jira_resource_client::{
    ApiRequest, JiraIssue, JiraTransport, SearchRequest, SearchResponse, SEARCH_PATH,
};
use jira_resource_core::models::{OutParams, Source};
use jira_resource_core::{Error as CoreError, ValueResolver};
use serde_json::Value;
use std::collections::BTreeMap;

/// Finds the issues a `put` step refers to
pub struct IssueSearcher<'a, T> {
    transport: &'a T,
    resolver: &'a ValueResolver,
}

impl<'a, T: JiraTransport> IssueSearcher<'a, T> {
    pub fn new(transport: &'a T, resolver: &'a ValueResolver) -> Self {
        Self {
            transport,
            resolver,
        }
    }

    /// Search by `issue_key` when it resolves to a non-blank key, otherwise
    /// by `summary`.
    /// No match is an empty list.
    pub async fn search(&self, source: &Source, params: &OutParams) -> Result<Vec<JiraIssue>> {
        let query = self.query(source, params)?;
        tracing::debug!("Sending search: {}", query.jql);

        let response = self
            .transport
            .send(ApiRequest::post(SEARCH_PATH, &query)?)
            .await?;
        response.log();

        if !response.is_success() {
            return Err(ResourceError::Search(format!("status {}", response.status)));
        }

        let body = response
            .body
            .ok_or_else(|| ResourceError::Search("empty response body".to_string()))?;
        let found: SearchResponse = serde_json::from_value(body)?;

        Ok(found.issues)
    }

    pub fn query(&self, source: &Source, params: &OutParams) -> Result<SearchRequest> {
        let filters = filter_clause(&params.search_filters);

        let issue_key = match &params.issue_key {
            Some(issue_key) => Some(self.resolver.resolve(issue_key)?),
            None => None,
        };
        let summary = params.summary.as_ref().filter(|summary| !summary.is_empty());

        let (jql, max_results) = if let Some(issue_key) =
            issue_key.filter(|key| !key.trim().is_empty())
        {
            tracing::info!("Searching for issue by key: {}", issue_key);
            key_query(&source.project, &issue_key, &filters)
        } else if let Some(summary) = summary {
            let summary = self.resolver.resolve(summary)?;
            tracing::info!("Searching for issue by summary: {}", summary);
            summary_query(&source.project, &summary, &filters)
        } else {
            return Err(CoreError::Validation(
                "summary or issue_key is required to search for an issue".to_string(),
            )
            .into());
        };

        Ok(SearchRequest {
            jql,
            max_results,
            fields: vec!["key".to_string(), "summary".to_string()],
        })
    }
}

fn key_query(project: &str, issue_key: &str, filters: &str) -> (String, usize) {
    let count = issue_key.split(',').count();

    let jql = if count > 1 {
        format!("project=\"{project}\" AND key IN ({issue_key}) {filters} ORDER BY id DESC")
    } else {
        format!("project=\"{project}\" AND key=\"{issue_key}\" {filters} ORDER BY id DESC")
    };

    (jql, count)
}

fn summary_query(project: &str, summary: &str, filters: &str) -> (String, usize) {
    (
        format!("project=\"{project}\" AND summary~\"{summary}\" {filters} ORDER BY id DESC"),
        1,
    )
}

/// `AND field="value" ...` for each search filter, or empty
pub fn filter_clause(filters: &BTreeMap<String, Value>) -> String {
    if filters.is_empty() {
        return String::new();
    }

    let clauses: Vec<String> = filters
        .iter()
        .map(|(field, value)| match value {
            Value::String(text) => format!("{field}=\"{text}\""),
            other => format!("{field}=\"{other}\""),
        })
        .collect();

    format!("AND {}", clauses.join(" AND "))
}
