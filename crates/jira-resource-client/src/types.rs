//! JIRA API types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SEARCH_PATH: &str = "/rest/api/2/search/";
pub const ISSUE_PATH: &str = "/rest/api/2/issue/";

pub fn issue_path(issue_id: &str) -> String {
    format!("{ISSUE_PATH}{issue_id}")
}

pub fn watchers_path(issue_id: &str) -> String {
    format!("{ISSUE_PATH}{issue_id}/watchers/")
}

pub fn transitions_path(issue_id: &str) -> String {
    format!("{ISSUE_PATH}{issue_id}/transitions/")
}

pub fn comment_path(issue_id: &str) -> String {
    format!("{ISSUE_PATH}{issue_id}/comment/")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraTransition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitionList {
    #[serde(default)]
    pub transitions: Vec<JiraTransition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub jql: String,
    pub max_results: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueRequest {
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    pub transition: TransitionId,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionId {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    pub body: String,
}
