//! Create-or-update decision for the searched issues

use crate::error::{ResourceError, Result};
use futures::future::join_all;
use jira_resource_client::{
    issue_path, ApiRequest, IssueRequest, JiraIssue, JiraTransport, ISSUE_PATH,
};
use jira_resource_core::models::{OutParams, Source};
use jira_resource_core::{FieldAssembler, RequestKind};

pub struct IssueReconciler<'a, T> {
    transport: &'a T,
    assembler: FieldAssembler<'a>,
}

impl<'a, T: JiraTransport> IssueReconciler<'a, T> {
    pub fn new(transport: &'a T, assembler: FieldAssembler<'a>) -> Self {
        Self {
            transport,
            assembler,
        }
    }

    /// Create an issue when nothing matched, otherwise update every match.
    ///
    /// Updates run concurrently; all of them are attempted and the first
    /// failure, in match order, is returned.
    pub async fn reconcile(
        &self,
        matched: Vec<JiraIssue>,
        source: &Source,
        params: &OutParams,
    ) -> Result<Vec<JiraIssue>> {
        if matched.is_empty() {
            return Ok(vec![self.create(source, params).await?]);
        }

        join_all(
            matched
                .iter()
                .map(|issue| self.update(issue, source, params)),
        )
        .await
        .into_iter()
        .collect()
    }

    pub async fn create(&self, source: &Source, params: &OutParams) -> Result<JiraIssue> {
        tracing::info!("Issue doesn't exist, creating new issue...");

        let fields = self.assembler.assemble(source, params, RequestKind::Create)?;
        let issue = IssueRequest { fields };
        tracing::debug!("Sending issue: {:#}", serde_json::to_value(&issue)?);

        let response = self
            .transport
            .send(ApiRequest::post(ISSUE_PATH, &issue)?)
            .await?;
        response.log();

        if !response.is_success() {
            tracing::warn!("Create rejected with status {}", response.status);
            return Err(ResourceError::Create);
        }

        let Some(body) = response.body else {
            tracing::warn!("Create returned status {} without a body", response.status);
            return Err(ResourceError::Create);
        };

        serde_json::from_value(body).map_err(|e| {
            tracing::warn!("Create returned an unusable body: {}", e);
            ResourceError::Create
        })
    }

    /// Update `issue` in place. Jira returns no representation, so the
    /// matched issue itself is returned.
    pub async fn update(
        &self,
        issue: &JiraIssue,
        source: &Source,
        params: &OutParams,
    ) -> Result<JiraIssue> {
        tracing::info!("Issue exists [{}], updating issue...", issue.key);

        let fields = self.assembler.assemble(source, params, RequestKind::Update)?;
        let request = IssueRequest { fields };
        tracing::debug!("Sending issue: {:#}", serde_json::to_value(&request)?);

        let response = self
            .transport
            .send(ApiRequest::put(issue_path(&issue.id), &request)?)
            .await?;
        response.log();

        if !response.is_success() {
            return Err(ResourceError::Update {
                key: issue.key.clone(),
                status: response.status,
            });
        }

        Ok(issue.clone())
    }
}
