//! Watchers, transitions and comments for reconciled issues

use crate::error::{ResourceError, Result};
use crate::transitions::TransitionStateMachine;
use futures::future::join_all;
use jira_resource_client::{
    comment_path, watchers_path, ApiRequest, CommentRequest, JiraIssue, JiraTransport,
};
use jira_resource_core::models::{CommentSpec, OutParams};
use jira_resource_core::ValueResolver;
use std::future::Future;

/// Runs the post-issue stages over every reconciled issue.
///
/// Stages run in a fixed order: watchers, transitions, comments. Within a
/// stage the issues are handled concurrently and the stage completes for all
/// of them before the next one starts.
pub struct PostIssueWorkflow<'a, T> {
    transport: &'a T,
    resolver: &'a ValueResolver,
}

impl<'a, T: JiraTransport> PostIssueWorkflow<'a, T> {
    pub fn new(transport: &'a T, resolver: &'a ValueResolver) -> Self {
        Self {
            transport,
            resolver,
        }
    }

    pub async fn run(&self, issues: Vec<JiraIssue>, params: &OutParams) -> Result<Vec<JiraIssue>> {
        for_each(&issues, move |issue| self.add_watchers(issue, &params.watchers)).await?;
        for_each(&issues, move |issue| {
            self.process_transitions(issue, &params.transitions)
        })
        .await?;
        for_each(&issues, move |issue| self.add_comments(issue, &params.comments)).await?;

        Ok(issues)
    }

    /// Add each watcher in order, stopping at the first failure
    pub async fn add_watchers(&self, issue: &JiraIssue, watchers: &[String]) -> Result<()> {
        if watchers.is_empty() {
            return Ok(());
        }

        tracing::info!("Adding watchers to {}...", issue.key);

        for watcher in watchers {
            tracing::debug!("Adding: {}", watcher);

            let response = self
                .transport
                .send(ApiRequest::post(watchers_path(&issue.id), watcher)?)
                .await?;
            response.log();

            if !response.is_success() {
                return Err(ResourceError::Watcher {
                    key: issue.key.clone(),
                    watcher: watcher.clone(),
                    status: response.status,
                });
            }
        }

        Ok(())
    }

    pub async fn process_transitions(&self, issue: &JiraIssue, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        TransitionStateMachine::new(self.transport)
            .run(issue, names)
            .await
    }

    /// Resolve and post each comment in order, stopping at the first failure
    pub async fn add_comments(&self, issue: &JiraIssue, comments: &[CommentSpec]) -> Result<()> {
        if comments.is_empty() {
            return Ok(());
        }

        tracing::info!("Adding comments to {}...", issue.key);

        for comment in comments {
            let body = self.resolver.resolve(&comment.content)?;
            tracing::debug!("Adding: {}", body);

            let response = self
                .transport
                .send(ApiRequest::post(comment_path(&issue.id), &CommentRequest { body })?)
                .await?;
            response.log();

            if !response.is_success() {
                return Err(ResourceError::Comment {
                    key: issue.key.clone(),
                    status: response.status,
                });
            }
        }

        Ok(())
    }
}

/// Run `stage` for every issue concurrently and wait for all of them; the
/// first failure in issue order is returned.
async fn for_each<'i, F, Fut>(issues: &'i [JiraIssue], stage: F) -> Result<()>
where
    F: FnMut(&'i JiraIssue) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    join_all(issues.iter().map(stage))
        .await
        .into_iter()
        .collect()
}
