//! Workflow transitions by name

use crate::error::{ResourceError, Result};
use jira_resource_client::{
    transitions_path, ApiRequest, JiraIssue, JiraTransition, JiraTransport, TransitionId,
    TransitionList, TransitionRequest,
};

/// Drives an issue through named transitions, one at a time.
///
/// The available transitions are fetched again before every step since each
/// executed transition changes them. The sequence stops at the first failure;
/// transitions already performed stay performed.
pub struct TransitionStateMachine<'a, T> {
    transport: &'a T,
}

impl<'a, T: JiraTransport> TransitionStateMachine<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub async fn run(&self, issue: &JiraIssue, names: &[String]) -> Result<()> {
        let mut pending = names.iter();

        while let Some(name) = pending.next() {
            let available = self.available(issue, name).await?;

            let transition = select(&available, name).ok_or_else(|| {
                ResourceError::TransitionNotFound {
                    key: issue.key.clone(),
                    name: name.clone(),
                    available: available.iter().map(|t| t.name.clone()).collect(),
                }
            })?;

            self.perform(issue, name, transition).await?;
            tracing::debug!("{} transitions remaining for {}", pending.len(), issue.key);
        }

        Ok(())
    }

    async fn available(&self, issue: &JiraIssue, name: &str) -> Result<Vec<JiraTransition>> {
        tracing::debug!("Searching for available transitions...");

        let response = self
            .transport
            .send(ApiRequest::get(transitions_path(&issue.id)))
            .await?;
        response.log();

        if !response.is_success() {
            return Err(ResourceError::Transition {
                key: issue.key.clone(),
                name: name.to_string(),
                status: response.status,
            });
        }

        let list: TransitionList = match response.body {
            Some(body) => serde_json::from_value(body)?,
            None => TransitionList::default(),
        };

        Ok(list.transitions)
    }

    async fn perform(&self, issue: &JiraIssue, name: &str, transition: &JiraTransition) -> Result<()> {
        tracing::info!("Performing transition: {} ({})", name, transition.id);

        let request = TransitionRequest {
            transition: TransitionId {
                id: transition.id.clone(),
            },
        };

        let response = self
            .transport
            .send(ApiRequest::post(transitions_path(&issue.id), &request)?)
            .await?;
        response.log();

        if !response.is_success() {
            return Err(ResourceError::Transition {
                key: issue.key.clone(),
                name: name.to_string(),
                status: response.status,
            });
        }

        Ok(())
    }
}

/// First available transition whose name matches, ignoring case
pub fn select<'t>(available: &'t [JiraTransition], name: &str) -> Option<&'t JiraTransition> {
    let wanted = name.to_lowercase();
    available.iter().find(|t| t.name.to_lowercase() == wanted)
}
