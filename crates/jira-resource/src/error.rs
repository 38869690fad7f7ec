//! Errors surfaced by the reconciliation pipeline

/// Pipeline error
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error(transparent)]
    Core(#[from] jira_resource_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] jira_resource_client::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Search issue failed: {0}")]
    Search(String),

    #[error("Could not create issue.")]
    Create,

    #[error("Could not update Jira.")]
    Update { key: String, status: u16 },

    #[error("Could not add watcher {watcher} to {key} (status {status})")]
    Watcher {
        key: String,
        watcher: String,
        status: u16,
    },

    #[error("Could not add comment to {key} (status {status})")]
    Comment { key: String, status: u16 },

    #[error(
        "Transition \"{name}\" is not available for {key}. Available transitions: [{}]",
        available.join(", ")
    )]
    TransitionNotFound {
        key: String,
        name: String,
        available: Vec<String>,
    },

    #[error("Could not perform transition \"{name}\" on {key} (status {status})")]
    Transition {
        key: String,
        name: String,
        status: u16,
    },

    #[error("No issue was created or updated")]
    NoIssues,
}

pub type Result<T> = std::result::Result<T, ResourceError>;
