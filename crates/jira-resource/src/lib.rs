//! Jira Resource
//!
//! Concourse resource that reconciles a declared issue state against a Jira
//! project. Exposed as a library for testing.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod search;
pub mod transitions;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use commands::{OutRequest, VersionRequest, VersionResponse};
pub use error::{ResourceError, Result};
pub use reconcile::IssueReconciler;
pub use search::IssueSearcher;
pub use transitions::TransitionStateMachine;
pub use workflow::PostIssueWorkflow;
