//! Jira Resource Client
//!
//! Authenticated JSON transport for the Jira REST API v2.

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::JiraClient;
pub use error::{Error, Result};
pub use transport::{ApiRequest, ApiResponse, JiraTransport, Method};
pub use types::*;
