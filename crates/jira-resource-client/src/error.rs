//! Error types for the JIRA transport
//!
//! HTTP statuses are not errors here; callers judge them per endpoint.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("JIRA API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, Error>;
