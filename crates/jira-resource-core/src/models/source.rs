//! Resource source configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// The `source` block of a Concourse resource definition.
///
/// Credentials may be given either as `email`/`apitoken` (Jira Cloud) or as
/// `username`/`password` (Jira Server); both schemes are equivalent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Source {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apitoken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub debug: bool,
}

/// Basic auth credentials resolved from a [`Source`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Source {
    /// Validate the source configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::Validation("Jira url cannot be empty".to_string()));
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(Error::Validation(
                "Jira url must start with http:// or https://".to_string(),
            ));
        }

        if self.project.trim().is_empty() {
            return Err(Error::Validation("Project cannot be empty".to_string()));
        }

        if self.credentials().is_none() {
            return Err(Error::Validation(
                "Either email/apitoken or username/password must be set".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective credentials, preferring `email`/`apitoken` over
    /// `username`/`password`
    pub fn credentials(&self) -> Option<Credentials> {
        let pair = |user: &Option<String>, secret: &Option<String>| match (user, secret) {
            (Some(user), Some(secret)) => Some(Credentials {
                username: user.clone(),
                password: secret.clone(),
            }),
            _ => None,
        };

        pair(&self.email, &self.apitoken).or_else(|| pair(&self.username, &self.password))
    }

    /// Base url without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Deep link into the tracker's quick search for an issue key
    pub fn issue_link(&self, key: &str) -> String {
        format!(
            "{}/secure/QuickSearch.jspa?searchString={}",
            self.base_url(),
            key
        )
    }
}
