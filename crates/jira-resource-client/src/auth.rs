//! JIRA basic authentication
//!
//! Jira Cloud takes an account email with an API token, Jira Server a
//! username with a password. Both travel as HTTP basic auth.

use crate::{Error, Result};
use reqwest::header::HeaderValue;
use std::fmt;

pub struct JiraAuth {
    username: String,
    secret: String,
}

impl JiraAuth {
    pub fn basic(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.username, self.secret);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }

    /// `Authorization` header value, marked sensitive so it is never logged
    pub fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.to_basic_auth())
            .map_err(|e| Error::Auth(format!("Invalid credentials for {}: {e}", self.username)))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraAuth")
            .field("username", &self.username)
            .field("secret", &"***")
            .finish()
    }
}
