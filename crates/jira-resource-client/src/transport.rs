//! The request/response seam between the reconciliation pipeline and HTTP

use crate::Result;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        })
    }
}

/// A JSON request against a path below the Jira base url
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    pub fn put(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Ok(Self {
            method: Method::Put,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` when the response had no body
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Log the response the way every pipeline stage does
    pub fn log(&self) {
        match &self.body {
            Some(body) => tracing::debug!("Response: ({}) {:#}", self.status, body),
            None => tracing::debug!("Response: ({}) -empty body-", self.status),
        }
    }
}

/// Sends authenticated JSON requests to Jira.
///
/// Transport failures are errors; any HTTP status is a response.
pub trait JiraTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send;
}
