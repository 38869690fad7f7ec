//! reqwest-backed JIRA client

use crate::auth::JiraAuth;
use crate::transport::{ApiRequest, ApiResponse, JiraTransport, Method};
use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
}

impl JiraClient {
    /// Create a client for `base_url` authenticating with HTTP basic auth
    pub fn new(base_url: &str, auth: &JiraAuth) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth.header_value()?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        tracing::debug!("Authenticating to {} as {}", base_url, auth.username());

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!("{} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
        };

        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(ApiResponse::new(status, parse_body(&text)))
    }
}

impl JiraTransport for JiraClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.execute(request).await
    }
}

/// Empty bodies map to `None`; bodies that are not JSON are kept as text.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }

    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
