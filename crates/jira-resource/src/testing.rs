//! Scripted transport for pipeline tests

use jira_resource_client::{ApiRequest, ApiResponse, Error, JiraTransport, Method, Result};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

type Reply = std::result::Result<ApiResponse, String>;

/// Replies to each `(method, path)` with its scripted responses in order.
/// The last scripted response repeats. Unscripted routes fail.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, status: u16, body: Option<Value>) -> Self {
        self.push(method, path, Ok(ApiResponse::new(status, body)))
    }

    pub fn fail(self, method: Method, path: &str, message: &str) -> Self {
        self.push(method, path, Err(message.to_string()))
    }

    fn push(self, method: Method, path: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

impl JiraTransport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let mut routes = self.routes.lock().unwrap();
        let queue = routes
            .get_mut(&(request.method, request.path.clone()))
            .ok_or_else(|| Error::Api(format!("unexpected {} {}", request.method, request.path)))?;

        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        reply
            .ok_or_else(|| Error::Api("no scripted reply".to_string()))?
            .map_err(Error::Api)
    }
}
