use crate::constants::DEFAULT_METHOD;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::time::Duration;

/// A fully resolved request for one case of a scene, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub scene_name: String,
    pub case_name: String,
    pub method: String,
    pub url: String,
    pub headers: IndexMap<String, String>,
    /// Query string for GET, form body for every other method
    pub payload: IndexMap<String, String>,
}

impl PreparedRequest {
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case(DEFAULT_METHOD)
    }
}

/// HTTP response data
#[derive(Debug, Clone)]
pub struct Response {
    pub status_code: u16,
    /// lower-cased header names; repeated headers keep the last value
    pub headers: HashMap<String, String>,
    /// every `Set-Cookie` line in the order received
    pub set_cookies: Vec<String>,
    pub body: String,
    pub latency: Duration,
}

/// Execution result for a single case
#[derive(Debug)]
pub struct ExecutionResult {
    pub scene_name: String,
    pub case_name: String,
    pub success: bool,
    pub response: Option<Response>,
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn failed(scene_name: &str, case_name: &str, error: String) -> Self {
        Self {
            scene_name: scene_name.to_string(),
            case_name: case_name.to_string(),
            success: false,
            response: None,
            error: Some(error),
        }
    }
}
