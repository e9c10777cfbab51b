//! Blocking client for the OnlineHashCrack v2 endpoint.
//!
//! One POST per operation, fixed timeouts, no retries: repeated calls
//! against this service escalate rate limiting, so a failed request is
//! surfaced to the caller instead of retried. Responses are kept as loose
//! JSON because only the `success` flag and the task `hash` fields are
//! interpreted; everything else is passed through for display.
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::Config;
use crate::error::Error;

/// Longest raw-body excerpt kept when a response fails to parse as JSON.
const RAW_BODY_LIMIT_CHARS: usize = 4000;

/// Parsed response body plus the transport status it arrived with.
///
/// The status is carried alongside the body, never merged into it.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// True when the transport status is below 400 and the body carries an
    /// explicit `success: true`.
    pub fn is_success(&self) -> bool {
        self.status < 400
            && self
                .body
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }

    /// Best available failure description from the body.
    pub fn error_message(&self) -> String {
        for key in ["message", "text"] {
            if let Some(msg) = self.body.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
        "unknown error".to_string()
    }
}

/// The two calls the service supports. `OhcClient` is the real transport;
/// tests substitute scripted implementations.
pub trait TaskClient {
    /// List the tasks currently on the account.
    fn fetch_tasks(&self) -> Result<ApiResponse, Error>;

    /// Submit up to the per-request cap of new hashes in one batch. The
    /// caller is responsible for enforcing the cap.
    fn submit(&self, hashes: &[String]) -> Result<ApiResponse, Error>;
}

#[derive(Serialize)]
struct ListTasksRequest<'a> {
    api_key: &'a str,
    agree_terms: &'a str,
    action: &'a str,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    api_key: &'a str,
    agree_terms: &'a str,
    algo_mode: u32,
    hashes: &'a [String],
}

pub struct OhcClient {
    http: Client,
    config: Config,
}

impl OhcClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Single POST to the fixed endpoint. A body that is not JSON becomes a
    /// synthetic failure object carrying the raw text, truncated.
    fn post<T: Serialize>(&self, payload: &T, timeout: Duration) -> Result<ApiResponse, Error> {
        let resp = self
            .http
            .post(&self.config.api_url)
            .json(payload)
            .timeout(timeout)
            .send()
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let text = resp.text().map_err(|e| Error::Network(e.to_string()))?;
        let body = serde_json::from_str(&text).unwrap_or_else(|_| {
            json!({
                "success": false,
                "text": truncate_chars(&text, RAW_BODY_LIMIT_CHARS),
            })
        });
        Ok(ApiResponse { status, body })
    }
}

impl TaskClient for OhcClient {
    fn fetch_tasks(&self) -> Result<ApiResponse, Error> {
        let payload = ListTasksRequest {
            api_key: &self.config.api_key,
            agree_terms: &self.config.agree_terms,
            action: "list_tasks",
        };
        self.post(&payload, self.config.list_timeout)
    }

    fn submit(&self, hashes: &[String]) -> Result<ApiResponse, Error> {
        let payload = SubmitRequest {
            api_key: &self.config.api_key,
            agree_terms: &self.config.agree_terms,
            algo_mode: self.config.algo_mode,
            hashes,
        };
        self.post(&payload, self.config.submit_timeout)
    }
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}
