#![allow(dead_code)]

use async_trait::async_trait;
use bgw_mcp::services::config::{AppConfig, Credentials};
use bgw_mcp::services::transport::{ApiResult, SignedClient, Transport};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::sync::Mutex;

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";
pub const PARTNER_CODE: &str = "test-partner";
pub const TIMESTAMP: &str = "1700000000000";

pub fn test_config(base_url: &str) -> AppConfig {
    let credentials = Credentials::new(API_KEY, API_SECRET, PARTNER_CODE).unwrap();
    AppConfig::new(base_url, credentials).unwrap()
}

pub fn test_client(base_url: &str) -> SignedClient {
    SignedClient::new(&test_config(base_url)).unwrap()
}

pub fn test_client_with_timeout(base_url: &str, timeout: Duration) -> SignedClient {
    SignedClient::new(&test_config(base_url).with_timeout(timeout)).unwrap()
}

/// Records every call and answers with a fixed result.
pub struct RecordingTransport {
    calls: StdMutex<Vec<(String, Option<Value>)>>,
    reply: ApiResult,
}

impl RecordingTransport {
    pub fn replying(reply: ApiResult) -> Self {
        Self {
            calls: StdMutex::new(Vec::new()),
            reply,
        }
    }

    pub fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, path: &str, body: Option<&Value>) -> ApiResult {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), body.cloned()));
        self.reply.clone()
    }
}
