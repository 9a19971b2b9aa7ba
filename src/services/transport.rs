use crate::constants::{headers, limits, paths};
use crate::errors::ConfigError;
use crate::services::config::AppConfig;
use crate::services::signer::Signer;
use crate::utils::canonical_json::to_canonical_string;
use crate::utils::redact::redact_secrets;
use crate::utils::text::truncate_chars;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
}

impl TransportErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Request => "request",
            TransportErrorKind::Body => "body",
            TransportErrorKind::Decode => "decode",
        }
    }

    fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() {
            TransportErrorKind::Body
        } else if err.is_decode() {
            TransportErrorKind::Decode
        } else {
            TransportErrorKind::Request
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one signed request. Every remote failure lands here as a value;
/// nothing on this path panics or returns `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    /// HTTP 200 with a JSON payload that is not an application-level error.
    Success(Value),
    /// HTTP 200 whose payload carries a non-zero `status` or `code`.
    Upstream(Value),
    /// Any status other than 200. `message` holds the first 500 characters
    /// of the response body.
    HttpStatus { status: u16, message: String },
    Transport {
        kind: TransportErrorKind,
        message: String,
    },
}

impl ApiResult {
    /// Classifies a completed exchange.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::from_scrubbed_response(status, body, &[])
    }

    /// Like [`ApiResult::from_response`], removing `secrets` from a failure
    /// body before it is cut to the error length.
    pub fn from_scrubbed_response(status: u16, body: &str, secrets: &[&str]) -> Self {
        if status != 200 {
            return ApiResult::HttpStatus {
                status,
                message: truncate_chars(
                    &redact_secrets(body, secrets),
                    limits::ERROR_BODY_CHARS,
                ),
            };
        }
        match serde_json::from_str::<Value>(body) {
            Ok(value) if is_upstream_error(&value) => ApiResult::Upstream(value),
            Ok(value) => ApiResult::Success(value),
            Err(err) => ApiResult::Transport {
                kind: TransportErrorKind::Decode,
                message: format!("response is not valid JSON: {}", err),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn map_success<F>(self, shape: F) -> Self
    where
        F: FnOnce(Value) -> Value,
    {
        match self {
            ApiResult::Success(data) => ApiResult::Success(shape(data)),
            other => other,
        }
    }

    /// Caller-facing JSON: payloads verbatim, failures as
    /// `{"error": ..., "message": ...}`.
    pub fn into_value(self) -> Value {
        match self {
            ApiResult::Success(data) | ApiResult::Upstream(data) => data,
            ApiResult::HttpStatus { status, message } => serde_json::json!({
                "error": format!("HTTP {}", status),
                "message": message,
            }),
            ApiResult::Transport { kind, message } => serde_json::json!({
                "error": kind.as_str(),
                "message": message,
            }),
        }
    }
}

fn is_success_code(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => *flag,
        Value::Number(number) => matches!(number.as_i64(), Some(0) | Some(200)),
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty() && text.chars().all(|c| c == '0'))
                || text == "200"
                || text.eq_ignore_ascii_case("success")
                || text.eq_ignore_ascii_case("ok")
        }
        _ => false,
    }
}

fn is_upstream_error(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    ["status", "code"]
        .iter()
        .filter_map(|key| obj.get(*key))
        .any(|code| !is_success_code(code))
}

/// Whether `path` belongs to the swap namespace and must carry `Partner-Code`.
pub fn requires_partner_code(path: &str) -> bool {
    path.contains(paths::SWAP_NAMESPACE)
}

/// Serialized request body. Absent and empty-object bodies are sent as no
/// payload at all and signed as the empty string.
pub fn serialize_body(body: Option<&Value>) -> String {
    match body {
        None | Some(Value::Null) => String::new(),
        Some(Value::Object(map)) if map.is_empty() => String::new(),
        Some(value) => to_canonical_string(value),
    }
}

/// Everything that goes on the wire for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl SignedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn header_map(&self) -> Result<HeaderMap, String> {
        let mut map = HeaderMap::new();
        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| format!("invalid header name {}", key))?;
            let val = HeaderValue::from_str(value)
                .map_err(|_| format!("invalid value for header {}", key))?;
            map.insert(name, val);
        }
        Ok(map)
    }
}

/// The single network seam of the crate.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, path: &str, body: Option<&Value>) -> ApiResult;
}

/// Signs and sends requests to the configured base URL. Cheap to clone; the
/// underlying HTTP client and credentials are shared.
#[derive(Debug, Clone)]
pub struct SignedClient {
    base_url: String,
    signer: Signer,
    client: Client,
}

impl SignedClient {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: &AppConfig, client: Client) -> Self {
        Self {
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            signer: Signer::new(config.credentials.clone()),
            client,
        }
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Builds the signed request without sending it. The signature is
    /// computed over exactly the body string returned in the request.
    pub fn prepare(&self, path: &str, body: Option<&Value>, timestamp_millis: &str) -> SignedRequest {
        let body = serialize_body(body);
        let signature = self.signer.sign(path, &body, timestamp_millis);
        let credentials = self.signer.credentials();

        let mut wire_headers = vec![
            (headers::CONTENT_TYPE, "application/json".to_string()),
            (headers::API_KEY, credentials.api_key().to_string()),
            (headers::API_TIMESTAMP, timestamp_millis.to_string()),
            (headers::API_SIGNATURE, signature),
        ];
        if requires_partner_code(path) {
            wire_headers.push((headers::PARTNER_CODE, credentials.partner_code().to_string()));
        }

        SignedRequest {
            url: format!("{}{}", self.base_url, path),
            headers: wire_headers,
            body,
        }
    }

    /// Like [`Transport::post`] with a caller-chosen timestamp, for
    /// reproducible signatures.
    pub async fn post_with_timestamp(
        &self,
        path: &str,
        body: Option<&Value>,
        timestamp_millis: &str,
    ) -> ApiResult {
        let request = self.prepare(path, body, timestamp_millis);
        let credentials = self.signer.credentials();
        let secrets = [credentials.api_key(), credentials.api_secret()];
        self.send(path, request, &secrets).await
    }

    async fn send(&self, path: &str, request: SignedRequest, secrets: &[&str]) -> ApiResult {
        let header_map = match request.header_map() {
            Ok(map) => map,
            Err(message) => {
                return ApiResult::Transport {
                    kind: TransportErrorKind::Request,
                    message,
                }
            }
        };

        let mut builder = self.client.post(&request.url).headers(header_map);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        tracing::debug!(
            path,
            partner = requires_partner_code(path),
            "sending signed request"
        );
        let started = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return transport_failure(path, &err, secrets),
        };
        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return transport_failure(path, &err, secrets),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let result = ApiResult::from_scrubbed_response(status, &text, secrets);
        match &result {
            ApiResult::Success(_) => {
                tracing::info!(path, status, elapsed_ms, "request completed")
            }
            ApiResult::Upstream(_) => {
                tracing::warn!(path, status, elapsed_ms, "upstream returned an error payload")
            }
            _ => tracing::warn!(path, status, elapsed_ms, "request failed"),
        }
        result
    }
}

fn transport_failure(path: &str, err: &reqwest::Error, secrets: &[&str]) -> ApiResult {
    let kind = TransportErrorKind::from_reqwest(err);
    tracing::warn!(path, kind = kind.as_str(), "transport failure");
    ApiResult::Transport {
        kind,
        message: redact_secrets(&err.to_string(), secrets),
    }
}

#[async_trait]
impl Transport for SignedClient {
    async fn post(&self, path: &str, body: Option<&Value>) -> ApiResult {
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        self.post_with_timestamp(path, body, &timestamp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::Credentials;
    use crate::services::signer::{sign, SigningContext};
    use serde_json::json;

    fn client() -> SignedClient {
        let credentials = Credentials::new("key-1", "secret-1", "partner-1").unwrap();
        let config = AppConfig::new("https://api.example.test/", credentials).unwrap();
        SignedClient::new(&config).unwrap()
    }

    #[test]
    fn prepared_body_is_the_signed_body() {
        let client = client();
        let body = json!({"toChain": "sol", "fromChain": "sol", "estimateGas": true});
        let request = client.prepare(paths::SWAP_QUOTE, Some(&body), "1700000000000");

        assert_eq!(
            request.body,
            r#"{"estimateGas":true,"fromChain":"sol","toChain":"sol"}"#
        );
        let expected = sign(
            &SigningContext {
                api_path: paths::SWAP_QUOTE,
                body: &request.body,
                api_key: "key-1",
                timestamp_millis: "1700000000000",
            },
            "secret-1",
        );
        assert_eq!(request.header("x-api-signature"), Some(expected.as_str()));
        assert_eq!(request.url, "https://api.example.test/bgw-pro/swapx/pro/quote");
    }

    #[test]
    fn sets_auth_headers() {
        let request = client().prepare(paths::KLINE, Some(&json!({"chain": "sol"})), "42");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("x-api-key"), Some("key-1"));
        assert_eq!(request.header("x-api-timestamp"), Some("42"));
        assert!(request.header("x-api-signature").is_some());
    }

    #[test]
    fn partner_code_only_on_swap_paths() {
        let client = client();
        let swap = client.prepare(paths::SWAP_CALLDATA, Some(&json!({"a": 1})), "1");
        assert_eq!(swap.header("Partner-Code"), Some("partner-1"));

        for path in [
            paths::TOKEN_BASE_INFO,
            paths::KLINE,
            paths::TX_INFO,
            paths::TOP_RANK,
            paths::POOL_LIST,
            paths::SECURITY_AUDIT,
        ] {
            let request = client.prepare(path, Some(&json!({"a": 1})), "1");
            assert_eq!(request.header("Partner-Code"), None, "{}", path);
        }
    }

    #[test]
    fn empty_bodies_serialize_to_empty_string() {
        assert_eq!(serialize_body(None), "");
        assert_eq!(serialize_body(Some(&Value::Null)), "");
        assert_eq!(serialize_body(Some(&json!({}))), "");
        let request = client().prepare("/p", None, "1");
        assert_eq!(request.body, "");
    }

    #[test]
    fn non_200_maps_to_http_error() {
        let result = ApiResult::from_response(500, "server error");
        assert_eq!(
            result.clone().into_value(),
            json!({"error": "HTTP 500", "message": "server error"})
        );
        assert!(result.is_failure());
    }

    #[test]
    fn http_error_body_is_capped_at_500_chars() {
        let body = "x".repeat(2_000);
        let ApiResult::HttpStatus { message, .. } = ApiResult::from_response(502, &body) else {
            panic!("expected HttpStatus");
        };
        assert_eq!(message.chars().count(), 500);
    }

    #[test]
    fn classifies_upstream_error_payloads() {
        assert!(matches!(
            ApiResult::from_response(200, r#"{"status":0,"data":{"list":[]}}"#),
            ApiResult::Success(_)
        ));
        assert!(matches!(
            ApiResult::from_response(200, r#"{"data":{"list":[]}}"#),
            ApiResult::Success(_)
        ));
        assert!(matches!(
            ApiResult::from_response(200, r#"{"status":1,"msg":"bad chain"}"#),
            ApiResult::Upstream(_)
        ));
        assert!(matches!(
            ApiResult::from_response(200, r#"{"code":"40001","msg":"sign error"}"#),
            ApiResult::Upstream(_)
        ));
    }

    #[test]
    fn upstream_payload_passes_through_unchanged() {
        let raw = json!({"status": 1, "msg": "bad chain"});
        let result = ApiResult::from_response(200, &raw.to_string());
        assert_eq!(result.into_value(), raw);
    }

    #[test]
    fn invalid_json_on_200_is_a_decode_failure() {
        let result = ApiResult::from_response(200, "<html>");
        let ApiResult::Transport { kind, .. } = &result else {
            panic!("expected Transport");
        };
        assert_eq!(*kind, TransportErrorKind::Decode);
        assert_eq!(result.into_value()["error"], "decode");
    }

    #[test]
    fn redaction_scrubs_credentials_from_failures() {
        let result =
            ApiResult::from_scrubbed_response(401, "bad key key-1 / secret-1", &["key-1", "secret-1"]);
        assert_eq!(
            result.into_value()["message"],
            "bad key [REDACTED] / [REDACTED]"
        );
    }

    #[test]
    fn credential_straddling_the_cap_is_scrubbed_first() {
        let body = format!("{}secret-1", "x".repeat(495));
        let ApiResult::HttpStatus { message, .. } =
            ApiResult::from_scrubbed_response(400, &body, &["key-1", "secret-1"])
        else {
            panic!("expected HttpStatus");
        };
        assert!(!message.contains("secre"));
        assert!(message.ends_with("[REDA"));
        assert_eq!(message.chars().count(), 500);
    }

    #[test]
    fn success_bodies_are_not_scrubbed() {
        let result = ApiResult::from_scrubbed_response(200, r#"{"echo":"key-1"}"#, &["key-1"]);
        assert_eq!(result, ApiResult::Success(json!({"echo": "key-1"})));
    }

    #[test]
    fn map_success_leaves_failures_untouched() {
        let failure = ApiResult::from_response(404, "nope");
        assert_eq!(failure.clone().map_success(|_| json!(1)), failure);
        let success = ApiResult::Success(json!({"a": 1})).map_success(|v| v["a"].clone());
        assert_eq!(success, ApiResult::Success(json!(1)));
    }
}
