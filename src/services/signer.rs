use crate::constants::headers;
use crate::services::config::Credentials;
use crate::utils::canonical_json::to_canonical_string;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// The four values covered by a request signature. Built fresh for every
/// request.
#[derive(Debug, Clone, Copy)]
pub struct SigningContext<'a> {
    pub api_path: &'a str,
    pub body: &'a str,
    pub api_key: &'a str,
    pub timestamp_millis: &'a str,
}

impl SigningContext<'_> {
    /// Compact JSON object with keys in byte order:
    /// `apiPath`, `body`, `x-api-key`, `x-api-timestamp`.
    pub fn canonical_payload(&self) -> String {
        let mut content = Map::new();
        content.insert(
            headers::API_TIMESTAMP.to_string(),
            Value::String(self.timestamp_millis.to_string()),
        );
        content.insert(
            headers::API_KEY.to_string(),
            Value::String(self.api_key.to_string()),
        );
        content.insert("body".to_string(), Value::String(self.body.to_string()));
        content.insert(
            "apiPath".to_string(),
            Value::String(self.api_path.to_string()),
        );
        to_canonical_string(&Value::Object(content))
    }
}

/// HMAC-SHA256 over the canonical payload, keyed by `secret`, base64 encoded
/// with the standard padded alphabet.
pub fn sign(context: &SigningContext<'_>, secret: &str) -> String {
    let payload = context.canonical_payload();
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(payload.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// Signs on behalf of one set of credentials.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Arc<Credentials>,
}

impl Signer {
    pub fn new(credentials: Arc<Credentials>) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn sign(&self, api_path: &str, body: &str, timestamp_millis: &str) -> String {
        let context = SigningContext {
            api_path,
            body,
            api_key: self.credentials.api_key(),
            timestamp_millis,
        };
        sign(&context, self.credentials.api_secret())
    }
}
