use crate::constants::{demo, env, network};
use crate::errors::ConfigError;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// API credentials. Loaded once at startup and shared read-only; the secret
/// never leaves this type except to key the HMAC.
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
    partner_code: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        partner_code: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        let partner_code = partner_code.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyValue { name: env::API_KEY });
        }
        if api_secret.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: env::API_SECRET,
            });
        }
        if partner_code.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: env::PARTNER_CODE,
            });
        }
        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
            partner_code,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn partner_code(&self) -> &str {
        &self.partner_code
    }

    pub(crate) fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &self.api_secret)
            .field("partner_code", &self.partner_code)
            .finish()
    }
}

#[derive(Debug)]
pub struct AppConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub credentials: Arc<Credentials>,
}

impl AppConfig {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_millis(network::TIMEOUT_API_REQUEST_MS),
            credentials: Arc::new(credentials),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `BGW_*` variables, falling back to the public demo values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, fallback: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        let credentials = Credentials::new(
            read(env::API_KEY, demo::API_KEY),
            read(env::API_SECRET, demo::API_SECRET),
            read(env::PARTNER_CODE, demo::PARTNER_CODE),
        )?;
        let mut config = Self::new(&read(env::BASE_URL, network::DEFAULT_BASE_URL), credentials)?;

        if let Some(raw) = lookup(env::TIMEOUT_MS).filter(|value| !value.trim().is_empty()) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidNumber {
                    name: env::TIMEOUT_MS,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(trimmed.to_string()));
    }
    Ok(url)
}
