use thiserror::Error;

/// Startup failures. These abort the process; nothing at request time
/// produces one.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    EmptyValue { name: &'static str },

    #[error("invalid base url `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base url `{0}` must use http or https")]
    UnsupportedScheme(String),

    #[error("{name} must be a positive integer, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("tool wiring is incomplete: {}", missing.join(", "))]
    IncompleteWiring { missing: Vec<String> },
}
