use crate::errors::ConfigError;
use crate::managers::endpoints::{endpoint_by_name, ENDPOINTS};
use crate::mcp::catalog::{tool_by_name, tool_catalog};
use crate::services::config::AppConfig;
use crate::services::dispatcher::Dispatcher;
use crate::services::transport::{SignedClient, Transport};
use std::sync::Arc;

/// Everything built once at startup and shared read-only afterwards.
pub struct App {
    pub dispatcher: Arc<Dispatcher>,
}

impl App {
    /// Every catalog tool needs an endpoint and every endpoint a schema.
    fn validate_tool_wiring() -> Result<(), ConfigError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| endpoint_by_name(&tool.name).is_none())
            .map(|tool| format!("{} (no endpoint)", tool.name))
            .collect();
        missing.extend(
            ENDPOINTS
                .iter()
                .filter(|endpoint| tool_by_name(endpoint.name).is_none())
                .map(|endpoint| format!("{} (no schema)", endpoint.name)),
        );
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ConfigError::IncompleteWiring { missing })
    }

    pub fn initialize(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = SignedClient::new(config)?;
        tracing::info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            "signed client ready"
        );
        Self::with_transport(Arc::new(client))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        Self::validate_tool_wiring()?;
        Ok(Self {
            dispatcher: Arc::new(Dispatcher::new(transport)),
        })
    }
}
