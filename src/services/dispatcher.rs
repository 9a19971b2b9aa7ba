use crate::constants::limits::SUGGESTION_LIMIT;
use crate::errors::ToolError;
use crate::managers::endpoints::{endpoint_by_name, endpoint_names, Endpoint};
use crate::mcp::catalog::validate_tool_args;
use crate::services::transport::{ApiResult, Transport};
use crate::services::validation::Validation;
use crate::utils::suggest::suggest;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Routes a named operation to its endpoint: validate, build the body, make
/// exactly one transport call, shape the result.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    validation: Validation,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            validation: Validation::new(),
        }
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        endpoint_names()
    }

    fn resolve(&self, name: &str) -> Result<&'static Endpoint, ToolError> {
        if let Some(endpoint) = endpoint_by_name(name) {
            return Ok(endpoint);
        }
        let names = endpoint_names();
        let suggestions = suggest(name, &names, SUGGESTION_LIMIT);
        let hint = if suggestions.is_empty() {
            format!("Available tools: {}", names.join(", "))
        } else {
            format!("Did you mean: {}", suggestions.join(", "))
        };
        Err(ToolError::not_found(format!("Unknown tool: {}", name)).with_hint(hint))
    }

    /// Runs one operation. `Err` means the call was rejected locally and no
    /// request was sent; remote failures come back inside the `ApiResult`.
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<ApiResult, ToolError> {
        let endpoint = self.resolve(name)?;
        let args = match args {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        validate_tool_args(endpoint.name, &args)?;
        let body = (endpoint.build)(&self.validation, args)?;

        let started = Instant::now();
        let result = self.transport.post(endpoint.path, Some(&body)).await;
        tracing::info!(
            tool = endpoint.name,
            path = endpoint.path,
            ok = result.is_success(),
            duration_ms = started.elapsed().as_millis() as u64,
            "tool call finished"
        );

        let shaper = endpoint.shaper;
        Ok(result.map_success(|response| shaper.apply(response, &body)))
    }

    /// [`Dispatcher::dispatch`] flattened to the caller-facing JSON value.
    pub async fn call(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        Ok(self.dispatch(name, args).await?.into_value())
    }
}
