pub mod endpoints;
pub mod market;
pub mod swap;

use crate::errors::ToolError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes raw tool arguments into a typed struct, reporting missing or
/// unexpected fields as `InvalidParams`.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args)
        .map_err(|err| ToolError::invalid_params(format!("{}: {}", tool, err)))
}
