//! Request bodies for the swap tools.
//!
//! Both endpoints live under the partner namespace. A missing or empty
//! `to_chain` means a same-chain swap and falls back to `from_chain`.
//! Optional fields are omitted from the body unless the caller supplied them.

use crate::errors::ToolError;
use crate::managers::parse_args;
use crate::services::validation::Validation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SwapQuoteArgs {
    from_chain: String,
    from_contract: String,
    to_contract: String,
    amount: String,
    #[serde(default)]
    to_chain: Option<String>,
    #[serde(default)]
    from_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SwapCalldataArgs {
    from_chain: String,
    from_contract: String,
    to_contract: String,
    amount: String,
    from_address: String,
    to_address: String,
    market: String,
    #[serde(default)]
    to_chain: Option<String>,
    #[serde(default)]
    slippage: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapQuoteBody {
    from_chain: String,
    from_contract: String,
    to_chain: String,
    to_contract: String,
    from_amount: String,
    estimate_gas: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapCalldataBody {
    from_chain: String,
    from_contract: String,
    to_chain: String,
    to_contract: String,
    from_amount: String,
    from_address: String,
    to_address: String,
    market: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    slippage: Option<f64>,
}

/// Source/destination chains after normalization.
struct Route {
    from_chain: String,
    to_chain: String,
}

fn resolve_route(
    validation: &Validation,
    from_chain: &str,
    to_chain: Option<&str>,
) -> Result<Route, ToolError> {
    let from_chain = validation.ensure_chain(from_chain, "from_chain")?;
    let to_chain = match validation.ensure_optional_string(to_chain) {
        Some(raw) => validation.ensure_chain(&raw, "to_chain")?,
        None => from_chain.clone(),
    };
    Ok(Route {
        from_chain,
        to_chain,
    })
}

pub fn swap_quote_body(validation: &Validation, args: Value) -> Result<Value, ToolError> {
    let args: SwapQuoteArgs = parse_args("swap_quote", args)?;
    let route = resolve_route(validation, &args.from_chain, args.to_chain.as_deref())?;
    Ok(serde_json::to_value(SwapQuoteBody {
        from_chain: route.from_chain,
        from_contract: validation.ensure_contract(Some(&args.from_contract)),
        to_chain: route.to_chain,
        to_contract: validation.ensure_contract(Some(&args.to_contract)),
        from_amount: validation.ensure_amount(&args.amount, "amount")?,
        estimate_gas: true,
        from_address: validation.ensure_optional_string(args.from_address.as_deref()),
    })?)
}

pub fn swap_calldata_body(validation: &Validation, args: Value) -> Result<Value, ToolError> {
    let args: SwapCalldataArgs = parse_args("swap_calldata", args)?;
    let route = resolve_route(validation, &args.from_chain, args.to_chain.as_deref())?;
    let slippage = args
        .slippage
        .map(|value| validation.ensure_percentage(value, "slippage"))
        .transpose()?;
    Ok(serde_json::to_value(SwapCalldataBody {
        from_chain: route.from_chain,
        from_contract: validation.ensure_contract(Some(&args.from_contract)),
        to_chain: route.to_chain,
        to_contract: validation.ensure_contract(Some(&args.to_contract)),
        from_amount: validation.ensure_amount(&args.amount, "amount")?,
        from_address: validation.ensure_string(&args.from_address, "from_address")?,
        to_address: validation.ensure_string(&args.to_address, "to_address")?,
        market: validation.ensure_string(&args.market, "market")?,
        slippage,
    })?)
}
