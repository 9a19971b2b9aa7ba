//! Request bodies for the market-data tools.
//!
//! Each builder takes the caller's raw arguments, checks and normalizes them,
//! and returns the JSON body the endpoint expects.

use crate::constants::limits::{BATCH_MAX_TOKENS, KLINE_MAX_SIZE};
use crate::errors::ToolError;
use crate::managers::parse_args;
use crate::services::validation::Validation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const KLINE_PERIODS: &[&str] = &["1s", "1m", "5m", "15m", "30m", "1h", "4h", "1d", "1w"];
pub const DEFAULT_KLINE_PERIOD: &str = "1h";
pub const DEFAULT_KLINE_SIZE: u64 = 24;
pub const RANKINGS: &[&str] = &["topGainers", "topLosers"];
pub const DEFAULT_RANKING: &str = "topGainers";
const AUDIT_SOURCE: &str = "bg";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenArgs {
    chain: String,
    #[serde(default)]
    contract: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PairArgs {
    chain: String,
    contract: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchArgs {
    tokens: Vec<TokenArgs>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KlineArgs {
    chain: String,
    contract: String,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RankingsArgs {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct TokenRef {
    chain: String,
    contract: String,
}

#[derive(Debug, Serialize)]
struct TokenListBody {
    list: Vec<TokenRef>,
}

#[derive(Debug, Serialize)]
struct AuditBody {
    list: Vec<TokenRef>,
    source: &'static str,
}

#[derive(Debug, Serialize)]
struct KlineBody {
    chain: String,
    contract: String,
    period: String,
    size: u64,
}

#[derive(Debug, Serialize)]
struct RankingsBody {
    name: String,
}

fn token_ref(
    validation: &Validation,
    chain: &str,
    contract: Option<&str>,
    label: &str,
) -> Result<TokenRef, ToolError> {
    Ok(TokenRef {
        chain: validation.ensure_chain(chain, label)?,
        contract: validation.ensure_contract(contract),
    })
}

/// `token_info` and `token_price`: a single-element lookup list.
pub fn single_token_body(validation: &Validation, args: Value) -> Result<Value, ToolError> {
    let args: TokenArgs = parse_args("token lookup", args)?;
    let token = token_ref(validation, &args.chain, args.contract.as_deref(), "chain")?;
    Ok(serde_json::to_value(TokenListBody { list: vec![token] })?)
}

pub fn batch_token_body(validation: &Validation, args: Value) -> Result<Value, ToolError> {
    let args: BatchArgs = parse_args("batch_token_info", args)?;
    if args.tokens.is_empty() || args.tokens.len() > BATCH_MAX_TOKENS {
        return Err(ToolError::invalid_params(format!(
            "tokens must contain between 1 and {} entries",
            BATCH_MAX_TOKENS
        )));
    }
    let list = args
        .tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            token_ref(
                validation,
                &token.chain,
                token.contract.as_deref(),
                &format!("tokens[{}].chain", idx),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_value(TokenListBody { list })?)
}

pub fn kline_body(validation: &Validation, args: Value) -> Result<Value, ToolError> {
    let args: KlineArgs = parse_args("kline", args)?;
    let period = validation.ensure_one_of(
        args.period.as_deref().unwrap_or(DEFAULT_KLINE_PERIOD),
        "period",
        KLINE_PERIODS,
    )?;
    let size = validation.ensure_range(
        args.size.unwrap_or(DEFAULT_KLINE_SIZE),
        "size",
        1,
        KLINE_MAX_SIZE,
    )?;
    Ok(serde_json::to_value(KlineBody {
        chain: validation.ensure_chain(&args.chain, "chain")?,
        contract: validation.ensure_contract(Some(&args.contract)),
        period,
        size,
    })?)
}

/// `tx_info` and `liquidity` share the bare `{chain, contract}` body.
pub fn pair_body(validation: &Validation, args: Value) -> Result<Value, ToolError> {
    let args: PairArgs = parse_args("token pair lookup", args)?;
    let token = token_ref(validation, &args.chain, Some(&args.contract), "chain")?;
    Ok(serde_json::to_value(token)?)
}

pub fn rankings_body(validation: &Validation, args: Value) -> Result<Value, ToolError> {
    let args: RankingsArgs = parse_args("rankings", args)?;
    let name = validation.ensure_one_of(
        args.name.as_deref().unwrap_or(DEFAULT_RANKING),
        "name",
        RANKINGS,
    )?;
    Ok(serde_json::to_value(RankingsBody { name })?)
}

pub fn security_audit_body(validation: &Validation, args: Value) -> Result<Value, ToolError> {
    let args: PairArgs = parse_args("security_audit", args)?;
    let token = token_ref(validation, &args.chain, Some(&args.contract), "chain")?;
    Ok(serde_json::to_value(AuditBody {
        list: vec![token],
        source: AUDIT_SOURCE,
    })?)
}
