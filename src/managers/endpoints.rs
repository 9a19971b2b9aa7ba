//! Declarative registry of the upstream endpoints.
//!
//! Adding an operation means adding one [`Endpoint`] row plus its schema in
//! `tool_catalog.json`; the dispatcher needs no changes.

use crate::constants::paths;
use crate::errors::ToolError;
use crate::managers::{market, swap};
use crate::services::transport;
use crate::services::validation::Validation;
use serde_json::{Map, Value};
use std::fmt;

pub type BodyBuilder = fn(&Validation, Value) -> Result<Value, ToolError>;

/// Post-processing applied to successful responses only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShaper {
    Passthrough,
    /// `data.list[0]` when present, otherwise the raw response.
    FirstListItem,
    /// First list item narrowed to `{symbol, name, price, chain}`, otherwise
    /// the raw response.
    PriceSummary,
}

impl ResponseShaper {
    pub fn apply(self, response: Value, request_body: &Value) -> Value {
        match self {
            ResponseShaper::Passthrough => response,
            ResponseShaper::FirstListItem => first_list_item(response),
            ResponseShaper::PriceSummary => {
                let Some(item) = response.pointer("/data/list/0") else {
                    return response;
                };
                let chain = request_body
                    .pointer("/list/0/chain")
                    .cloned()
                    .unwrap_or(Value::Null);
                let mut summary = Map::new();
                for key in ["symbol", "name", "price"] {
                    summary.insert(
                        key.to_string(),
                        item.get(key).cloned().unwrap_or(Value::Null),
                    );
                }
                summary.insert("chain".to_string(), chain);
                Value::Object(summary)
            }
        }
    }
}

fn first_list_item(response: Value) -> Value {
    match response.pointer("/data/list/0") {
        Some(item) => item.clone(),
        None => response,
    }
}

#[derive(Clone, Copy)]
pub struct Endpoint {
    pub name: &'static str,
    pub path: &'static str,
    pub build: BodyBuilder,
    pub shaper: ResponseShaper,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("shaper", &self.shaper)
            .finish()
    }
}

impl Endpoint {
    pub fn requires_partner_code(&self) -> bool {
        transport::requires_partner_code(self.path)
    }
}

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        name: "token_info",
        path: paths::TOKEN_BASE_INFO,
        build: market::single_token_body,
        shaper: ResponseShaper::FirstListItem,
    },
    Endpoint {
        name: "token_price",
        path: paths::TOKEN_BASE_INFO,
        build: market::single_token_body,
        shaper: ResponseShaper::PriceSummary,
    },
    Endpoint {
        name: "batch_token_info",
        path: paths::TOKEN_BASE_INFO,
        build: market::batch_token_body,
        shaper: ResponseShaper::Passthrough,
    },
    Endpoint {
        name: "kline",
        path: paths::KLINE,
        build: market::kline_body,
        shaper: ResponseShaper::Passthrough,
    },
    Endpoint {
        name: "tx_info",
        path: paths::TX_INFO,
        build: market::pair_body,
        shaper: ResponseShaper::Passthrough,
    },
    Endpoint {
        name: "rankings",
        path: paths::TOP_RANK,
        build: market::rankings_body,
        shaper: ResponseShaper::Passthrough,
    },
    Endpoint {
        name: "liquidity",
        path: paths::POOL_LIST,
        build: market::pair_body,
        shaper: ResponseShaper::Passthrough,
    },
    Endpoint {
        name: "security_audit",
        path: paths::SECURITY_AUDIT,
        build: market::security_audit_body,
        shaper: ResponseShaper::Passthrough,
    },
    Endpoint {
        name: "swap_quote",
        path: paths::SWAP_QUOTE,
        build: swap::swap_quote_body,
        shaper: ResponseShaper::Passthrough,
    },
    Endpoint {
        name: "swap_calldata",
        path: paths::SWAP_CALLDATA,
        build: swap::swap_calldata_body,
        shaper: ResponseShaper::Passthrough,
    },
];

pub fn endpoint_by_name(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|endpoint| endpoint.name == name)
}

pub fn endpoint_names() -> Vec<&'static str> {
    ENDPOINTS.iter().map(|endpoint| endpoint.name).collect()
}
