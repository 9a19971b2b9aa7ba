//! Chain registry
//!
//! Short chain names accepted by the tools, mapped to the provider-internal
//! chain ids. The table is static and read-only.

use crate::constants::limits::SUGGESTION_LIMIT;
use crate::errors::ToolError;
use crate::utils::suggest::suggest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub name: &'static str,
    pub id: &'static str,
    pub label: &'static str,
}

pub const CHAINS: &[Chain] = &[
    Chain { name: "eth", id: "1", label: "Ethereum" },
    Chain { name: "sol", id: "100278", label: "Solana" },
    Chain { name: "bnb", id: "56", label: "BNB Chain" },
    Chain { name: "base", id: "8453", label: "Base" },
    Chain { name: "arbitrum", id: "42161", label: "Arbitrum" },
    Chain { name: "trx", id: "6", label: "Tron" },
    Chain { name: "ton", id: "100280", label: "TON" },
    Chain { name: "suinet", id: "100281", label: "Sui" },
    Chain { name: "optimism", id: "10", label: "Optimism" },
];

pub fn chain_by_name(name: &str) -> Option<&'static Chain> {
    CHAINS.iter().find(|chain| chain.name == name)
}

impl Chain {
    /// `arbitrum (Arbitrum, chain id 42161)`
    pub fn describe(&self) -> String {
        format!("{} ({}, chain id {})", self.name, self.label, self.id)
    }
}

pub fn chain_names() -> Vec<&'static str> {
    CHAINS.iter().map(|chain| chain.name).collect()
}

/// Trims and lower-cases `raw`, then checks it against the registry.
/// Returns the canonical short name.
pub fn normalize_chain(raw: &str, label: &str) -> Result<&'static str, ToolError> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ToolError::invalid_params(format!(
            "{} must be a non-empty chain identifier",
            label
        )));
    }
    if let Some(chain) = chain_by_name(&normalized) {
        return Ok(chain.name);
    }

    let names = chain_names();
    let mut err = ToolError::invalid_params(format!(
        "{}: unsupported chain '{}' (expected one of {})",
        label,
        raw.trim(),
        names.join(", ")
    ));
    let suggestions: Vec<String> = suggest(&normalized, &names, SUGGESTION_LIMIT)
        .into_iter()
        .filter_map(chain_by_name)
        .map(Chain::describe)
        .collect();
    if !suggestions.is_empty() {
        err = err.with_hint(format!("Did you mean: {}", suggestions.join(", ")));
    }
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolErrorKind;

    #[test]
    fn maps_short_names_to_provider_ids() {
        assert_eq!(chain_by_name("sol").map(|chain| chain.id), Some("100278"));
        assert_eq!(chain_by_name("eth").map(|chain| chain.id), Some("1"));
        assert!(chain_by_name("polygon").is_none());
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_chain("  SOL ", "chain").unwrap(), "sol");
    }

    #[test]
    fn rejects_unknown_chain_with_hint() {
        let err = normalize_chain("arbitrun", "from_chain").unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::InvalidParams);
        assert!(err.message.starts_with("from_chain: unsupported chain 'arbitrun'"));
        assert_eq!(
            err.hint.as_deref(),
            Some("Did you mean: arbitrum (Arbitrum, chain id 42161)")
        );
    }

    #[test]
    fn rejects_blank_chain() {
        let err = normalize_chain(" ", "chain").unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::InvalidParams);
    }
}
