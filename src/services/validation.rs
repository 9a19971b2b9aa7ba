use crate::chains::normalize_chain;
use crate::constants::limits::SUGGESTION_LIMIT;
use crate::errors::ToolError;
use crate::utils::suggest::suggest;
use crate::utils::text::non_blank;

/// Argument checks shared by the body builders. Every failure is an
/// `InvalidParams` error raised before any request is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(&self, value: &str, label: &str) -> Result<String, ToolError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(normalized.to_string())
    }

    /// Absent, empty, and whitespace-only values all collapse to `None`.
    pub fn ensure_optional_string(&self, value: Option<&str>) -> Option<String> {
        non_blank(value).map(str::to_string)
    }

    /// Contract addresses may be empty: the empty string selects the chain's
    /// native token.
    pub fn ensure_contract(&self, value: Option<&str>) -> String {
        value.map(str::trim).unwrap_or_default().to_string()
    }

    pub fn ensure_chain(&self, value: &str, label: &str) -> Result<String, ToolError> {
        normalize_chain(value, label).map(str::to_string)
    }

    pub fn ensure_one_of(
        &self,
        value: &str,
        label: &str,
        allowed: &[&str],
    ) -> Result<String, ToolError> {
        let trimmed = value.trim();
        if let Some(found) = allowed.iter().find(|candidate| **candidate == trimmed) {
            return Ok((*found).to_string());
        }
        let mut err = ToolError::invalid_params(format!(
            "{}: expected one of {}, got '{}'",
            label,
            allowed.join(", "),
            trimmed
        ));
        let suggestions = suggest(trimmed, allowed, SUGGESTION_LIMIT);
        if !suggestions.is_empty() {
            err = err.with_hint(format!("Did you mean: {}", suggestions.join(", ")));
        }
        Err(err)
    }

    pub fn ensure_range(&self, value: u64, label: &str, min: u64, max: u64) -> Result<u64, ToolError> {
        if value < min || value > max {
            return Err(ToolError::invalid_params(format!(
                "{} must be an integer between {} and {}",
                label, min, max
            )));
        }
        Ok(value)
    }

    /// Human-readable token amount such as `"1"` or `"0.25"`. The caller's
    /// text is kept as-is once it parses as a positive number.
    pub fn ensure_amount(&self, value: &str, label: &str) -> Result<String, ToolError> {
        let amount = self.ensure_string(value, label)?;
        match amount.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Ok(amount),
            _ => Err(ToolError::invalid_params(format!(
                "{} must be a positive decimal number, got '{}'",
                label, amount
            ))),
        }
    }

    /// Slippage tolerance in percent.
    pub fn ensure_percentage(&self, value: f64, label: &str) -> Result<f64, ToolError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ToolError::invalid_params(format!(
                "{} must be a percentage between 0 and 100",
                label
            )));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_string_trims_and_rejects_blank() {
        let validation = Validation::new();
        assert_eq!(validation.ensure_string(" abc ", "market").unwrap(), "abc");
        let err = validation.ensure_string("  ", "market").unwrap_err();
        assert_eq!(err.message, "market must be a non-empty string");
    }

    #[test]
    fn optional_strings_collapse_blank_to_none() {
        let validation = Validation::new();
        assert_eq!(validation.ensure_optional_string(Some("")), None);
        assert_eq!(validation.ensure_optional_string(None), None);
        assert_eq!(
            validation.ensure_optional_string(Some(" 0xabc ")),
            Some("0xabc".to_string())
        );
    }

    #[test]
    fn contract_defaults_to_native_token() {
        let validation = Validation::new();
        assert_eq!(validation.ensure_contract(None), "");
        assert_eq!(validation.ensure_contract(Some(" 0xdead ")), "0xdead");
    }

    #[test]
    fn one_of_suggests_close_values() {
        let validation = Validation::new();
        let err = validation
            .ensure_one_of("topGainer", "name", &["topGainers", "topLosers"])
            .unwrap_err();
        assert_eq!(err.hint.as_deref(), Some("Did you mean: topGainers"));
        assert_eq!(
            validation
                .ensure_one_of("1h", "period", &["1m", "1h"])
                .unwrap(),
            "1h"
        );
    }

    #[test]
    fn amount_must_be_positive_number() {
        let validation = Validation::new();
        assert_eq!(validation.ensure_amount("0.25", "amount").unwrap(), "0.25");
        assert!(validation.ensure_amount("0", "amount").is_err());
        assert!(validation.ensure_amount("-1", "amount").is_err());
        assert!(validation.ensure_amount("one", "amount").is_err());
        assert!(validation.ensure_amount("NaN", "amount").is_err());
    }

    #[test]
    fn range_and_percentage_bounds() {
        let validation = Validation::new();
        assert_eq!(validation.ensure_range(24, "size", 1, 1440).unwrap(), 24);
        assert!(validation.ensure_range(0, "size", 1, 1440).is_err());
        assert!(validation.ensure_range(1441, "size", 1, 1440).is_err());
        assert_eq!(validation.ensure_percentage(0.5, "slippage").unwrap(), 0.5);
        assert!(validation.ensure_percentage(120.0, "slippage").is_err());
        assert!(validation.ensure_percentage(f64::NAN, "slippage").is_err());
    }
}
