//! CLI configuration

use std::collections::HashMap;

use serde::Deserialize;

use core_kernel::Currency;
use domain_allocation::ReconciliationStrategy;

/// Environment variable prefix, e.g. `ALLOC_ROUNDING=largest_remainder`
pub const ENV_PREFIX: &str = "ALLOC";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// Currency assumed for jobs that do not name one
    pub currency: Currency,
    /// Rounding reconciliation strategy
    pub rounding: ReconciliationStrategy,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency: Currency::CZK,
            rounding: ReconciliationStrategy::LastShare,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::build(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an explicit variable map instead of the
    /// process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        Self::build(config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn build(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("currency", defaults.currency.code())?
            .set_default("rounding", "last_share")?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = CliConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_overrides_from_vars() {
        let vars = HashMap::from([
            ("ALLOC_CURRENCY".to_string(), "EUR".to_string()),
            ("ALLOC_ROUNDING".to_string(), "largest_remainder".to_string()),
            ("ALLOC_LOG_JSON".to_string(), "true".to_string()),
        ]);
        let config = CliConfig::from_vars(vars).unwrap();

        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.rounding, ReconciliationStrategy::LargestRemainder);
        assert!(config.log_json);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let vars = HashMap::from([("ALLOC_ROUNDING".to_string(), "banker".to_string())]);
        assert!(CliConfig::from_vars(vars).is_err());
    }
}
