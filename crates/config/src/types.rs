//! Configuration types

use clearledger_core::Tolerance;
use clearledger_settlement::{PlannerOptions, Strategy, MAX_EXACT_PARTIES};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loader::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearLedgerConfig {
    /// Settlement planner configuration
    #[serde(default)]
    pub settlement: SettlementConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Planner strategy as written in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Greedy largest-pair heuristic only
    #[default]
    Greedy,
    /// Exact solver for small ledgers, greedy otherwise
    Auto,
}

/// Settlement planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Balances and transfers at or below this value count as zero
    #[serde(default = "default_epsilon")]
    pub epsilon: Decimal,

    /// Planner strategy
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Largest unsettled party count handed to the exact solver (`auto` only)
    #[serde(default = "default_exact_max_parties")]
    pub exact_max_parties: usize,
}

fn default_epsilon() -> Decimal {
    Tolerance::DEFAULT.epsilon()
}

fn default_exact_max_parties() -> usize {
    10
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            strategy: StrategyKind::default(),
            exact_max_parties: default_exact_max_parties(),
        }
    }
}

impl SettlementConfig {
    /// Build the planner options described by this table
    pub fn planner_options(&self) -> Result<PlannerOptions, ConfigError> {
        let tolerance = Tolerance::new(self.epsilon)
            .map_err(|e| ConfigError::Validation(format!("settlement.epsilon: {e}")))?;

        let strategy = match self.strategy {
            StrategyKind::Greedy => Strategy::Greedy,
            StrategyKind::Auto => {
                if !(1..=MAX_EXACT_PARTIES).contains(&self.exact_max_parties) {
                    return Err(ConfigError::Validation(format!(
                        "settlement.exact_max_parties must be between 1 and {MAX_EXACT_PARTIES}, got {}",
                        self.exact_max_parties
                    )));
                }
                Strategy::Auto {
                    exact_max_parties: self.exact_max_parties,
                }
            }
        };

        Ok(PlannerOptions {
            tolerance,
            strategy,
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (`info`, `debug`, `clearledger_settlement=trace`, ...)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
