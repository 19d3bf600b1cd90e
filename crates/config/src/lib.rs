//! ClearLedger Config - Configuration management
//!
//! TOML file with a `[settlement]` and a `[logging]` table. Every key is
//! optional; missing keys take their defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader};
pub use types::{ClearLedgerConfig, LoggingConfig, SettlementConfig, StrategyKind};
