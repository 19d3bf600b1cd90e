//! Application context - configuration resolved once, shared by every request

use std::path::{Path, PathBuf};

use clearledger_config::{ClearLedgerConfig, ConfigError, ConfigLoader};
use clearledger_settlement::PlannerOptions;

use crate::dto::{CalculateRequest, CalculateResponse};
use crate::error::CalculateError;
use crate::pipeline::{self, Calculation};

/// Holds no mutable state, so one context can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ClearLedgerConfig,
    options: PlannerOptions,
    config_path: Option<PathBuf>,
}

impl AppContext {
    /// Create a context from an optional TOML file; defaults when `None`
    pub fn new(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loader = ConfigLoader::load_optional(config_path)?;
        let config_path = loader.source().map(Path::to_path_buf);
        let mut ctx = Self::from_config(loader.into_inner())?;
        ctx.config_path = config_path;
        Ok(ctx)
    }

    pub fn from_config(config: ClearLedgerConfig) -> Result<Self, ConfigError> {
        let options = config.settlement.planner_options()?;
        Ok(Self {
            config,
            options,
            config_path: None,
        })
    }

    pub fn with_options(options: PlannerOptions) -> Self {
        Self {
            config: ClearLedgerConfig::default(),
            options,
            config_path: None,
        }
    }

    pub fn config(&self) -> &ClearLedgerConfig {
        &self.config
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Run the pipeline for one request under a `calculate` span
    pub fn calculate(
        &self,
        request: &CalculateRequest,
        correlation_id: &str,
    ) -> Result<Calculation, CalculateError> {
        let span = tracing::info_span!("calculate", correlation_id = %correlation_id);
        let _guard = span.enter();

        let calculation = pipeline::calculate(&request.transactions, &self.options)?;

        tracing::info!(
            transactions = request.transactions.len(),
            parties = calculation.balances.len(),
            settlements = calculation.settlements.len(),
            method = ?calculation.method,
            "Settlement computed"
        );

        Ok(calculation)
    }

    /// Same as [`AppContext::calculate`], returning the wire response
    pub fn respond(
        &self,
        request: &CalculateRequest,
        correlation_id: &str,
    ) -> Result<CalculateResponse, CalculateError> {
        self.calculate(request, correlation_id)
            .map(|calculation| calculation.to_response())
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::with_options(PlannerOptions::default())
    }
}
