//! # ClearLedger Reports
//!
//! Renders final balances and settlements for people and downstream tools.
//!
//! ## Exporters
//!
//! - [`CsvExporter`] - CSV format with proper escaping
//! - [`JsonExporter`] - JSON format (pretty or compact)
//! - [`MarkdownExporter`] - Markdown tables for documentation
//!
//! ## Reports
//!
//! - [`BalanceReport`] - one row per party with its final balance
//! - [`SettlementReport`] - one row per transfer
//! - [`settlements_text`] - the plain-text transfer list
//!
//! ## Example
//!
//! ```rust,ignore
//! use clearledger_reports::{save_outputs, BalanceReport, CsvExporter, SettlementReport};
//!
//! let balances = BalanceReport::new(&sheet_balances);
//! let settlements = SettlementReport::new(&plan.settlements);
//! let written = save_outputs("out", &balances, &settlements, &CsvExporter::new())?;
//! ```

pub mod exporters;
pub mod output;
pub mod reports;

pub use exporters::{CsvExporter, JsonExporter, MarkdownExporter, ReportData, ReportExporter};
pub use output::{save_outputs, ExportFormat, ReportError, WrittenReports};
pub use reports::{settlements_text, BalanceReport, SettlementReport};
