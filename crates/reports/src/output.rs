//! Writing reports to disk

use std::fs;
use std::path::{Path, PathBuf};

use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::exporters::{CsvExporter, JsonExporter, MarkdownExporter, ReportData, ReportExporter};

/// Report output errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Output format for exported reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn exporter(&self) -> Box<dyn ReportExporter> {
        match self {
            ExportFormat::Csv => Box::new(CsvExporter::new()),
            ExportFormat::Json => Box::new(JsonExporter::new()),
            ExportFormat::Markdown => Box::new(MarkdownExporter::new()),
        }
    }
}

/// Paths written by [`save_outputs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub balances: PathBuf,
    pub settlements: PathBuf,
}

/// Write `final_balances.<ext>` and `final_settlements.<ext>` into `dir`.
///
/// The directory is created if missing; existing files are overwritten.
pub fn save_outputs(
    dir: impl AsRef<Path>,
    balances: &dyn ReportData,
    settlements: &dyn ReportData,
    exporter: &dyn ReportExporter,
) -> Result<WrittenReports, ReportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let written = WrittenReports {
        balances: write_report(dir, "final_balances", balances, exporter)?,
        settlements: write_report(dir, "final_settlements", settlements, exporter)?,
    };

    tracing::info!(
        balances = %written.balances.display(),
        settlements = %written.settlements.display(),
        "Reports written"
    );

    Ok(written)
}

fn write_report(
    dir: &Path,
    stem: &str,
    report: &dyn ReportData,
    exporter: &dyn ReportExporter,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(format!("{stem}.{}", exporter.extension()));
    fs::write(&path, exporter.export(report)).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
