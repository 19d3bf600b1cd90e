//! CLI commands
//!
//! Input is read from a file, or from stdin when no file (or `-`) is given.
//! Pipeline failures are returned as [`CalculateError`](crate::CalculateError)
//! without extra context so the binary can pick the exit status.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Context;
use clearledger_reports::{save_outputs, settlements_text, BalanceReport, ExportFormat, SettlementReport};

use crate::context::AppContext;
use crate::dto::CalculateRequest;

/// Parse a request document from `input`
pub fn read_request(input: Option<&Path>) -> Result<CalculateRequest, anyhow::Error> {
    let content = match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    parse_request(&content)
}

pub fn parse_request(content: &str) -> Result<CalculateRequest, anyhow::Error> {
    serde_json::from_str(content).context("request is not a valid calculate document")
}

/// Compute balances and settlements, writing the response JSON
pub fn calculate(
    ctx: &AppContext,
    input: Option<&Path>,
    output: Option<&Path>,
    pretty: bool,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let request = read_request(input)?;
    let response = ctx.respond(&request, correlation_id)?;

    let mut body = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    body.push('\n');

    match output {
        Some(path) => fs::write(path, body)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(body.as_bytes())
            .context("failed to write response")?,
    }
    Ok(())
}

/// Write `final_balances` and `final_settlements` reports into `out_dir`
pub fn export(
    ctx: &AppContext,
    input: Option<&Path>,
    out_dir: &Path,
    format: ExportFormat,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let request = read_request(input)?;
    let calculation = ctx.calculate(&request, correlation_id)?;

    let balances = BalanceReport::new(&calculation.balances);
    let settlements = SettlementReport::new(&calculation.settlements);
    let exporter = format.exporter();

    let written = save_outputs(out_dir, &balances, &settlements, exporter.as_ref())?;

    println!("✅ Balances written to {}", written.balances.display());
    println!("✅ Settlements written to {}", written.settlements.display());
    Ok(())
}

/// Print the plain-text settlement summary
pub fn summary(
    ctx: &AppContext,
    input: Option<&Path>,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let request = read_request(input)?;
    let calculation = ctx.calculate(&request, correlation_id)?;

    println!("{}", settlements_text(&calculation.settlements));
    Ok(())
}
