//! ClearLedger CLI - Main entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clearledger_reports::ExportFormat;
use clearledger_rpc::{commands, AppContext, CalculateError};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "clearledger")]
#[command(about = "ClearLedger - Net shared debts into a short list of transfers", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, overrides the configured level (RUST_LOG wins over both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Correlation ID attached to the request's logs
    #[arg(long, global = true)]
    correlation_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a calculate request, print the response JSON
    Calculate {
        /// Request file (stdin when omitted or `-`)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Response file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },

    /// Write final balances and settlements as report files
    Export {
        /// Request file (stdin when omitted or `-`)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory receiving final_balances.* and final_settlements.*
        #[arg(long)]
        out_dir: PathBuf,
        /// Report format: csv, json or markdown
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
    },

    /// Print the plain-text settlement summary
    Summary {
        /// Request file (stdin when omitted or `-`)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let ctx = match AppContext::new(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            init_logging(cli.log_level.as_deref().unwrap_or("info"));
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| ctx.config().logging.level.clone());
    init_logging(&level);

    let correlation_id = cli
        .correlation_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    match run(&ctx, cli.command, &correlation_id) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<CalculateError>() {
            Some(calc) if calc.is_user_error() => {
                eprintln!("error: {}", calc.public_message());
                ExitCode::from(2)
            }
            Some(calc) => {
                tracing::error!(correlation_id = %correlation_id, error = %calc, "Calculation failed");
                eprintln!("error: {}", calc.public_message());
                ExitCode::from(1)
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::from(1)
            }
        },
    }
}

fn run(ctx: &AppContext, command: Commands, correlation_id: &str) -> anyhow::Result<()> {
    match command {
        Commands::Calculate {
            input,
            output,
            pretty,
        } => commands::calculate(
            ctx,
            input.as_deref(),
            output.as_deref(),
            pretty,
            correlation_id,
        ),

        Commands::Export {
            input,
            out_dir,
            format,
        } => commands::export(ctx, input.as_deref(), &out_dir, format, correlation_id),

        Commands::Summary { input } => commands::summary(ctx, input.as_deref(), correlation_id),
    }
}

/// Logs go to stderr; stdout carries only command output.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
