use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use eob_reconcile::{run_audit, AuditConfig, OutputFormat, DEFAULT_TARGET_DIR};

/// Verify a directory of EOB and check files against an expected total
#[derive(Parser, Debug)]
#[command(name = "eob-check")]
#[command(version)]
struct Cli {
    /// The expected total for this set of EOBs, e.g. 1250.75
    #[arg(long, env = "EOB_TOTAL")]
    total: String,

    /// The directory holding the set of EOB and check files
    #[arg(long, env = "EOB_DIR", default_value = DEFAULT_TARGET_DIR)]
    dir: PathBuf,

    /// Print the report as JSON instead of numbered lines
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let config = AuditConfig::from_args(&cli.total, cli.dir, format)?;

    let report = run_audit(&config, &mut io::stdout().lock())
        .with_context(|| format!("auditing {}", config.target_dir.display()))?;

    Ok(report.is_clean())
}
