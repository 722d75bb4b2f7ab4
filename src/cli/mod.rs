//! Command-line interface.
//!
//! `clean` corrects a CSV file, `check` reports rule violations without
//! changing anything, and `serve` exposes both over HTTP.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::{AppState, create_router};
use crate::config::{CorrectionRules, RulesLoader};
use crate::correction::{check_dataset, clean_dataset};
use crate::io::{read_csv, write_csv};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "premium-cleaner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Corrects inconsistent rows in a car-insurance applicant dataset", long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clean a dataset and write the corrected rows
    Clean {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Directory holding education.yaml, employment.yaml and driving.yaml
        #[arg(short, long, env = "PREMIUM_CLEANER_RULES")]
        rules: Option<PathBuf>,

        /// Write the full cleaning result, audit trace included, as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Report rule violations without correcting anything
    Check {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Directory holding education.yaml, employment.yaml and driving.yaml
        #[arg(short, long, env = "PREMIUM_CLEANER_RULES")]
        rules: Option<PathBuf>,
    },

    /// Start the HTTP API
    Serve {
        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory holding education.yaml, employment.yaml and driving.yaml
        #[arg(short, long, env = "PREMIUM_CLEANER_RULES")]
        rules: Option<PathBuf>,
    },
}

/// Runs a parsed command line.
///
/// `check` exits with failure when any violation is found.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Clean {
            input,
            output,
            rules,
            report,
        } => {
            cmd_clean(&input, &output, rules.as_deref(), report.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { input, rules } => cmd_check(&input, rules.as_deref()),
        Commands::Serve { host, port, rules } => {
            cmd_serve(&host, port, rules.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Loads rules from a directory, or the built-in defaults when none is given.
pub fn load_rules(dir: Option<&Path>) -> anyhow::Result<CorrectionRules> {
    match dir {
        Some(dir) => {
            let loader = RulesLoader::load(dir)
                .with_context(|| format!("loading rules from {}", dir.display()))?;
            info!(rules = %dir.display(), "Loaded correction rules");
            Ok(loader.into_rules())
        }
        None => Ok(CorrectionRules::default()),
    }
}

fn cmd_clean(
    input: &Path,
    output: &Path,
    rules_dir: Option<&Path>,
    report: Option<&Path>,
) -> anyhow::Result<()> {
    let rules = load_rules(rules_dir)?;
    let table = read_csv(input)?;
    let result = clean_dataset(table, &rules)?;
    write_csv(output, &result.columns, &result.records)?;

    if let Some(report) = report {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(report, json)
            .with_context(|| format!("writing report to {}", report.display()))?;
    }

    let summary = &result.summary;
    println!(
        "Read {} rows, wrote {} to {}",
        summary.rows_read,
        summary.rows_written,
        output.display()
    );
    println!(
        "  dropped: {} empty, {} duplicate, {} education",
        summary.empty_rows_dropped, summary.duplicate_rows_dropped, summary.education_rows_dropped
    );
    println!(
        "  statuses reassigned: {} ({} unresolved), driving years capped: {}",
        summary.statuses_reassigned, summary.statuses_unresolved, summary.driving_years_capped
    );
    for share in &summary.status_distribution {
        println!(
            "  {:<14} {:>6}  {}",
            share.status.as_str(),
            share.count,
            share.proportion.round_dp(6)
        );
    }

    Ok(())
}

fn cmd_check(input: &Path, rules_dir: Option<&Path>) -> anyhow::Result<ExitCode> {
    let rules = load_rules(rules_dir)?;
    let table = read_csv(input)?;
    let report = check_dataset(table, &rules)?;

    for violation in &report.violations {
        println!("row {}: {}", violation.row, violation.message);
    }
    println!(
        "{} violations in {} rows",
        report.violations.len(),
        report.rows_checked
    );

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn cmd_serve(host: &str, port: u16, rules_dir: Option<&Path>) -> anyhow::Result<()> {
    let rules = load_rules(rules_dir)?;
    let app = create_router(AppState::new(rules));

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Dataset corrector API listening");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_command() {
        let cli = Cli::try_parse_from([
            "premium-cleaner",
            "clean",
            "--input",
            "raw.csv",
            "--output",
            "clean.csv",
            "--report",
            "report.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Clean {
                input,
                output,
                report,
                ..
            } => {
                assert_eq!(input, PathBuf::from("raw.csv"));
                assert_eq!(output, PathBuf::from("clean.csv"));
                assert_eq!(report, Some(PathBuf::from("report.json")));
            }
            other => panic!("Expected clean command, got {other:?}"),
        }
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["premium-cleaner", "serve"]).unwrap();

        match cli.command {
            Commands::Serve { host, port, .. } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8080);
            }
            other => panic!("Expected serve command, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_requires_output() {
        let result = Cli::try_parse_from(["premium-cleaner", "clean", "--input", "raw.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rules_defaults_without_dir() {
        let rules = load_rules(None).unwrap();
        assert_eq!(rules.min_driving_age(), 18);
    }

    #[test]
    fn test_load_rules_reports_missing_dir() {
        let err = load_rules(Some(Path::new("/nonexistent/rules"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules"));
    }
}
