//! Translit QA CLI - Main Entry Point
//!
//! Runs the Singlish-to-Sinhala E2E suite through Playwright and renders
//! the results as PDF and Excel reports.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use translit_cli::commands::{records, report, run, scaffold};
use translit_cli::output;
use translit_common::{config::DEFAULT_CONFIG_FILE, Config};

/// Translit QA - transliteration E2E runner and reporter
#[derive(Parser)]
#[command(name = "translit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "TRANSLIT_CONFIG", global = true)]
    config: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the browser tests, then generate both reports
    Run(run::RunArgs),

    /// Generate both reports from an existing results file
    Report(report::ReportArgs),

    /// Print the processed report records
    Records(records::RecordsArgs),

    /// Write the Playwright project files without running them
    Scaffold,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run(args) => run::execute(args, &config).await?,
        Commands::Report(args) => report::execute(args, &config).await?,
        Commands::Records(args) => records::execute(args, &config, cli.format)?,
        Commands::Scaffold => scaffold::execute(&config)?,
    }

    Ok(())
}
