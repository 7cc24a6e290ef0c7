//! Spendwise CLI - Rule-based expense insights
//!
//! Usage:
//!   spendwise insights --file expenses.json   Print the insight report as JSON
//!   spendwise summary --file expenses.csv     Human-readable insight report
//!   spendwise report --file FILE --month M    Monthly spending summary
//!   spendwise serve --port 3000               Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Insights {
            file,
            format,
            now,
            budgets,
            pretty,
        } => commands::cmd_insights(
            config_path,
            &file,
            format.as_deref(),
            now.as_deref(),
            &budgets,
            pretty,
        ),
        Commands::Summary {
            file,
            format,
            now,
            budgets,
        } => commands::cmd_summary(
            config_path,
            &file,
            format.as_deref(),
            now.as_deref(),
            &budgets,
        ),
        Commands::Report {
            file,
            format,
            month,
            now,
            json,
        } => commands::cmd_report_monthly(
            config_path,
            &file,
            format.as_deref(),
            month.as_deref(),
            now.as_deref(),
            json,
        ),
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(config_path, &host, port, no_auth).await,
        Commands::Config { path_only } => commands::cmd_config(config_path, path_only),
    }
}
