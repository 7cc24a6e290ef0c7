//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendwise - Rule-based insights for your expenses
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Expense insights: top category, trends, spikes and forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Insight config file (defaults to the data-dir override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the insight report as JSON
    Insights {
        /// Expense file (.json request/array or .csv with category,amount,date)
        #[arg(short, long)]
        file: PathBuf,

        /// File format: json, csv (detected from the extension if not specified)
        #[arg(long)]
        format: Option<String>,

        /// Evaluate as of this instant (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<String>,

        /// Budget limit for a category, as CATEGORY=LIMIT (repeatable)
        #[arg(short, long = "budget", value_name = "CATEGORY=LIMIT")]
        budgets: Vec<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show the insight report in human-readable form
    Summary {
        /// Expense file (.json request/array or .csv with category,amount,date)
        #[arg(short, long)]
        file: PathBuf,

        /// File format: json, csv (detected from the extension if not specified)
        #[arg(long)]
        format: Option<String>,

        /// Evaluate as of this instant (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<String>,

        /// Budget limit for a category, as CATEGORY=LIMIT (repeatable)
        #[arg(short, long = "budget", value_name = "CATEGORY=LIMIT")]
        budgets: Vec<String>,
    },

    /// Summarize a single month of spending
    Report {
        /// Expense file (.json request/array or .csv with category,amount,date)
        #[arg(short, long)]
        file: PathBuf,

        /// File format: json, csv (detected from the extension if not specified)
        #[arg(long)]
        format: Option<String>,

        /// Month as YYYY-MM (defaults to the month containing --now)
        #[arg(short, long)]
        month: Option<String>,

        /// Evaluate as of this instant (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires a bearer API key from SPENDWISE_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },

    /// Show the effective insight configuration
    Config {
        /// Only print where the config was loaded from
        #[arg(long)]
        path_only: bool,
    },
}
