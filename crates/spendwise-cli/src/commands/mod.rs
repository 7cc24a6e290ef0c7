//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Show the effective insight configuration
//! - `core` - Shared utilities (config loading, expense files, --now and --budget parsing)
//! - `insights` - Insight report commands (JSON and human-readable)
//! - `reports` - Monthly summary command
//! - `serve` - Web server command

pub mod config;
pub mod core;
pub mod insights;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use config::*;
pub use self::core::*;
pub use insights::*;
pub use reports::*;
pub use serve::*;
