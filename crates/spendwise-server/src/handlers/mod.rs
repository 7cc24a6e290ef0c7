//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod health;
pub mod insights;
pub mod reports;

// Re-export all handlers for use in router
pub use health::*;
pub use insights::*;
pub use reports::*;
