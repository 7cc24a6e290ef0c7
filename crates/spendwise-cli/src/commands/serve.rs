//! Server command implementation

use std::path::Path;

use anyhow::Result;

use spendwise_server::ServerConfig;

use super::load_config;

pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    no_auth: bool,
) -> Result<()> {
    let insights = load_config(config_path)?;
    let config = ServerConfig::from_env(!no_auth);

    println!("🚀 Starting Spendwise web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   Currency: {}", insights.currency_symbol);

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if config.api_keys.is_empty() {
        println!("   🔒 Authentication: API key required");
        println!("      Set SPENDWISE_API_KEYS (comma-separated) to allow clients");
    } else {
        println!(
            "   🔑 API keys: {} configured (SPENDWISE_API_KEYS)",
            config.api_keys.len()
        );
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} (SPENDWISE_ALLOWED_ORIGINS)",
            config.allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    spendwise_server::serve_with_config(insights, host, port, config).await?;

    Ok(())
}
