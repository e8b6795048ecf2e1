use anyhow::Result;
use bdr_config::BdrConfig;
use bdr_mcp::cli::Cli;
use bdr_mcp::logging::init_logging;
use bdr_mcp::{BdrClient, BdrMcpService};
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config_example {
        print!("{}", BdrConfig::example_toml());
        return Ok(());
    }

    let config = BdrConfig::load(cli.config.clone(), cli.overrides())?;
    init_logging(&config.logging)?;

    info!("Starting BDR MCP server");
    info!("  API base: {}", config.api.base_url);
    info!("  Timeout: {}s", config.api.timeout_secs);

    let client = BdrClient::new(config.api)?;
    let service = BdrMcpService::new(client);

    let server = service.serve(stdio()).await.inspect_err(|e| {
        error!("Failed to start MCP server: {}", e);
    })?;

    let reason = server.waiting().await?;
    info!("MCP server stopped: {:?}", reason);

    Ok(())
}
