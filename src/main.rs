// src/main.rs
// Productive MCP - guided timesheet entry for Productive.io

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use productive::{
    api::ProductiveClient, config, config::EnvConfig, http, mcp::ProductiveServer,
    timesheet::ActorIdentity,
};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "productive-mcp")]
#[command(about = "MCP server for logging time in Productive.io")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as MCP server over stdio (default)
    Serve,

    /// Validate configuration and print a report
    Check,
}

async fn run_mcp_server(config: EnvConfig) -> Result<()> {
    let validation = config.validate();
    for w in &validation.warnings {
        warn!("{}", w);
    }
    if !validation.is_valid() {
        bail!("{}", validation.report());
    }

    let shared_client = http::create_shared_client(config.api.timeout);
    let client = ProductiveClient::new(&config.api, shared_client)?;
    let actor = ActorIdentity::new(config.user_id);
    info!(
        base_url = %config.api.base_url,
        actor_configured = actor.is_configured(),
        "Starting Productive MCP server"
    );

    let server = ProductiveServer::new(Arc::new(client), actor);

    // Run with stdio transport
    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

fn run_check(config: &EnvConfig) -> Result<()> {
    let validation = config.validate();
    println!("{}", validation.report());
    if !validation.is_valid() {
        bail!("configuration is invalid");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();

    let cli = Cli::parse();

    let log_level = match (&cli.command, cli.verbose) {
        (_, true) => Level::DEBUG,
        (Some(Commands::Serve) | None, false) => Level::WARN, // Quiet for MCP stdio
        (Some(Commands::Check), false) => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = EnvConfig::load();
    info!(config = ?config, "Loaded configuration");

    match cli.command {
        None | Some(Commands::Serve) => run_mcp_server(config).await?,
        Some(Commands::Check) => run_check(&config)?,
    }

    Ok(())
}
