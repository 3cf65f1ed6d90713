mod config;
mod cors;
mod logging;
mod signals;

use std::path::{Path, PathBuf};

use anyhow::Result;
use axum::Router;
use clap::{Parser, Subcommand};
use infra_registry::InfraRegistry;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CliOverrides};

/// City Infrastructure API - bridge and water-quality registries
#[derive(Parser)]
#[command(name = "infra-server")]
#[command(about = "City Infrastructure API - bridge and water-quality registries")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use mock database (sqlite::memory:)
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.to_string_lossy());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        mock: cli.mock,
    })?;

    logging::init_logging(&config.logging, cli.verbose);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.bind_addr()?;
    cors::build_cors_layer(&config.cors)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

fn build_app(registry: &InfraRegistry, config: &AppConfig) -> Result<Router> {
    let mut app = registry.router().layer(TraceLayer::new_for_http());
    if let Some(cors) = cors::build_cors_layer(&config.cors)? {
        app = app.layer(cors);
    }
    Ok(app)
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("City Infrastructure API starting");

    let addr = config.bind_addr()?;
    let db = config.database.connect().await?;
    let registry = InfraRegistry::init(db).await?;
    let app = build_app(&registry, &config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = signals::wait_for_shutdown().await {
                tracing::error!(error = %e, "Signal handling failed, shutting down");
            }
        })
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
