//! EVPlus backend entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use evplus_backend::api::{create_router, AppState};
use evplus_backend::config::Config;
use evplus_backend::metrics;
use evplus_backend::pdf;
use evplus_backend::props::{League, PropsClient};
use evplus_backend::utils::shutdown_signal;

/// PrizePicks props backend.
#[derive(Parser, Debug)]
#[command(name = "evplus-backend")]
#[command(about = "Serves live PrizePicks props as JSON and PDF")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch props once and print them as JSON.
    Props {
        /// League key.
        #[arg(short, long, default_value = "nba")]
        league: String,
    },

    /// Fetch props once and write the PDF table to a file.
    Pdf {
        /// League key.
        #[arg(short, long, default_value = "nba")]
        league: String,

        /// Output path.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    init_logging(&config, args.verbose);

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        Some(Command::Props { league }) => cmd_props(config, &league).await,
        Some(Command::Pdf { league, output }) => cmd_pdf(config, &league, output).await,
        Some(Command::CheckConfig) => cmd_check_config(config),
        None => cmd_serve(config, args.port).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("evplus_backend=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Run the HTTP server until a shutdown signal.
async fn cmd_serve(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let client = PropsClient::new(&config)?;
    let mut state = AppState::new(client);
    if config.metrics_enabled {
        state = state.with_metrics(metrics::init_metrics()?);
    }

    info!("Upstream: {}", config.projections_url);
    info!("Upstream timeout: {}ms", config.http_timeout_ms);
    info!("Metrics: {}", if config.metrics_enabled { "enabled" } else { "disabled" });

    let port = port_override.unwrap_or(config.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Fetch props once and print them.
async fn cmd_props(config: Config, league: &str) -> anyhow::Result<()> {
    let client = PropsClient::new(&config)?;
    let records = client.fetch(league).await?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Fetch props once and write the PDF.
async fn cmd_pdf(config: Config, league: &str, output: PathBuf) -> anyhow::Result<()> {
    let client = PropsClient::new(&config)?;
    let records = client.fetch(league).await?;
    let bytes = pdf::render(league, &records)?;

    tokio::fs::write(&output, &bytes).await?;
    println!(
        "Wrote {} ({} props, {} bytes)",
        output.display(),
        records.len(),
        bytes.len()
    );
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("EVPLUS BACKEND - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Projections URL: {}", config.projections_url);
    println!("  Timeout: {}ms", config.http_timeout_ms);
    println!("  Per Page: {}", config.per_page);
    println!("  User-Agent: {}", config.upstream_user_agent);
    println!("  Referer: {}", config.upstream_referer);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("  Leagues:");
    for league in League::iter() {
        println!("    {:<8} league_id={}", league, league.id());
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
