//! # ecfr-api — Binary Entry Point
//!
//! `serve` runs the refresh endpoint over HTTP (default port 8080).
//! `invoke` processes one API-Gateway proxy event and prints the response.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ecfr_api::{AppConfig, AppState, ProxyRequest};
use ecfr_store::StoreBackend;

/// eCFR analyzer: fetch eCFR listings and persist the analysis.
#[derive(Parser, Debug)]
#[command(name = "ecfr-api", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the refresh endpoint over HTTP.
    Serve {
        /// Port to bind; overrides `PORT`.
        #[arg(long)]
        port: Option<u16>,
        /// Persistence backend (`aws` or `memory`); overrides `STORE_BACKEND`.
        #[arg(long)]
        backend: Option<StoreBackend>,
    },
    /// Process a single proxy event and print the proxy response as JSON.
    Invoke {
        /// Event file. Reads stdin when omitted.
        event: Option<PathBuf>,
        /// Persistence backend (`aws` or `memory`); overrides `STORE_BACKEND`.
        #[arg(long)]
        backend: Option<StoreBackend>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("invalid configuration")?;

    match cli.command {
        Commands::Serve { port, backend } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(backend) = backend {
                config.store.backend = backend;
            }
            serve(config).await
        }
        Commands::Invoke { event, backend } => {
            if let Some(backend) = backend {
                config.store.backend = backend;
            }
            invoke(config, event).await
        }
    }
}

/// Structured tracing to stderr, filtered by `RUST_LOG` (default `info`).
/// `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config).await.map_err(|e| {
        tracing::error!("failed to create eCFR client: {e}");
        e
    })?;
    let app = ecfr_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("eCFR analyzer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn invoke(config: AppConfig, event: Option<PathBuf>) -> anyhow::Result<()> {
    let raw = match &event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };
    let request: ProxyRequest =
        serde_json::from_str(&raw).context("event is not a valid proxy event")?;

    let state = AppState::from_config(&config).await?;
    let response = ecfr_api::handle(&state, request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
