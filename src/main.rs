//! Disconnected CMS layout service.
//!
//! Serves page layout data from pre-exported route JSON files, in the shape
//! of the CMS REST layout service, so a rendering host can run without a
//! live CMS.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /sitecore/api/layout/render/{configuration}?item=...&sc_lang=...
//!          │
//!          ▼
//!     ┌─────────┐    ┌─────────────────────────────────────────────┐
//!     │  http   │───▶│              LayoutResolver                 │
//!     │ server  │    │  filter ─▶ key ─▶ store ─▶ default ─▶ 404   │
//!     └─────────┘    └──────────────────────┬──────────────────────┘
//!          ▲                                │
//!          │                                ▼
//!     ┌─────────┐                  data_dir/*.json
//!     │ config  │ (watcher swaps resolver on change)
//!     └─────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use layout_service::config::{load_config, ConfigWatcher, ServiceConfig};
use layout_service::http::HttpServer;
use layout_service::layout::LayoutResolver;
use layout_service::lifecycle::{signals, Shutdown};
use layout_service::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "layout-service")]
#[command(about = "Disconnected layout service backed by exported route files", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve layout data over HTTP (default)
    Serve,
    /// Resolve a single path and print the layout document
    Resolve {
        /// Page path, e.g. /about
        path: String,

        /// Language code
        #[arg(short, long)]
        lang: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, cli.config).await,
        Command::Resolve { path, lang } => {
            let resolver = LayoutResolver::from_config(&config.layout);
            let resolved = resolver.resolve_detailed(&path, lang.as_deref()).await;

            tracing::info!(outcome = resolved.resolution.as_str(), "Resolved {}", path);
            println!("{}", serde_json::to_string_pretty(&resolved.document)?);
            Ok(())
        }
    }
}

async fn serve(
    config: ServiceConfig,
    config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("layout-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_dir = %config.layout.data_dir,
        site_name = %config.layout.site_name,
        default_language = %config.layout.default_language,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher handle must outlive the server; the sender keeps the
    // update channel open when no config file is watched.
    let (_static_tx, static_rx) = mpsc::unbounded_channel();
    let (_watcher, config_updates) = match config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(&path);
            (Some(watcher.run()?), updates)
        }
        None => (None, static_rx),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::trigger_on_signal(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
