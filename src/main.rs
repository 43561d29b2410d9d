//! radix-router server.
//!
//! Serves a TOML route table over HTTP. Every request is resolved through
//! the radix tree and answered with the matched route's configured
//! response.
//!
//! ```text
//!     Client Request
//!     ───────────────▶ axum (request id, trace, timeout)
//!                          │
//!                          ▼
//!                      SharedRouter ──load──▶ Router (compacted radix tree)
//!                          ▲                       │
//!                          │ swap                  ▼
//!     routes.toml ──▶ ConfigWatcher          RouteHandler::render
//!                                                  │
//!     Client Response ◀────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use radix_router::config::{load_config, ConfigWatcher};
use radix_router::http::{build_router, HttpServer};
use radix_router::lifecycle::{apply_route_updates, shutdown_signal};
use radix_router::observability::{logging, metrics};
use radix_router::routing::SharedRouter;

#[derive(Parser)]
#[command(name = "radix-router")]
#[command(about = "Serve a route table through a radix tree router", long_about = None)]
struct Cli {
    /// Route table to serve.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Reload the route table when the file changes.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("radix-router v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let router = build_router(&config.routes)?;
    metrics::set_routes_loaded(router.len());
    let shared = Arc::new(SharedRouter::new(router));

    tracing::info!(
        config = %cli.config.display(),
        routes = config.routes.len(),
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    // Keep the watcher alive for the life of the server.
    let _watcher = if cli.watch {
        let (watcher, updates) = ConfigWatcher::new(&cli.config);
        let handle = watcher.run()?;
        tokio::spawn(apply_route_updates(updates, Arc::clone(&shared)));
        Some(handle)
    } else {
        None
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config.server, shared);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
