//! MongoDB REST gateway
//!
//! Resolves every request path against the configured mounts and answers
//! with the MongoDB resource it addresses.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request    ┌───────────┐    ┌────────────┐    ┌──────────────┐
//!     ─────────────────▶│   http    │───▶│   tenant   │───▶│   routing    │
//!                       │  server   │    │ extraction │    │   resolver   │
//!                       └───────────┘    └────────────┘    └──────┬───────┘
//!                                                                 │
//!     Resolved context  ┌───────────┐                             │
//!     ◀─────────────────│   JSON    │◀────────────────────────────┘
//!                       └───────────┘
//!
//!     Cross-cutting: config, observability, lifecycle, admin
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use mount_gateway::admin::{self, AdminState};
use mount_gateway::config::load_or_default;
use mount_gateway::lifecycle::signals::trigger_on_signal;
use mount_gateway::observability::{logging, metrics};
use mount_gateway::routing::{MountResolver, MountTable};
use mount_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "mount-gateway", version)]
#[command(about = "MongoDB REST gateway mount resolver", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    logging::init_logging(&config.observability)?;

    tracing::info!("mount-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mounts = config.mounts.len(),
        tenancy = config.tenancy.enabled,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to install metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let resolver = Arc::new(MountResolver::new(MountTable::from_config(&config.mounts)?));

    let shutdown = Shutdown::new();
    tokio::spawn(trigger_on_signal(shutdown.clone()));

    if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address).await?;
        let state = AdminState {
            resolver: resolver.clone(),
            api_key: Arc::from(config.admin.api_key.as_str()),
        };
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            if let Err(e) = admin::serve(listener, state, rx).await {
                tracing::error!(error = %e, "Admin API failed");
            }
        });
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, resolver);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
