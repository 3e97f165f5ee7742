//! Depot: a single-node object storage service.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use depot_core::config::{Config, LogFormat};
use depot_rpc::proto::storage_service_server::StorageServiceServer;
use depot_rpc::StorageRpc;
use depot_storage::StorageService;
use tokio::signal;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

use cli::{Cli, Commands, ServeArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => run_server(args).await,
        Commands::Version => {
            println!("depot {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn run_server(args: ServeArgs) -> Result<()> {
    // Load configuration and apply CLI overrides
    let mut config =
        Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(root_dir) = args.root_dir {
        config.storage.root_dir = root_dir;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    init_logging(&config)?;

    let service = Arc::new(
        StorageService::open(&config.storage)
            .await
            .context("Failed to initialize storage backend")?,
    );

    let addr = config.server.bind;
    info!(
        %addr,
        root_dir = %config.storage.root_dir.display(),
        backend = ?config.storage.metadata_backend,
        "Depot starting"
    );
    println!("\n  Ready to accept connections.\n");

    tonic::transport::Server::builder()
        .add_service(StorageServiceServer::new(StorageRpc::new(Arc::clone(&service))))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("Server error")?;

    // Release the metadata store before exiting
    service.close().await.context("Failed to release metadata store")?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry().with(filter).with(fmt_layer.json()).init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry().with(filter).with(fmt_layer).init();
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}
