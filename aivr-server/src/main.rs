//! aivr-server - AI vs Real quiz server
//!
//! Serves the browser game and its images from one asset root. With `--api`
//! it also answers `GET /api/next-image` from a pool loaded at startup.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aivr_common::config::TomlConfig;
use aivr_server::config::{Args, ServerConfig};
use aivr_server::pool::build_pool;
use aivr_server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Read before tracing starts so [logging] level can seed the filter
    let toml = TomlConfig::load_optional(args.config.as_deref())
        .context("Failed to load config file")?;
    let config_path = args.config.clone();
    let config = ServerConfig::resolve(args, toml);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting AI vs Real server (aivr-server) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if let Some(path) = config_path.filter(|path| !path.exists()) {
        warn!("Config file {} not found, using defaults", path.display());
    }

    let root_folder = match config.root_folder.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            warn!(
                "Asset root {} is not accessible ({}), every asset request will 404",
                config.root_folder.display(),
                e
            );
            config.root_folder.clone()
        }
    };
    info!("Serving assets from {}", root_folder.display());

    let mut state = AppState::new(root_folder.clone());
    if config.api {
        let pool = build_pool(&root_folder, config.pool_origin, &config.pool_dirs)
            .context("Failed to load image pool for /api/next-image")?;
        state = state.with_pool(pool);
        info!("GET /api/next-image enabled ({:?} pool)", config.pool_origin);
    }

    let app = build_router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("aivr-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
