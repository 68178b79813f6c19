//! cardiorisk-web - Myocardial infarction risk form service
//!
//! Serves the clinical input form, loads the imputer and classifier
//! artifacts once at startup, and answers `/predict` with a risk label.
//! Missing artifacts degrade `/predict` to a diagnostic; the form keeps
//! working.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cardiorisk_common::config::{ConfigOverrides, ServiceConfig};
use cardiorisk_common::ModelState;
use cardiorisk_web::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for cardiorisk-web
#[derive(Parser, Debug)]
#[command(name = "cardiorisk-web")]
#[command(about = "Myocardial infarction risk prediction form")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "CARDIORISK_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "CARDIORISK_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CARDIORISK_PORT")]
    port: Option<u16>,

    /// Classifier artifact (JSON)
    #[arg(long, env = "CARDIORISK_MODEL_PATH")]
    model_path: Option<PathBuf>,

    /// Imputer artifact (JSON)
    #[arg(long, env = "CARDIORISK_IMPUTER_PATH")]
    imputer_path: Option<PathBuf>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_file: args.config,
            host: args.host,
            port: args.port,
            model_path: args.model_path,
            imputer_path: args.imputer_path,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let overrides = ConfigOverrides::from(args);
    let config = ServiceConfig::resolve(&overrides).context("Failed to load configuration")?;

    // Config is resolved before tracing exists; its findings are logged below.
    // RUST_LOG wins over the configured level.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting cardiorisk-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = &config.missing_config_file {
        warn!("Config file {} not found, using defaults", path.display());
    }
    match &config.config_file {
        Some(path) => info!("Loaded config file {}", path.display()),
        None => info!("No config file, using command line, environment and defaults"),
    }

    info!("Imputer artifact: {}", config.imputer_path.display());
    info!("Model artifact: {}", config.model_path.display());
    let model = ModelState::load(&config.imputer_path, &config.model_path);
    if model.is_available() {
        info!("✓ Model artifacts loaded");
    } else {
        warn!("Serving form without inference: /predict will report the model as unavailable");
    }

    let state = AppState::new(model);
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("cardiorisk-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
