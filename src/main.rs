//! Policy Press server
//!
//! Loads configuration from the environment, wires the filesystem storage and
//! Pandoc converters into the HTTP router and serves until Ctrl-C.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use policy_press::adapters::http::{build_app, PolicyAppState};
use policy_press::adapters::{LocalPolicyFileStorage, PandocConverter};
use policy_press::config::{AppConfig, ServerConfig};
use policy_press::ports::{DocumentConverter, PolicyFileStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let storage = Arc::new(LocalPolicyFileStorage::new(config.storage.clone()));
    let pdf_converter = Arc::new(PandocConverter::pdf(&config.converter));
    let docx_converter = Arc::new(PandocConverter::docx(&config.converter));

    // Directories are also ensured on every save; this surfaces problems early.
    if let Err(err) = storage.ensure_layout().await {
        warn!(error = %err, "Could not prepare output directories");
    }
    if !pdf_converter.is_available().await {
        warn!("Pandoc not found; saves will fail until it is installed");
    }

    let state = PolicyAppState::new(storage, pdf_converter, docx_converter);
    let app = build_app(state, &config.server);

    // Host names such as `localhost` are resolved here.
    let listener = TcpListener::bind(config.server.bind_address()).await?;
    let addr = listener.local_addr()?;

    info!(
        %addr,
        environment = ?config.server.environment,
        templates = %config.storage.templates_dir.display(),
        pdf = %config.storage.pdf_dir.display(),
        docx = %config.storage.docx_dir.display(),
        "Server listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging. `RUST_LOG` wins over the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if server.use_json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
