//! GST invoice API server
//!
//! Main entry point for the invoice HTTP service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gst_invoice_api::{AppState, create_router};
use gst_invoice_shared::AppConfig;
use gst_invoice_store::InvoiceRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gst_invoice=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let repository = match &config.storage.invoices_path {
        Some(path) => InvoiceRepository::open(path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?,
        None => {
            warn!("No invoices_path configured; records are kept in memory only");
            InvoiceRepository::in_memory()
        }
    };
    info!(
        igst_rate = %config.invoice.igst_rate,
        lut_id = %config.invoice.lut_id,
        "Invoice defaults loaded"
    );

    let app = create_router(AppState::new(repository, config.invoice.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
