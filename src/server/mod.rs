//! # HTTP Server for Print Submission
//!
//! Exposes the print operations over a local network endpoint.
//!
//! ## Usage
//!
//! ```bash
//! imprenta serve --listen 0.0.0.0:9123
//! ```
//!
//! ## Routes
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `POST /api/print/text` | raw text with trailing cut |
//! | `POST /api/print/labels` | label batch → ZPL |
//! | `POST /api/print/zpl` | raw ZPL pass-through |
//! | `POST /api/print/ticket` | full ticket model |
//! | `POST /api/print/qr` | QR slip |
//! | `GET /api/printers` | directory listing |
//! | `PUT /api/printers/preferred` | preference change |
//! | `POST /api/printers/reload` | re-probe directory, re-read preferences |
//!
//! Every print operation validates, encodes, and enqueues; the response is
//! an acknowledgment, not a delivery receipt. Delivery failures surface in
//! the log only (the worker owns them).

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ImprentaError;
use crate::printer::{PrinterDirectory, PrinterPreferences};
use crate::queue::JobQueue;
use crate::transport::SpoolerTransport;

/// Build the application router for a prepared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/print/text", post(handlers::text::print))
        .route("/api/print/labels", post(handlers::labels::print))
        .route("/api/print/zpl", post(handlers::zpl::print))
        .route("/api/print/ticket", post(handlers::ticket::print))
        .route("/api/print/qr", post(handlers::qr::print))
        .route("/api/printers", get(handlers::printers::list))
        .route(
            "/api/printers/preferred",
            put(handlers::printers::set_preferred),
        )
        .route("/api/printers/reload", post(handlers::printers::reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server: probe printers, load preferences, spawn the
/// queue worker, and serve until shutdown.
pub async fn serve(config: ServerConfig) -> Result<(), ImprentaError> {
    let directory = PrinterDirectory::probe().unwrap_or_else(|e| {
        warn!(error = %e, "printer probe failed; starting with an empty directory");
        PrinterDirectory::with_installed(Vec::new())
    });
    let preferences = PrinterPreferences::load(&config.preferences_path)?;

    let (queue, _worker) = JobQueue::start(Arc::new(SpoolerTransport::new()));

    info!(
        listen = %config.listen_addr,
        printers = directory.list_installed().len(),
        "imprenta server starting"
    );

    let state = Arc::new(AppState::new(config.clone(), queue, directory, preferences));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            ImprentaError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ImprentaError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
