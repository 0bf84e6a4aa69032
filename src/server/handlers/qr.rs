//! QR slip handler.

use axum::{Json, extract::State, response::Response};
use std::sync::Arc;

use super::{map_error, queued_response};
use crate::qr::{self, QrSlip};
use crate::queue::PrintJob;
use crate::server::state::AppState;

/// Handle POST /api/print/qr - render a QR slip and queue it.
pub async fn print(State(state): State<Arc<AppState>>, Json(slip): Json<QrSlip>) -> Response {
    let bytes = match qr::render(&slip, state.config.columns) {
        Ok(b) => b,
        Err(e) => return map_error(&e),
    };

    let printer = match state.resolve_printer().await {
        Ok(p) => p,
        Err(e) => return map_error(&e),
    };

    match state.queue.enqueue(PrintJob::raster(&printer, bytes)) {
        Ok(id) => queued_response(id, &printer),
        Err(e) => map_error(&e),
    }
}
