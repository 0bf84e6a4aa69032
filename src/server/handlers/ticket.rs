//! Ticket rendering handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

use super::map_error;
use crate::queue::PrintJob;
use crate::server::state::AppState;
use crate::ticket::{self, TicketModel};

/// Handle POST /api/print/ticket - render a full ticket model and queue it.
///
/// Degraded sections (e.g. an undecodable logo) don't fail the request;
/// their diagnostics come back in the `warnings` array.
pub async fn print(State(state): State<Arc<AppState>>, Json(model): Json<TicketModel>) -> Response {
    let rendered = match ticket::render(&model, state.config.columns) {
        Ok(r) => r,
        Err(e) => return map_error(&e),
    };

    let printer = match state.resolve_printer().await {
        Ok(p) => p,
        Err(e) => return map_error(&e),
    };

    match state.queue.enqueue(PrintJob::raster(&printer, rendered.bytes)) {
        Ok(id) => (
            StatusCode::OK,
            Json(json!({
                "status": "queued",
                "job_id": id,
                "printer": printer,
                "warnings": rendered.warnings,
            })),
        )
            .into_response(),
        Err(e) => map_error(&e),
    }
}
