//! Raw ZPL pass-through handler.

use axum::{Json, extract::State, http::StatusCode, response::Response};
use serde::Deserialize;
use std::sync::Arc;

use super::{error_response, map_error, queued_response};
use crate::queue::PrintJob;
use crate::server::state::AppState;

/// Form data for raw ZPL submission.
#[derive(Debug, Deserialize)]
pub struct ZplForm {
    /// Complete ZPL markup, queued without modification
    pub zpl: String,
}

/// Handle POST /api/print/zpl - queue a raw ZPL string.
pub async fn print(State(state): State<Arc<AppState>>, Json(form): Json<ZplForm>) -> Response {
    if form.zpl.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "ZPL body cannot be empty");
    }

    let printer = match state.resolve_printer().await {
        Ok(p) => p,
        Err(e) => return map_error(&e),
    };

    match state.queue.enqueue(PrintJob::zpl(&printer, form.zpl)) {
        Ok(id) => queued_response(id, &printer),
        Err(e) => map_error(&e),
    }
}
