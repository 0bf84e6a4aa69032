//! Raw text printing handler.

use axum::{Json, extract::State, http::StatusCode, response::Response};
use serde::Deserialize;
use std::sync::Arc;

use super::{error_response, map_error, queued_response};
use crate::queue::PrintJob;
use crate::server::state::AppState;

/// Form data for raw text printing.
#[derive(Debug, Deserialize)]
pub struct TextForm {
    /// Text to print; a trailing cut is always appended
    pub body: String,
}

/// Handle POST /api/print/text - queue raw text with a trailing cut.
pub async fn print(State(state): State<Arc<AppState>>, Json(form): Json<TextForm>) -> Response {
    if form.body.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Body cannot be empty");
    }

    let printer = match state.resolve_printer().await {
        Ok(p) => p,
        Err(e) => return map_error(&e),
    };

    match state.queue.enqueue(PrintJob::text(&printer, form.body)) {
        Ok(id) => queued_response(id, &printer),
        Err(e) => map_error(&e),
    }
}
