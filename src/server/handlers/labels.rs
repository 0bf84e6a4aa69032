//! Label batch handler: items in, ZPL out, queued.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::{error_response, map_error};
use crate::queue::PrintJob;
use crate::server::state::AppState;
use crate::zpl::{self, LabelItem, LayoutProfile};

/// Form data for a label batch.
#[derive(Debug, Deserialize)]
pub struct LabelForm {
    pub items: Vec<LabelItem>,
    /// Built-in layout profile name; defaults to `price-tag`
    #[serde(default)]
    pub profile: Option<String>,
}

/// Handle POST /api/print/labels - generate ZPL for a batch and queue it.
pub async fn print(State(state): State<Arc<AppState>>, Json(form): Json<LabelForm>) -> Response {
    let profile = match &form.profile {
        Some(name) => match LayoutProfile::by_name(name) {
            Some(p) => p,
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Unknown layout profile: {}", name),
                );
            }
        },
        None => LayoutProfile::default(),
    };

    let batch = zpl::build_labels(&form.items, &profile);
    if batch.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No valid label items");
    }

    let printer = match state.resolve_printer().await {
        Ok(p) => p,
        Err(e) => return map_error(&e),
    };

    match state.queue.enqueue(PrintJob::zpl(&printer, batch.zpl)) {
        Ok(id) => (
            StatusCode::OK,
            Json(json!({
                "status": "queued",
                "job_id": id,
                "printer": printer,
                "rendered": batch.rendered,
                "skipped": batch.skipped,
            })),
        )
            .into_response(),
        Err(e) => map_error(&e),
    }
}
