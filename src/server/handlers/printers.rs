//! Printer directory and preference handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::map_error;
use crate::server::state::AppState;

/// Handle GET /api/printers - installed printers, default, and preference.
pub async fn list(State(state): State<Arc<AppState>>) -> Response {
    let directory = state.directory.read().await;
    let preferences = state.preferences.read().await;

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "installed": directory.list_installed(),
            "system_default": directory.system_default(),
            "preferred": preferences.preferred(),
        })),
    )
        .into_response()
}

/// Form data for a preference change.
#[derive(Debug, Deserialize)]
pub struct PreferenceForm {
    pub name: String,
}

/// Handle PUT /api/printers/preferred - validate and persist a preference.
pub async fn set_preferred(
    State(state): State<Arc<AppState>>,
    Json(form): Json<PreferenceForm>,
) -> Response {
    let directory = state.directory.read().await;
    let mut preferences = state.preferences.write().await;

    match preferences.set_preferred(&form.name, &directory) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "preferred": form.name,
            })),
        )
            .into_response(),
        Err(e) => map_error(&e),
    }
}

/// Handle POST /api/printers/reload - re-probe the directory and re-read
/// the preferences file.
pub async fn reload(State(state): State<Arc<AppState>>) -> Response {
    {
        let mut directory = state.directory.write().await;
        if let Err(e) = directory.refresh() {
            return map_error(&e);
        }
    }
    {
        let mut preferences = state.preferences.write().await;
        if let Err(e) = preferences.reload() {
            return map_error(&e);
        }
    }

    list(State(state)).await
}
