//! Request handlers, one module per operation.
//!
//! Handlers validate, encode, and enqueue; none of them touches the printer
//! transport directly. The response is a small status object: `queued` with
//! the job id, or `error` with a human-readable message.

pub mod labels;
pub mod printers;
pub mod qr;
pub mod text;
pub mod ticket;
pub mod zpl;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::error::ImprentaError;

/// Standard acknowledgment for an enqueued job.
pub(super) fn queued_response(job_id: Uuid, printer: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "queued",
            "job_id": job_id,
            "printer": printer,
        })),
    )
        .into_response()
}

/// Standard error envelope.
pub(super) fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status": "error",
            "message": message,
        })),
    )
        .into_response()
}

/// Map a core error to the response status its taxonomy calls for.
pub(super) fn map_error(err: &ImprentaError) -> Response {
    let status = match err {
        ImprentaError::Validation(_) | ImprentaError::Decode(_) => StatusCode::BAD_REQUEST,
        ImprentaError::Config(_) => StatusCode::BAD_REQUEST,
        ImprentaError::Transport(_) | ImprentaError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, &err.to_string())
}
