//! # Print Job Queue & Worker
//!
//! An unbounded first-in-first-out queue of typed print jobs and the single
//! background worker that drains it.
//!
//! ## Ordering and Mutual Exclusion
//!
//! The queue is the only path to the printer transport. Handlers enqueue
//! and return immediately; the worker dequeues strictly in FIFO order and
//! keeps at most one job in flight at any instant. That single consumer is
//! the sole mechanism protecting the physical device from interleaved
//! writes; there is no other lock.
//!
//! ## Job Lifecycle
//!
//! ```text
//! Queued -> InFlight -> Delivered
//!                    -> Failed      (logged; never retried)
//! ```
//!
//! A transport failure marks that job `Failed` and the worker moves on; a
//! single bad job never stops the loop. There is no cancellation: once
//! enqueued, a job runs to a terminal state.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::ImprentaError;
use crate::protocol::commands;
use crate::transport::Transport;

/// Encoded payload of a print job.
#[derive(Debug, Clone)]
pub enum JobPayload {
    /// Plain text, printed with a trailing cut
    Text(String),
    /// ZPL label markup, sent as-is
    Zpl(String),
    /// Pre-rendered ESC/POS bytes (tickets, QR slips)
    Raster(Vec<u8>),
}

impl JobPayload {
    /// Short kind tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Zpl(_) => "zpl",
            Self::Raster(_) => "raster",
        }
    }
}

/// Job lifecycle states, logged at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Queued,
    InFlight,
    Delivered,
    Failed,
}

/// One print job: immutable once constructed, consumed exactly once.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub id: Uuid,
    /// Target printer name, resolved at enqueue time
    pub printer: String,
    pub payload: JobPayload,
}

impl PrintJob {
    pub fn text(printer: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(printer, JobPayload::Text(body.into()))
    }

    pub fn zpl(printer: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(printer, JobPayload::Zpl(label.into()))
    }

    pub fn raster(printer: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(printer, JobPayload::Raster(data))
    }

    fn new(printer: impl Into<String>, payload: JobPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            printer: printer.into(),
            payload,
        }
    }

    /// Encode the payload into the bytes the transport will deliver.
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.payload {
            JobPayload::Text(body) => {
                let mut out = commands::init();
                out.extend_from_slice(body.as_bytes());
                if !body.ends_with('\n') {
                    out.push(commands::LF);
                }
                out.extend(commands::cut());
                out
            }
            JobPayload::Zpl(label) => label.clone().into_bytes(),
            JobPayload::Raster(data) => data.clone(),
        }
    }
}

/// Handle for enqueueing jobs. Cheap to clone; all clones feed the same
/// worker.
#[derive(Clone)]
pub struct JobQueue {
    tx: UnboundedSender<PrintJob>,
}

impl JobQueue {
    /// Spawn the worker task and return the queue handle.
    ///
    /// The worker runs until every queue handle is dropped, then drains
    /// what remains and exits.
    pub fn start(transport: Arc<dyn Transport>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(worker(rx, transport));
        (Self { tx }, handle)
    }

    /// Append a job to the tail of the queue. Never blocks.
    ///
    /// ## Errors
    ///
    /// Fails only when the worker task is gone, which cannot happen during
    /// normal operation (the worker outlives every handle).
    pub fn enqueue(&self, job: PrintJob) -> Result<Uuid, ImprentaError> {
        let id = job.id;
        info!(
            job = %id,
            kind = job.payload.kind(),
            printer = %job.printer,
            state = ?JobState::Queued,
            "job queued"
        );
        self.tx
            .send(job)
            .map_err(|_| ImprentaError::Transport("Print worker has shut down".to_string()))?;
        Ok(id)
    }
}

/// Single consumer: strictly one job in flight, FIFO, suspended while the
/// queue is empty.
async fn worker(mut rx: UnboundedReceiver<PrintJob>, transport: Arc<dyn Transport>) {
    while let Some(job) = rx.recv().await {
        let bytes = job.to_bytes();
        info!(
            job = %job.id,
            printer = %job.printer,
            len = bytes.len(),
            state = ?JobState::InFlight,
            "sending job"
        );

        match transport.send(&job.printer, &bytes).await {
            Ok(()) => {
                info!(job = %job.id, state = ?JobState::Delivered, "job delivered");
            }
            Err(e) => {
                // Terminal: logged, not retried, loop continues
                error!(job = %job.id, state = ?JobState::Failed, error = %e, "job failed");
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
