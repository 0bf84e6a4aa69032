//! # Imprenta - Print Server for POS Clients
//!
//! Imprenta accepts structured print requests over a local network endpoint
//! and turns them into printer-native byte streams (raw text, ESC/POS
//! raster bitmaps, or ZPL label markup) delivered to a physical printer
//! through a single-writer job queue. Clients never speak the printer's
//! wire protocol; they submit semantic payloads (text, ticket contents,
//! barcode lists, QR payloads) and imprenta performs the protocol encoding
//! and delivery ordering.
//!
//! ## Pipeline
//!
//! ```text
//! request payload
//!   → raster encoder | ZPL generator | ticket engine
//!   → byte/string command buffer
//!   → PrintJob (FIFO queue)
//!   → worker (single consumer)
//!   → printer transport
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use imprenta::{
//!     queue::{JobQueue, PrintJob},
//!     transport::SpoolerTransport,
//!     zpl::{self, LabelItem, LayoutProfile},
//! };
//!
//! # async fn example() {
//! // Spawn the queue worker against the system spooler
//! let (queue, _worker) = JobQueue::start(Arc::new(SpoolerTransport::new()));
//!
//! // Generate a label batch and queue it
//! let items = vec![LabelItem {
//!     code: "4711".into(),
//!     name: Some("Cafe Molido".into()),
//!     price: Some("12.50".into()),
//! }];
//! let batch = zpl::build_labels(&items, &LayoutProfile::PRICE_TAG);
//! queue.enqueue(PrintJob::zpl("ZD420", batch.zpl)).unwrap();
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders and raster encoding |
//! | [`zpl`] | ZPL label generation (EAN-8, layout profiles) |
//! | [`ticket`] | Fixed-column receipt layout |
//! | [`qr`] | QR slip rendering |
//! | [`queue`] | FIFO job queue and worker |
//! | [`transport`] | Delivery backends |
//! | [`printer`] | Printer discovery and preferences |
//! | [`server`] | HTTP request surface |
//! | [`units`] | mm↔dot geometry |
//! | [`error`] | Error types |

pub mod error;
pub mod printer;
pub mod protocol;
pub mod qr;
pub mod queue;
pub mod server;
pub mod ticket;
pub mod transport;
pub mod units;
pub mod zpl;

// Re-exports for convenience
pub use error::ImprentaError;
pub use queue::{JobQueue, PrintJob};
pub use server::ServerConfig;
