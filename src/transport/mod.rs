//! # Printer Transport Layer
//!
//! This module provides the delivery backend for sending encoded jobs to a
//! named printer.
//!
//! ## Available Transports
//!
//! - [`spooler`]: the operating system's print spooler (raw datatype)
//!
//! The [`Transport`] trait is the seam the queue worker writes through; the
//! integration tests substitute an in-memory implementation to observe
//! delivery order without hardware.

pub mod spooler;

use async_trait::async_trait;

use crate::error::ImprentaError;

/// Delivery backend for encoded print jobs.
///
/// `send` must bracket the write in a complete device session (open,
/// start document, write, end document, close) and report any stage
/// failure as an error rather than panicking.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, printer: &str, data: &[u8]) -> Result<(), ImprentaError>;
}

pub use spooler::SpoolerTransport;
