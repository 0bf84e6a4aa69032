//! # Error Types
//!
//! This module defines error types used throughout the imprenta server.

use thiserror::Error;

/// Main error type for imprenta operations
#[derive(Debug, Error)]
pub enum ImprentaError {
    /// Missing or malformed request field; reported to the caller, no side effect
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed embedded image data
    #[error("Image decode error: {0}")]
    Decode(String),

    /// Device unreachable or a spooler stage failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Bad printer configuration (e.g. unknown printer name)
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
