//! Server state and configuration.

use std::path::PathBuf;

use tokio::sync::RwLock;

use crate::error::ImprentaError;
use crate::printer::{self, PrinterDirectory, PrinterPreferences};
use crate::queue::JobQueue;
use crate::ticket;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:9123")
    pub listen_addr: String,
    /// Path of the preferred-printer preferences file
    pub preferences_path: PathBuf,
    /// Ticket column width in characters
    pub columns: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9123".to_string(),
            preferences_path: PathBuf::from("imprenta-preferences.json"),
            columns: ticket::DEFAULT_COLUMNS,
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Handle into the single print queue; handlers only ever enqueue
    pub queue: JobQueue,
    pub directory: RwLock<PrinterDirectory>,
    pub preferences: RwLock<PrinterPreferences>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        queue: JobQueue,
        directory: PrinterDirectory,
        preferences: PrinterPreferences,
    ) -> Self {
        Self {
            config,
            queue,
            directory: RwLock::new(directory),
            preferences: RwLock::new(preferences),
        }
    }

    /// Resolve the printer the next job should target.
    pub async fn resolve_printer(&self) -> Result<String, ImprentaError> {
        let directory = self.directory.read().await;
        let preferences = self.preferences.read().await;
        printer::resolve_printer(&preferences, &directory)
    }
}
