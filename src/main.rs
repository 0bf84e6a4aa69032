//! # Imprenta CLI
//!
//! Command-line interface for the print server.
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! imprenta serve --listen 0.0.0.0:9123
//!
//! # List installed printers and the current preference
//! imprenta printers
//!
//! # Set the preferred printer
//! imprenta prefer "EPSON TM-T20III"
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use imprenta::{
    ImprentaError, ServerConfig,
    printer::{PrinterDirectory, PrinterPreferences},
    server, ticket,
};

/// Imprenta - print server for POS clients
#[derive(Parser, Debug)]
#[command(name = "imprenta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP print server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:9123")]
        listen: String,

        /// Preferred-printer preferences file
        #[arg(long, default_value = "imprenta-preferences.json")]
        preferences: PathBuf,

        /// Ticket column width in characters
        #[arg(long, default_value_t = ticket::DEFAULT_COLUMNS)]
        columns: usize,
    },

    /// List installed printers, the system default, and the preference
    Printers {
        /// Preferred-printer preferences file
        #[arg(long, default_value = "imprenta-preferences.json")]
        preferences: PathBuf,
    },

    /// Set the preferred printer
    Prefer {
        /// Printer name (must be installed)
        name: String,

        /// Preferred-printer preferences file
        #[arg(long, default_value = "imprenta-preferences.json")]
        preferences: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ImprentaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            preferences,
            columns,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                preferences_path: preferences,
                columns,
            };
            server::serve(config).await
        }

        Commands::Printers { preferences } => {
            let directory = PrinterDirectory::probe()?;
            let preferences = PrinterPreferences::load(preferences)?;

            if directory.list_installed().is_empty() {
                println!("No printers installed.");
                return Ok(());
            }

            println!("Installed printers:");
            for name in directory.list_installed() {
                let mut tags = Vec::new();
                if directory.system_default() == Some(name.as_str()) {
                    tags.push("default");
                }
                if preferences.preferred() == Some(name.as_str()) {
                    tags.push("preferred");
                }
                if tags.is_empty() {
                    println!("  {}", name);
                } else {
                    println!("  {} ({})", name, tags.join(", "));
                }
            }
            Ok(())
        }

        Commands::Prefer { name, preferences } => {
            let directory = PrinterDirectory::probe()?;
            let mut preferences = PrinterPreferences::load(preferences)?;
            preferences.set_preferred(&name, &directory)?;
            println!("Preferred printer set to {}", name);
            Ok(())
        }
    }
}
