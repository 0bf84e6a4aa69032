//! # Printer Directory
//!
//! Enumerates the printers installed on the host and the system default.
//!
//! The directory is a snapshot: it is probed at startup and on explicit
//! refresh, never implicitly. Preference changes are validated against it
//! before anything is persisted.
//!
//! ## Platform Probes
//!
//! - Unix: `lpstat -e` for installed queues, `lpstat -d` for the default
//! - Windows: `EnumPrintersW` / `GetDefaultPrinterW`
//!
//! Tests construct the directory directly with [`PrinterDirectory::with_installed`].

use crate::error::ImprentaError;

/// Snapshot of the host's installed printers.
#[derive(Debug, Clone)]
pub struct PrinterDirectory {
    installed: Vec<String>,
    default: Option<String>,
}

impl PrinterDirectory {
    /// Probe the operating system for installed printers and the default.
    pub fn probe() -> Result<Self, ImprentaError> {
        let installed = probe_installed()?;
        let default = probe_default();
        Ok(Self { installed, default })
    }

    /// Build a directory from a fixed list (tests, dry runs).
    pub fn with_installed(installed: Vec<String>) -> Self {
        let default = installed.first().cloned();
        Self { installed, default }
    }

    /// Names of all installed printers.
    pub fn list_installed(&self) -> &[String] {
        &self.installed
    }

    /// The system default printer, if one is configured.
    pub fn system_default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Whether `name` is an installed printer.
    pub fn contains(&self, name: &str) -> bool {
        self.installed.iter().any(|p| p == name)
    }

    /// Re-probe the operating system, replacing the snapshot.
    pub fn refresh(&mut self) -> Result<(), ImprentaError> {
        let fresh = Self::probe()?;
        *self = fresh;
        Ok(())
    }
}

/// List installed print queues via `lpstat -e` (one name per line).
#[cfg(unix)]
fn probe_installed() -> Result<Vec<String>, ImprentaError> {
    use std::process::Command;

    let output = Command::new("lpstat")
        .arg("-e")
        .output()
        .map_err(|e| ImprentaError::Config(format!("Failed to run lpstat: {}", e)))?;

    // lpstat exits nonzero when no destinations exist; that's an empty
    // directory, not an error
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Parse the default destination from `lpstat -d`.
///
/// Output format: `system default destination: printer_name`
#[cfg(unix)]
fn probe_default() -> Option<String> {
    use std::process::Command;

    let output = Command::new("lpstat").arg("-d").output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|l| l.rsplit_once(':').map(|(_, name)| name.trim().to_string()))
        .filter(|name| !name.is_empty())
}

#[cfg(windows)]
fn probe_installed() -> Result<Vec<String>, ImprentaError> {
    use windows::Win32::Graphics::Printing::{
        EnumPrintersW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_INFO_5W,
    };
    use windows::core::PWSTR;

    unsafe {
        let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
        let mut needed: u32 = 0;
        let mut returned: u32 = 0;

        let _ = EnumPrintersW(flags, None, 5, None, &mut needed, &mut returned);
        if needed == 0 {
            return Ok(Vec::new());
        }

        let mut buf: Vec<u8> = vec![0; needed as usize];
        EnumPrintersW(
            flags,
            None,
            5,
            Some(buf.as_mut_slice()),
            &mut needed,
            &mut returned,
        )
        .map_err(|_| ImprentaError::Config("EnumPrinters failed".to_string()))?;

        let ptr = buf.as_ptr() as *const PRINTER_INFO_5W;
        let slice = std::slice::from_raw_parts(ptr, returned as usize);

        let mut result = Vec::new();
        for info in slice {
            if info.pPrinterName.is_null() {
                continue;
            }
            result.push(PWSTR(info.pPrinterName.0).to_string().unwrap_or_default());
        }
        Ok(result)
    }
}

#[cfg(windows)]
fn probe_default() -> Option<String> {
    use windows::Win32::Graphics::Printing::GetDefaultPrinterW;
    use windows::core::PWSTR;

    unsafe {
        let mut needed: u32 = 0;
        let _ = GetDefaultPrinterW(None, &mut needed);
        if needed == 0 {
            return None;
        }

        let mut buf: Vec<u16> = vec![0; needed as usize];
        if !GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed).as_bool() {
            return None;
        }
        PWSTR(buf.as_mut_ptr()).to_string().ok()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_installed() {
        let dir = PrinterDirectory::with_installed(vec!["TM-T20".into(), "ZD420".into()]);
        assert_eq!(dir.list_installed().len(), 2);
        assert!(dir.contains("ZD420"));
        assert!(!dir.contains("Ghost"));
    }

    #[test]
    fn test_default_is_first_installed() {
        let dir = PrinterDirectory::with_installed(vec!["TM-T20".into(), "ZD420".into()]);
        assert_eq!(dir.system_default(), Some("TM-T20"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = PrinterDirectory::with_installed(vec![]);
        assert!(dir.list_installed().is_empty());
        assert!(dir.system_default().is_none());
    }
}
