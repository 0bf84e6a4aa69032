//! # Raw Spooler Transport
//!
//! Delivers encoded job bytes to a named printer through the operating
//! system's print spooler, with the `RAW` datatype so the driver passes the
//! ESC/POS or ZPL stream through untouched.
//!
//! ## Session Lifecycle
//!
//! Every send is bracketed in a full device session:
//!
//! ```text
//! open printer -> start document -> start page -> write -> end page
//!   -> end document -> close printer
//! ```
//!
//! On Windows this maps one-to-one onto the Win32 spooler calls
//! (`OpenPrinterW` … `ClosePrinter`). On Unix hosts the same contract is
//! kept by handing the bytes to `lp -d <printer> -o raw`, which owns the
//! equivalent session against CUPS.
//!
//! Writes are synchronous at the OS level, so [`SpoolerTransport::send`]
//! runs them on a blocking task.

use async_trait::async_trait;
use tracing::{info, instrument};

use super::Transport;
use crate::error::ImprentaError;

/// Transport backed by the system print spooler.
#[derive(Debug, Clone, Default)]
pub struct SpoolerTransport;

impl SpoolerTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for SpoolerTransport {
    #[instrument(skip(self, data), fields(printer = %printer, data_len = data.len()))]
    async fn send(&self, printer: &str, data: &[u8]) -> Result<(), ImprentaError> {
        info!("spooling {} bytes", data.len());

        let printer = printer.to_string();
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || spool_raw(&printer, &data))
            .await
            .map_err(|e| ImprentaError::Transport(format!("Spool task failed: {}", e)))?
    }
}

/// Pipe raw bytes into the CUPS scheduler via `lp`.
///
/// `-o raw` disables all filtering; the printer receives the stream as
/// encoded.
#[cfg(unix)]
fn spool_raw(printer: &str, data: &[u8]) -> Result<(), ImprentaError> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let mut child = Command::new("lp")
        .arg("-d")
        .arg(printer)
        .arg("-o")
        .arg("raw")
        .arg("-s")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ImprentaError::Transport(format!("Failed to run lp: {}", e)))?;

    child
        .stdin
        .take()
        .ok_or_else(|| ImprentaError::Transport("lp stdin unavailable".to_string()))?
        .write_all(data)
        .map_err(|e| ImprentaError::Transport(format!("Write to lp failed: {}", e)))?;

    let output = child
        .wait_with_output()
        .map_err(|e| ImprentaError::Transport(format!("lp did not exit: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ImprentaError::Transport(format!(
            "lp failed for printer {}: {}",
            printer,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Write raw bytes through the Win32 spooler with the `RAW` datatype.
#[cfg(windows)]
fn spool_raw(printer: &str, data: &[u8]) -> Result<(), ImprentaError> {
    use core::ffi::c_void;
    use windows::Win32::Graphics::Printing::{
        ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, OpenPrinterW, PRINTER_HANDLE,
        StartDocPrinterW, StartPagePrinter, WritePrinter,
    };
    use windows::core::{PCWSTR, PWSTR};

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    unsafe {
        let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
        let name_w = to_wide(printer);

        OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
            .map_err(|_| ImprentaError::Transport(format!("OpenPrinter failed: {}", printer)))?;

        let doc_name_w = to_wide("imprenta job");
        let datatype_w = to_wide("RAW");
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
        };

        if StartDocPrinterW(handle, 1, &doc_info as *const DOC_INFO_1W) == 0 {
            let _ = ClosePrinter(handle);
            return Err(ImprentaError::Transport(
                "StartDocPrinter failed".to_string(),
            ));
        }

        if !StartPagePrinter(handle).as_bool() {
            let _ = EndDocPrinter(handle);
            let _ = ClosePrinter(handle);
            return Err(ImprentaError::Transport(
                "StartPagePrinter failed".to_string(),
            ));
        }

        let mut written: u32 = 0;
        let ok = WritePrinter(
            handle,
            data.as_ptr() as *const c_void,
            data.len() as u32,
            &mut written,
        );

        let _ = EndPagePrinter(handle);
        let _ = EndDocPrinter(handle);
        let _ = ClosePrinter(handle);

        if !ok.as_bool() {
            return Err(ImprentaError::Transport("WritePrinter failed".to_string()));
        }

        if written != data.len() as u32 {
            return Err(ImprentaError::Transport("Incomplete write".to_string()));
        }

        Ok(())
    }
}

// Note: transport tests require an installed printer or a CUPS queue.
// Delivery-order and failure-isolation behavior is covered by the queue
// tests against an in-memory Transport implementation.
