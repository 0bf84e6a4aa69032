//! # QR Slip Rendering
//!
//! Renders a QR payload with a text block above and below it: the format
//! used for loyalty links, order pickup codes, and fiscal verification
//! slips.
//!
//! The QR symbol is generated in-process, walked module by module into a
//! bitmap (scaled cells plus a quiet zone), and embedded through the raster
//! encoder like any other image section.

use image::{DynamicImage, GrayImage, Luma};
use qrcode::QrCode;

use crate::error::ImprentaError;
use crate::protocol::{commands, raster};
use crate::ticket::layout::center;

/// Pixels per QR module
const CELL_SIZE: u32 = 8;

/// Quiet-zone width around the symbol, in modules
const QUIET_MODULES: u32 = 2;

/// A QR slip request: the encoded payload and its surrounding text.
#[derive(Debug, serde::Deserialize)]
pub struct QrSlip {
    /// Data encoded into the QR symbol
    pub data: String,
    /// Lines printed centered above the symbol
    #[serde(default)]
    pub top: Vec<String>,
    /// Lines printed centered below the symbol
    #[serde(default)]
    pub bottom: Vec<String>,
}

/// Render a QR slip into printer bytes (init + text + QR raster + text +
/// cut).
///
/// ## Errors
///
/// Returns [`ImprentaError::Validation`] when the payload is empty or too
/// large to encode.
pub fn render(slip: &QrSlip, columns: usize) -> Result<Vec<u8>, ImprentaError> {
    if slip.data.trim().is_empty() {
        return Err(ImprentaError::Validation(
            "QR payload cannot be empty".to_string(),
        ));
    }

    let bitmap = qr_bitmap(&slip.data)?;

    let mut out = commands::init();
    for line in &slip.top {
        out.extend_from_slice(center(line, columns).as_bytes());
        out.push(commands::LF);
    }
    out.extend(raster::encode(&bitmap)?);
    for line in &slip.bottom {
        out.extend_from_slice(center(line, columns).as_bytes());
        out.push(commands::LF);
    }
    out.extend(commands::feed_lines(3));
    out.extend(commands::cut());
    Ok(out)
}

/// Generate the QR symbol and expand its module grid into a bitmap.
fn qr_bitmap(data: &str) -> Result<DynamicImage, ImprentaError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| ImprentaError::Validation(format!("QR encoding failed: {}", e)))?;

    let modules = code.width() as u32;
    let size = (modules + 2 * QUIET_MODULES) * CELL_SIZE;
    let mut img = GrayImage::from_pixel(size, size, Luma([255u8]));

    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx as usize, qy as usize)] != qrcode::Color::Dark {
                continue;
            }
            let base_x = (qx + QUIET_MODULES) * CELL_SIZE;
            let base_y = (qy + QUIET_MODULES) * CELL_SIZE;
            for cy in 0..CELL_SIZE {
                for cx in 0..CELL_SIZE {
                    img.put_pixel(base_x + cx, base_y + cy, Luma([0u8]));
                }
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::DEFAULT_COLUMNS;

    fn slip(data: &str) -> QrSlip {
        QrSlip {
            data: data.to_string(),
            top: vec!["SCAN ME".to_string()],
            bottom: vec!["example.com".to_string()],
        }
    }

    #[test]
    fn test_render_brackets_init_and_cut() {
        let bytes = render(&slip("https://example.com/t/42"), DEFAULT_COLUMNS).unwrap();
        assert_eq!(&bytes[..2], &[0x1B, 0x40]);
        assert_eq!(&bytes[bytes.len() - 4..], &[0x1D, 0x56, 66, 0]);
    }

    #[test]
    fn test_contains_raster_rows() {
        let bytes = render(&slip("x"), DEFAULT_COLUMNS).unwrap();
        // At least one raster row header
        assert!(bytes.windows(3).any(|w| w == [0x1B, 0x2A, 0x21]));
    }

    #[test]
    fn test_text_blocks_present() {
        let bytes = render(&slip("x"), DEFAULT_COLUMNS).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("SCAN ME"));
        assert!(text.contains("example.com"));
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(render(&slip("   "), DEFAULT_COLUMNS).is_err());
    }

    #[test]
    fn test_bitmap_is_square_with_quiet_zone() {
        use image::GenericImageView;

        let img = qr_bitmap("hello").unwrap();
        let (w, h) = img.dimensions();
        assert_eq!(w, h);
        // 21 modules (version 1) + 2*2 quiet modules, 8 px cells
        assert_eq!(w, (21 + 4) * CELL_SIZE);
    }

    #[test]
    fn test_deterministic() {
        let a = render(&slip("same"), DEFAULT_COLUMNS).unwrap();
        let b = render(&slip("same"), DEFAULT_COLUMNS).unwrap();
        assert_eq!(a, b);
    }
}
