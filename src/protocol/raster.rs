//! # ESC/POS Raster Encoding
//!
//! Converts a decoded bitmap into per-row raster command bytes.
//!
//! ## Raster Line Format
//!
//! Each image row is emitted as one self-contained raster line:
//!
//! ```text
//! ┌──────────────────────┬─────────────────────────┬────┐
//! │ ESC * 0x21 nL nH     │ ceil(width/8) data bytes │ LF │
//! │ (5-byte header)      │ (packed bits, MSB first) │    │
//! └──────────────────────┴─────────────────────────┴────┘
//!
//! nL + nH * 256 == ceil(width/8)
//! ```
//!
//! ## Bit Packing
//!
//! Each data byte covers 8 horizontal pixels:
//! - Bit 7 (MSB) = leftmost pixel
//! - Bit 0 (LSB) = rightmost pixel
//! - 1 = print (dark), 0 = blank
//!
//! A pixel prints when its mean RGB luminance `(R+G+B)/3` is below 128.
//! Pixels past the image width in the final byte of a row stay 0.
//!
//! ## Determinism
//!
//! Output length is exactly `height * (5 + ceil(width/8) + 1)` bytes and is
//! identical for identical input.

use image::{DynamicImage, GenericImageView};

use super::commands::{ESC, LF};
use crate::error::ImprentaError;

/// Bytes in the per-row raster header (`ESC * 0x21 nL nH`)
pub const HEADER_LEN: usize = 5;

/// Luminance threshold below which a pixel prints
const DARK_THRESHOLD: u16 = 128;

/// Encode a decoded bitmap as ESC/POS raster command bytes.
///
/// ## Parameters
///
/// - `image`: any decoded image; color is reduced to mean RGB luminance
///
/// ## Errors
///
/// Returns [`ImprentaError::Validation`] for a zero-dimension image. No
/// upper bound is enforced; callers should bound width to the physical
/// paper width.
///
/// ## Example
///
/// ```
/// use image::{DynamicImage, RgbImage};
/// use imprenta::protocol::raster;
///
/// // A 1x1 black pixel encodes to one 7-byte row
/// let img = DynamicImage::ImageRgb8(RgbImage::new(1, 1));
/// let bytes = raster::encode(&img).unwrap();
/// assert_eq!(bytes, vec![0x1B, 0x2A, 0x21, 0x01, 0x00, 0x80, 0x0A]);
/// ```
pub fn encode(image: &DynamicImage) -> Result<Vec<u8>, ImprentaError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImprentaError::Validation(format!(
            "Cannot encode a {}x{} image",
            width, height
        )));
    }

    let width_bytes = width.div_ceil(8) as usize;
    let mut out = Vec::with_capacity(height as usize * (HEADER_LEN + width_bytes + 1));

    for y in 0..height {
        out.push(ESC);
        out.push(b'*');
        out.push(0x21);
        out.push((width_bytes % 256) as u8);
        out.push((width_bytes / 256) as u8);

        for byte_start in (0..width).step_by(8) {
            let mut packed = 0u8;
            for bit in 0..8 {
                let x = byte_start + bit;
                if x < width && is_dark(image, x, y) {
                    packed |= 0x80 >> bit;
                }
            }
            out.push(packed);
        }

        out.push(LF);
    }

    Ok(out)
}

/// Whether a pixel prints: mean RGB luminance below the threshold.
#[inline]
fn is_dark(image: &DynamicImage, x: u32, y: u32) -> bool {
    let [r, g, b, _] = image.get_pixel(x, y).0;
    let luminance = (r as u16 + g as u16 + b as u16) / 3;
    luminance < DARK_THRESHOLD
}

/// Exact output length for a given image size.
///
/// `height * (5 + ceil(width/8) + 1)`. Useful for pre-sizing buffers and
/// for asserting the encoder's length guarantee.
#[inline]
pub fn encoded_len(width: u32, height: u32) -> usize {
    height as usize * (HEADER_LEN + width.div_ceil(8) as usize + 1)
}

// ============================================================================
// TESTS
// ============================================================================
