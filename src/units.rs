//! # Label Geometry
//!
//! Millimeter/dot conversion for 203 DPI label printers.
//!
//! ## Resolution
//!
//! Zebra desktop label printers (and most thermal receipt printers) print at
//! 203 DPI:
//!
//! ```text
//! dots_per_mm = dpi / 25.4
//!
//! For 203 DPI:
//!   dots_per_mm = 203 / 25.4 ≈ 8
//! ```
//!
//! Label layout profiles are specified in millimeters on the carton; all ZPL
//! directives take dots. These helpers do the conversion in one place.

/// Print resolution in dots per inch
pub const DPI: u16 = 203;

/// Calculate dots per millimeter at the standard resolution
///
/// ## Example
///
/// ```
/// use imprenta::units;
///
/// assert!((units::dots_per_mm() - 8.0).abs() < 0.1);
/// ```
#[inline]
pub fn dots_per_mm() -> f32 {
    DPI as f32 / 25.4
}

/// Convert millimeters to dots
///
/// ## Example
///
/// ```
/// use imprenta::units;
///
/// // 57mm label stock ≈ 456 dots
/// assert_eq!(units::mm_to_dots(57.0), 456);
/// ```
#[inline]
pub fn mm_to_dots(mm: f32) -> u32 {
    (mm * dots_per_mm()).round() as u32
}

/// Convert dots to millimeters
#[inline]
pub fn dots_to_mm(dots: u32) -> f32 {
    dots as f32 / dots_per_mm()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots_per_mm() {
        // 203 DPI ≈ 8 dots/mm
        assert!((dots_per_mm() - 8.0).abs() < 0.1);
    }

    #[test]
    fn test_mm_to_dots() {
        // 10mm ≈ 80 dots
        let dots = mm_to_dots(10.0);
        assert!((dots as i32 - 80).abs() < 2);
    }

    #[test]
    fn test_dots_to_mm() {
        // 80 dots ≈ 10mm
        let mm = dots_to_mm(80);
        assert!((mm - 10.0).abs() < 0.5);
    }

    #[test]
    fn test_round_trip() {
        for mm in [8.0f32, 25.0, 32.0, 57.0, 100.0] {
            let back = dots_to_mm(mm_to_dots(mm));
            assert!((back - mm).abs() < 0.2, "{} -> {}", mm, back);
        }
    }

    #[test]
    fn test_zero() {
        assert_eq!(mm_to_dots(0.0), 0);
    }
}
