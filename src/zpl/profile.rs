//! # Label Layout Profiles
//!
//! A [`LayoutProfile`] describes one label format: physical dimensions,
//! barcode parameters, field origins, and rendering options. The template
//! generator is parameterized by a profile, so one code path serves every
//! label format the server prints.
//!
//! ## Built-in Profiles
//!
//! | Name | Stock | Symbology | Notes |
//! |------|-------|-----------|-------|
//! | `price-tag` | 57×32mm | Code 128 | name + price text line |
//! | `shelf` | 57×32mm | EAN-8 | code only, large bars |
//! | `pallet` | 100×50mm | Code 128 | rotated, name line |
//!
//! Dimensions are given in millimeters on the label carton; all ZPL
//! directives take dots, converted via [`crate::units`].

use crate::units;

/// Barcode symbology for a label profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    /// Code 128: full ASCII payload, printed as given
    Code128,
    /// EAN-8: payload always derived via the last-6-digits checksum rule
    Ean8,
}

/// Barcode/text orientation on the label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,
    Rotated,
}

impl Orientation {
    /// The single-letter orientation code ZPL field directives take.
    #[inline]
    pub fn zpl_code(&self) -> char {
        match self {
            Self::Normal => 'N',
            Self::Rotated => 'R',
        }
    }
}

/// # Label Layout Profile
///
/// All geometry is in dots. Use [`LayoutProfile::from_mm`] to build a
/// profile from millimeter label stock dimensions.
#[derive(Debug, Clone)]
pub struct LayoutProfile {
    /// Profile name (selectable by API callers)
    pub name: &'static str,

    /// Label width in dots
    pub width: u32,

    /// Label height in dots
    pub height: u32,

    /// Narrow bar (module) width in dots
    pub module_width: u32,

    /// Wide-to-narrow bar ratio
    pub wide_ratio: f32,

    /// Bar height in dots
    pub bar_height: u32,

    /// Field origin of the barcode, in dots from the label's top-left
    pub barcode_origin: (u32, u32),

    /// Field origin of the human-readable text line, in dots
    pub text_origin: (u32, u32),

    /// Barcode symbology
    pub symbology: Symbology,

    /// Orientation of barcode and text fields
    pub orientation: Orientation,

    /// Whether the name/price text line is rendered at all
    pub show_price: bool,

    /// Draw a bounding box around the label (layout debugging on test stock)
    pub debug_box: bool,
}

impl LayoutProfile {
    /// 57×32mm price tag: Code 128 with a name/price line underneath.
    pub const PRICE_TAG: Self = Self {
        name: "price-tag",
        width: 456,  // 57mm
        height: 256, // 32mm
        module_width: 2,
        wide_ratio: 3.0,
        bar_height: 120,
        barcode_origin: (40, 30),
        text_origin: (40, 180),
        symbology: Symbology::Code128,
        orientation: Orientation::Normal,
        show_price: true,
        debug_box: false,
    };

    /// 57×32mm shelf label: EAN-8 only, taller bars, no text line.
    pub const SHELF: Self = Self {
        name: "shelf",
        width: 456,
        height: 256,
        module_width: 3,
        wide_ratio: 3.0,
        bar_height: 160,
        barcode_origin: (90, 40),
        text_origin: (90, 220),
        symbology: Symbology::Ean8,
        orientation: Orientation::Normal,
        show_price: false,
        debug_box: false,
    };

    /// 100×50mm pallet label: rotated Code 128 with a name line.
    pub const PALLET: Self = Self {
        name: "pallet",
        width: 800,  // 100mm
        height: 400, // 50mm
        module_width: 3,
        wide_ratio: 2.5,
        bar_height: 200,
        barcode_origin: (60, 40),
        text_origin: (300, 40),
        symbology: Symbology::Code128,
        orientation: Orientation::Rotated,
        show_price: true,
        debug_box: false,
    };

    /// Build a profile from millimeter stock dimensions.
    ///
    /// Field origins default to a small margin; callers adjust fields after
    /// construction for custom stock.
    pub fn from_mm(name: &'static str, width_mm: f32, height_mm: f32, symbology: Symbology) -> Self {
        let width = units::mm_to_dots(width_mm);
        let height = units::mm_to_dots(height_mm);
        let margin = units::mm_to_dots(4.0);
        Self {
            name,
            width,
            height,
            module_width: 2,
            wide_ratio: 3.0,
            bar_height: height / 2,
            barcode_origin: (margin, margin),
            text_origin: (margin, height.saturating_sub(margin + 30)),
            symbology,
            orientation: Orientation::Normal,
            show_price: true,
            debug_box: false,
        }
    }

    /// Look up a built-in profile by name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::built_in().into_iter().find(|p| p.name == name)
    }

    /// List all built-in profiles.
    pub fn built_in() -> Vec<Self> {
        vec![Self::PRICE_TAG, Self::SHELF, Self::PALLET]
    }
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self::PRICE_TAG
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_tag_dimensions() {
        let p = LayoutProfile::PRICE_TAG;
        // 57mm x 32mm at 8 dots/mm
        assert_eq!(p.width, units::mm_to_dots(57.0));
        assert_eq!(p.height, units::mm_to_dots(32.0));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(LayoutProfile::by_name("shelf").unwrap().name, "shelf");
        assert_eq!(
            LayoutProfile::by_name("shelf").unwrap().symbology,
            Symbology::Ean8
        );
        assert!(LayoutProfile::by_name("nope").is_none());
    }

    #[test]
    fn test_built_in_names_unique() {
        let profiles = LayoutProfile::built_in();
        let mut names: Vec<_> = profiles.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), profiles.len());
    }

    #[test]
    fn test_from_mm() {
        let p = LayoutProfile::from_mm("custom", 40.0, 20.0, Symbology::Code128);
        assert_eq!(p.width, units::mm_to_dots(40.0));
        assert_eq!(p.height, units::mm_to_dots(20.0));
        assert!(p.bar_height > 0);
    }

    #[test]
    fn test_orientation_codes() {
        assert_eq!(Orientation::Normal.zpl_code(), 'N');
        assert_eq!(Orientation::Rotated.zpl_code(), 'R');
    }
}
