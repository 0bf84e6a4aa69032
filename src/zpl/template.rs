//! # ZPL Label Generation
//!
//! Builds ZPL label markup from structured item lists.
//!
//! ## Block Structure
//!
//! Each item yields one self-contained label block:
//!
//! ```text
//! ^XA                         start label
//! ^PW{width} ^LL{height}      print width / label length
//! ^FO0,0^GB...^FS             optional debug bounding box
//! ^BY{module},{ratio},{bars}  barcode parameters
//! ^FO{x},{y}                  barcode field origin
//! ^BC.../ ^B8...              symbology directive
//! ^FD{payload}^FS             field data
//! ^FO{x},{y}^A0...^FD...^FS   optional name/price line
//! ^XZ                         end label
//! ```
//!
//! Blocks are concatenated with no separator. Every `^FO` is matched by
//! exactly one `^FS`, and exactly one `^XA`/`^XZ` pair wraps each block.
//!
//! ## Item Validation
//!
//! A malformed item (empty code, or a digit-free code on an EAN-8 profile)
//! is skipped and counted; it never fails the batch. A batch where nothing
//! rendered is the caller's error to report.

use tracing::warn;

use super::ean8;
use super::profile::{LayoutProfile, Symbology};

/// Longest price string embedded in a label before truncation
const MAX_PRICE_CHARS: usize = 16;

/// Text field font height/width in dots for the name/price line
const TEXT_FONT_DOTS: u32 = 28;

/// One label request: a barcode payload plus optional display fields.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LabelItem {
    /// Barcode payload (EAN-8 profiles derive the final digits from this)
    pub code: String,
    /// Product name for the text line
    #[serde(default)]
    pub name: Option<String>,
    /// Display price for the text line
    #[serde(default)]
    pub price: Option<String>,
}

/// Result of rendering a batch of label items.
#[derive(Debug)]
pub struct LabelBatch {
    /// Concatenated `^XA…^XZ` blocks
    pub zpl: String,
    /// Items that produced a label
    pub rendered: usize,
    /// Items skipped for missing/malformed required fields
    pub skipped: usize,
}

impl LabelBatch {
    /// Whether any label content exists to send.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rendered == 0
    }
}

/// Build ZPL label markup for a batch of items under one layout profile.
pub fn build_labels(items: &[LabelItem], profile: &LayoutProfile) -> LabelBatch {
    let mut zpl = String::new();
    let mut rendered = 0;
    let mut skipped = 0;

    for item in items {
        match build_label(item, profile) {
            Some(block) => {
                zpl.push_str(&block);
                rendered += 1;
            }
            None => {
                warn!(code = %item.code, profile = profile.name, "skipping malformed label item");
                skipped += 1;
            }
        }
    }

    LabelBatch {
        zpl,
        rendered,
        skipped,
    }
}

/// Render a single `^XA…^XZ` block, or `None` if the item is malformed.
fn build_label(item: &LabelItem, profile: &LayoutProfile) -> Option<String> {
    let payload = barcode_payload(item, profile)?;
    let orient = profile.orientation.zpl_code();

    let mut block = String::new();
    block.push_str("^XA");
    block.push_str(&format!("^PW{}", profile.width));
    block.push_str(&format!("^LL{}", profile.height));

    if profile.debug_box {
        block.push_str(&format!(
            "^FO0,0^GB{},{},2^FS",
            profile.width, profile.height
        ));
    }

    block.push_str(&format!(
        "^BY{},{:.1},{}",
        profile.module_width, profile.wide_ratio, profile.bar_height
    ));

    let (bx, by) = profile.barcode_origin;
    block.push_str(&format!("^FO{},{}", bx, by));
    match profile.symbology {
        Symbology::Code128 => {
            block.push_str(&format!("^BC{},{},Y,N,N", orient, profile.bar_height));
        }
        Symbology::Ean8 => {
            block.push_str(&format!("^B8{},{},Y,N", orient, profile.bar_height));
        }
    }
    block.push_str(&format!("^FD{}^FS", payload));

    if profile.show_price {
        if let Some(text) = text_line(item) {
            let (tx, ty) = profile.text_origin;
            block.push_str(&format!(
                "^FO{},{}^A0{},{},{}^FD{}^FS",
                tx, ty, orient, TEXT_FONT_DOTS, TEXT_FONT_DOTS, text
            ));
        }
    }

    block.push_str("^XZ");
    Some(block)
}

/// Derive the barcode field data for an item, or `None` if invalid.
fn barcode_payload(item: &LabelItem, profile: &LayoutProfile) -> Option<String> {
    let code = item.code.trim();
    if code.is_empty() {
        return None;
    }
    match profile.symbology {
        Symbology::Code128 => Some(code.to_string()),
        Symbology::Ean8 => {
            if !code.chars().any(|c| c.is_ascii_digit()) {
                return None;
            }
            Some(ean8::ean8_code(code))
        }
    }
}

/// Compose the human-readable text line: name, then a truncated price.
fn text_line(item: &LabelItem) -> Option<String> {
    let name = item.name.as_deref().map(str::trim).unwrap_or("");
    let price = item.price.as_deref().map(str::trim).unwrap_or("");

    if name.is_empty() && price.is_empty() {
        return None;
    }

    // Overlong prices would overflow the label
    let price: String = price.chars().take(MAX_PRICE_CHARS).collect();

    let line = if name.is_empty() {
        price
    } else if price.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", name, price)
    };
    Some(line)
}

// ============================================================================
// TESTS
// ============================================================================
