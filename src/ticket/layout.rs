//! # Ticket Layout Engine
//!
//! Renders a [`TicketModel`] into printer-ready bytes: fixed-column
//! monospace text with embedded raster blocks for the logo and QR sections,
//! bracketed by printer init and the end-of-ticket cut.
//!
//! ## Column Model
//!
//! All alignment is done in software against a fixed column width
//! (48 columns for 80mm paper at Font A). Centering pads left only:
//! `center("HI", 10)` is `"    HI"`, not `"    HI    "`. Text at or
//! beyond the width is truncated to exactly the width.
//!
//! ## Degraded Renders
//!
//! A logo or QR image that fails to decode does not fail the ticket; the
//! section is skipped and the incident is recorded in
//! [`RenderedTicket::warnings`] and the log.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Local;
use tracing::warn;

use super::model::{TicketItem, TicketModel};
use crate::error::ImprentaError;
use crate::protocol::{commands, raster};

/// Default column width: 80mm paper, Font A (48 chars)
pub const DEFAULT_COLUMNS: usize = 48;

/// Tolerance when comparing client-supplied totals against computed ones
const MONEY_EPSILON: f64 = 0.005;

/// A rendered ticket: command bytes plus any degraded-section diagnostics.
#[derive(Debug)]
pub struct RenderedTicket {
    pub bytes: Vec<u8>,
    /// One entry per skipped optional section (e.g. undecodable logo)
    pub warnings: Vec<String>,
}

/// Center `text` within `width` columns.
///
/// Pads left with `(width - len) / 2` spaces; leftover slack stays on the
/// right (which is never padded). Text at or beyond `width` is truncated to
/// exactly `width` characters.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Right-align `text` within `width` columns.
///
/// Pads left with `width - len` spaces; truncates to `width` when already
/// at or beyond it.
pub fn align_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    format!("{}{}", " ".repeat(width - len), text)
}

/// Render a ticket model into printer bytes.
///
/// ## Errors
///
/// Returns [`ImprentaError::Validation`] when the model has no line items
/// or a non-positive column width. Optional-image decode failures degrade
/// instead of erroring (see module docs).
pub fn render(model: &TicketModel, columns: usize) -> Result<RenderedTicket, ImprentaError> {
    if columns == 0 {
        return Err(ImprentaError::Validation(
            "Column width must be positive".to_string(),
        ));
    }
    if model.items.is_empty() {
        return Err(ImprentaError::Validation(
            "Ticket has no line items".to_string(),
        ));
    }

    let mut out = commands::init();
    let mut warnings = Vec::new();
    let divider = "-".repeat(columns);

    for line in &model.header {
        push_line(&mut out, &center(line, columns));
    }

    if let Some(logo) = &model.logo {
        embed_image(&mut out, logo, "logo", &mut warnings);
    }

    if !model.header.is_empty() || model.logo.is_some() {
        out.extend(commands::line_feed());
    }

    if let Some(date) = &model.date {
        push_line(&mut out, &format!("Date: {}", date));
    }
    if let Some(number) = &model.ticket_number {
        push_line(&mut out, &format!("Ticket: {}", number));
    }
    if let Some(client) = &model.client {
        push_line(&mut out, &format!("Client: {}", client));
    }

    push_line(&mut out, &divider);
    for item in &model.items {
        push_item(&mut out, item, columns);
    }
    push_line(&mut out, &divider);

    push_totals(&mut out, model, columns);

    if !model.footer.is_empty() {
        out.extend(commands::line_feed());
        for line in &model.footer {
            push_line(&mut out, &center(line, columns));
        }
    }

    if let Some(qr) = &model.qr {
        embed_image(&mut out, qr, "qr", &mut warnings);
    }

    out.extend(commands::line_feed());
    push_line(
        &mut out,
        &center(
            &format!("Printed {}", Local::now().format("%Y-%m-%d %H:%M")),
            columns,
        ),
    );

    out.extend(commands::feed_lines(3));
    out.extend(commands::cut());

    Ok(RenderedTicket {
        bytes: out,
        warnings,
    })
}

/// Emit one line item: description line, then the qty/price line with the
/// total flush right.
fn push_item(out: &mut Vec<u8>, item: &TicketItem, columns: usize) {
    let desc_len = item.description.chars().count();
    if desc_len > columns {
        let truncated: String = item
            .description
            .chars()
            .take(columns.saturating_sub(3))
            .collect();
        push_line(out, &format!("{}...", truncated));
    } else {
        push_line(out, &item.description);
    }

    let mut fragment = format!("{} x {:.2}", item.quantity, item.unit_price);
    if let Some(d) = item.discount_percent {
        fragment.push_str(&format!(" -{}%", d));
    }
    let total = format!("{:.2}", item.line_total());

    let used = fragment.chars().count() + total.chars().count();
    let pad = if used < columns { columns - used } else { 1 };
    push_line(out, &format!("{}{}{}", fragment, " ".repeat(pad), total));
}

/// Emit the computed totals block, right-aligned.
fn push_totals(out: &mut Vec<u8>, model: &TicketModel, columns: usize) {
    let subtotal: f64 = model.items.iter().map(TicketItem::line_total).sum();

    let total = match model.discount_rate {
        Some(rate) => {
            let discount = subtotal * rate / 100.0;
            push_line(
                out,
                &align_right(&format!("SUBTOTAL {:.2}", subtotal), columns),
            );
            push_line(
                out,
                &align_right(&format!("DISCOUNT -{}% -{:.2}", rate, discount), columns),
            );
            subtotal - discount
        }
        None => subtotal,
    };

    if let Some(claimed) = model.total {
        if (claimed - total).abs() > MONEY_EPSILON {
            warn!(claimed, computed = total, "client total disagrees with computed total");
        }
    }
    if let Some(claimed) = model.subtotal {
        if (claimed - subtotal).abs() > MONEY_EPSILON {
            warn!(claimed, computed = subtotal, "client subtotal disagrees with computed subtotal");
        }
    }

    push_line(out, &align_right(&format!("TOTAL {:.2}", total), columns));
}

/// Decode a base64 image and embed it as a raster block. A failure at any
/// stage records a warning and leaves the ticket without that section.
fn embed_image(out: &mut Vec<u8>, encoded: &str, section: &str, warnings: &mut Vec<String>) {
    match decode_image(encoded).and_then(|image| raster::encode(&image)) {
        Ok(bytes) => out.extend(bytes),
        Err(e) => degrade(warnings, section, &e.to_string()),
    }
}

/// Decode a base64-embedded image.
fn decode_image(encoded: &str) -> Result<image::DynamicImage, ImprentaError> {
    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|e| ImprentaError::Decode(format!("invalid base64: {}", e)))?;
    image::load_from_memory(&decoded)
        .map_err(|e| ImprentaError::Decode(format!("undecodable image: {}", e)))
}

fn degrade(warnings: &mut Vec<String>, section: &str, reason: &str) {
    let message = format!("{} section skipped: {}", section, reason);
    warn!(section, reason, "ticket section skipped");
    warnings.push(message);
}

fn push_line(out: &mut Vec<u8>, line: &str) {
    out.extend_from_slice(line.as_bytes());
    out.push(commands::LF);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn minimal_model() -> TicketModel {
        serde_json::from_str(
            r#"{"items":[{"description":"Cafe","quantity":2,"unit_price":1.5}]}"#,
        )
        .unwrap()
    }

    // ========== Alignment primitives ==========

    #[test]
    fn test_center_pads_left_only() {
        // pad = (10 - 2) / 2 = 4; result is NOT forced to width 10
        assert_eq!(center("HI", 10), "    HI");
        assert_eq!(center("HI", 10).len(), 6);
    }

    #[test]
    fn test_center_odd_slack_goes_right() {
        // (10 - 3) / 2 = 3 -> three spaces, four columns of slack remain
        assert_eq!(center("ABC", 10), "   ABC");
    }

    #[test]
    fn test_center_truncates_at_width() {
        assert_eq!(center("ABCDEFGHIJKL", 10), "ABCDEFGHIJ");
        assert_eq!(center("ABCDEFGHIJ", 10), "ABCDEFGHIJ");
    }

    #[test]
    fn test_center_strip_law() {
        for text in ["a", "hola", "exactly"] {
            let centered = center(text, 20);
            assert_eq!(centered.trim_start_matches(' '), text);
        }
    }

    #[test]
    fn test_align_right() {
        assert_eq!(align_right("9.99", 10), "      9.99");
        assert_eq!(align_right("1234567890x", 10), "1234567890");
    }

    #[test]
    fn test_align_right_exact_width() {
        assert_eq!(align_right("1234567890", 10), "1234567890");
    }

    // ========== Full renders ==========

    fn render_to_text(model: &TicketModel, columns: usize) -> String {
        let rendered = render(model, columns).unwrap();
        String::from_utf8_lossy(&rendered.bytes).to_string()
    }

    #[test]
    fn test_starts_with_init_ends_with_cut() {
        let rendered = render(&minimal_model(), DEFAULT_COLUMNS).unwrap();
        assert_eq!(&rendered.bytes[..2], &[0x1B, 0x40]);
        let n = rendered.bytes.len();
        assert_eq!(&rendered.bytes[n - 4..], &[0x1D, 0x56, 66, 0]);
    }

    #[test]
    fn test_item_total_flush_right() {
        let text = render_to_text(&minimal_model(), 20);
        // "2 x 1.50" ... "3.00" padded to exactly 20 columns
        let line = text
            .lines()
            .find(|l| l.starts_with("2 x 1.50"))
            .expect("qty/price line");
        assert_eq!(line.chars().count(), 20);
        assert!(line.ends_with("3.00"));
    }

    #[test]
    fn test_description_truncation() {
        let model: TicketModel = serde_json::from_str(
            r#"{"items":[{"description":"A very long product description indeed","quantity":1,"unit_price":1}]}"#,
        )
        .unwrap();
        let text = render_to_text(&model, 20);
        assert!(text.contains("A very long produ..."));
    }

    #[test]
    fn test_line_discount_in_fragment() {
        let model: TicketModel = serde_json::from_str(
            r#"{"items":[{"description":"X","quantity":4,"unit_price":5,"discount_percent":10}]}"#,
        )
        .unwrap();
        let text = render_to_text(&model, 40);
        assert!(text.contains("4 x 5.00 -10%"));
        // 4 * 5 * 0.9 = 18.00
        assert!(text.contains("18.00"));
    }

    #[test]
    fn test_computed_totals_with_global_discount() {
        let model: TicketModel = serde_json::from_str(
            r#"{
                "items": [
                    {"description": "A", "quantity": 2, "unit_price": 10},
                    {"description": "B", "quantity": 1, "unit_price": 5, "discount_percent": 20}
                ],
                "discount_rate": 10
            }"#,
        )
        .unwrap();
        let text = render_to_text(&model, 40);
        // subtotal = 20 + 4 = 24; discount = 2.40; total = 21.60
        assert!(text.contains("SUBTOTAL 24.00"));
        assert!(text.contains("DISCOUNT -10% -2.40"));
        assert!(text.contains("TOTAL 21.60"));
    }

    #[test]
    fn test_no_subtotal_line_without_global_discount() {
        let text = render_to_text(&minimal_model(), 40);
        assert!(!text.contains("SUBTOTAL"));
        assert!(text.contains("TOTAL 3.00"));
    }

    #[test]
    fn test_header_and_footer_centered() {
        let model: TicketModel = serde_json::from_str(
            r#"{
                "header": ["TIENDA"],
                "items": [{"description": "A", "quantity": 1, "unit_price": 1}],
                "footer": ["Gracias"]
            }"#,
        )
        .unwrap();
        let text = render_to_text(&model, 20);
        assert!(text.contains(&center("TIENDA", 20)));
        assert!(text.contains(&center("Gracias", 20)));
    }

    #[test]
    fn test_bad_logo_degrades_with_warning() {
        let model: TicketModel = serde_json::from_str(
            r#"{
                "logo": "bm90IGFuIGltYWdl",
                "items": [{"description": "A", "quantity": 1, "unit_price": 1}]
            }"#,
        )
        .unwrap();
        let rendered = render(&model, DEFAULT_COLUMNS).unwrap();
        assert_eq!(rendered.warnings.len(), 1);
        assert!(rendered.warnings[0].contains("logo"));
        // Ticket still complete
        let n = rendered.bytes.len();
        assert_eq!(&rendered.bytes[n - 4..], &[0x1D, 0x56, 66, 0]);
    }

    #[test]
    fn test_invalid_base64_degrades_with_warning() {
        let model: TicketModel = serde_json::from_str(
            r#"{
                "qr": "!!!not-base64!!!",
                "items": [{"description": "A", "quantity": 1, "unit_price": 1}]
            }"#,
        )
        .unwrap();
        let rendered = render(&model, DEFAULT_COLUMNS).unwrap();
        assert_eq!(rendered.warnings.len(), 1);
        assert!(rendered.warnings[0].contains("qr"));
    }

    #[test]
    fn test_valid_logo_embeds_raster_block() {
        // 1x1 black PNG
        let mut png = Vec::new();
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(1, 1));
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let encoded = BASE64.encode(&png);

        let model: TicketModel = serde_json::from_str(&format!(
            r#"{{"logo": "{}", "items": [{{"description": "A", "quantity": 1, "unit_price": 1}}]}}"#,
            encoded
        ))
        .unwrap();
        let rendered = render(&model, DEFAULT_COLUMNS).unwrap();
        assert!(rendered.warnings.is_empty());
        // Raster header for the embedded 1x1 image
        let needle = [0x1B, 0x2A, 0x21, 0x01, 0x00];
        assert!(
            rendered
                .bytes
                .windows(needle.len())
                .any(|w| w == needle)
        );
    }

    #[test]
    fn test_empty_items_rejected() {
        let model: TicketModel = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(render(&model, DEFAULT_COLUMNS).is_err());
    }

    #[test]
    fn test_zero_columns_rejected() {
        assert!(render(&minimal_model(), 0).is_err());
    }
}
