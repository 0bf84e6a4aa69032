//! Ticket request schema.

use serde::Deserialize;

/// A full receipt submission from a POS client.
///
/// Monetary fields the client supplies (`subtotal`, `total`) are accepted
/// for wire compatibility but never trusted: the layout engine recomputes
/// every derived amount server-side.
#[derive(Debug, Deserialize)]
pub struct TicketModel {
    /// Lines printed centered at the top (business name, address)
    #[serde(default)]
    pub header: Vec<String>,

    /// Base64-encoded logo image, printed under the header
    #[serde(default)]
    pub logo: Option<String>,

    /// Sale date shown in the metadata block
    #[serde(default)]
    pub date: Option<String>,

    /// Ticket/receipt number
    #[serde(default)]
    pub ticket_number: Option<String>,

    /// Client name or account
    #[serde(default)]
    pub client: Option<String>,

    /// Ordered line items
    pub items: Vec<TicketItem>,

    /// Global discount percent applied to the subtotal
    #[serde(default)]
    pub discount_rate: Option<f64>,

    /// Client-computed subtotal (ignored; recomputed)
    #[serde(default)]
    pub subtotal: Option<f64>,

    /// Client-computed final total (ignored; recomputed)
    #[serde(default)]
    pub total: Option<f64>,

    /// Lines printed centered at the bottom (thanks message, tax id)
    #[serde(default)]
    pub footer: Vec<String>,

    /// Base64-encoded QR image (loyalty link, fiscal code), printed after
    /// the footer
    #[serde(default)]
    pub qr: Option<String>,
}

/// One sale line.
#[derive(Debug, Deserialize)]
pub struct TicketItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// Per-line discount percent
    #[serde(default)]
    pub discount_percent: Option<f64>,
}

impl TicketItem {
    /// Line total: quantity × unit price, reduced by the line discount.
    pub fn line_total(&self) -> f64 {
        let gross = self.quantity * self.unit_price;
        match self.discount_percent {
            Some(d) => gross * (1.0 - d / 100.0),
            None => gross,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, unit_price: f64, discount_percent: Option<f64>) -> TicketItem {
        TicketItem {
            description: "x".into(),
            quantity,
            unit_price,
            discount_percent,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(2.0, 10.0, None).line_total(), 20.0);
    }

    #[test]
    fn test_line_total_with_discount() {
        let total = item(2.0, 10.0, Some(25.0)).line_total();
        assert!((total - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_minimal() {
        let model: TicketModel = serde_json::from_str(
            r#"{"items":[{"description":"Cafe","quantity":1,"unit_price":2.5}]}"#,
        )
        .unwrap();
        assert_eq!(model.items.len(), 1);
        assert!(model.header.is_empty());
        assert!(model.logo.is_none());
    }
}
