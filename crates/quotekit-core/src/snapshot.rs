//! # Quote Snapshot
//!
//! The immutable document model handed to renderers.
//!
//! ## Why a Snapshot?
//! Renderers must be pure functions of their input: the same snapshot always
//! produces the same bytes. A snapshot therefore holds plain, fully resolved
//! values only: no timestamps, no generated IDs, nothing to look up later.
//!
//! ```text
//! Quote (mutable, owned by the session)
//!    │
//!    │  QuoteSnapshot::capture()
//!    ▼
//! QuoteSnapshot ──► PdfRenderer ──► Quote_101.pdf
//!    │
//!    └────────────► CsvRenderer ──► items_101.csv
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::quote::Quote;
use crate::totals::{line_amount, Totals};
use crate::types::QuoteHeader;

/// One resolved row of the items table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLine {
    /// 1-based position in the table.
    pub position: usize,
    pub description: String,
    /// Absent quantities are resolved to 0.
    pub quantity: u32,
    /// Absent prices are resolved to 0.
    pub unit_price: Money,
    /// `quantity × unit_price`, unrounded.
    pub amount: Money,
}

/// Fully resolved copy of a quote and its totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub header: QuoteHeader,
    pub items: Vec<SnapshotLine>,
    pub notes: String,
    pub terms: String,
    pub totals: Totals,
}

impl QuoteSnapshot {
    /// Captures the current state of a quote.
    pub fn capture(quote: &Quote) -> Self {
        let items = quote
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| SnapshotLine {
                position: i + 1,
                description: item.description.clone(),
                quantity: item.quantity_or_zero(),
                unit_price: item.unit_price_or_zero(),
                amount: line_amount(item),
            })
            .collect();

        QuoteSnapshot {
            header: quote.header.clone(),
            items,
            notes: quote.notes.clone(),
            terms: quote.terms.clone(),
            totals: quote.totals(),
        }
    }

    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// Amounts are written as decimal strings, so nothing is lost.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a snapshot back from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the number of rows in the items table.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn quote() -> Quote {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut quote = Quote::sample(day);
        quote.items.push(LineItem {
            description: "Unfinished row".to_string(),
            quantity: None,
            unit_price: Some(Money::new(dec!(99.99))),
        });
        quote
    }

    #[test]
    fn test_capture_resolves_items() {
        let snapshot = QuoteSnapshot::capture(&quote());

        assert_eq!(snapshot.item_count(), 3);
        assert_eq!(snapshot.items[0].position, 1);
        assert_eq!(snapshot.items[0].amount, Money::new(dec!(18999.0)));
        assert_eq!(snapshot.items[2].position, 3);
        assert_eq!(snapshot.items[2].quantity, 0);
        assert!(snapshot.items[2].amount.is_zero());
    }

    #[test]
    fn test_capture_matches_totals() {
        let quote = quote();
        let snapshot = QuoteSnapshot::capture(&quote);
        assert_eq!(snapshot.totals, quote.totals());
        assert_eq!(snapshot.header, quote.header);
    }

    #[test]
    fn test_two_captures_are_equal() {
        let quote = quote();
        assert_eq!(QuoteSnapshot::capture(&quote), QuoteSnapshot::capture(&quote));
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let mut quote = quote();
        quote.items.push(LineItem::new("Tiny", 7, Money::new(dec!(0.0001))));
        let snapshot = QuoteSnapshot::capture(&quote);

        let json = snapshot.to_json().unwrap();
        let back = QuoteSnapshot::from_json(&json).unwrap();

        assert_eq!(back, snapshot);
        assert_eq!(back.items[3].amount.amount(), dec!(0.0007));
        assert_eq!(back.totals.subtotal.amount(), dec!(32998.0007));
        assert_eq!(back.totals.discount_amount.amount(), dec!(4949.700105));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(QuoteSnapshot::from_json("{\"header\": 3}").is_err());
    }
}
