//! # Totals Engine
//!
//! Pure functions from quote contents to totals. No side effects, no caching:
//! totals are recomputed from the current items on every read.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  items ──► Σ quantity × unit_price ──► subtotal                        │
//! │                                           │                             │
//! │                      subtotal × d/100 ◄───┤                             │
//! │                            │              │                             │
//! │                     discount_amount       │                             │
//! │                            └──────► subtotal − discount = taxable_base  │
//! │                                                       │                 │
//! │                                 taxable_base × t/100 ─┤                 │
//! │                                          │            │                 │
//! │                                     tax_amount        │                 │
//! │                                          └──► taxable_base + tax = total│
//! │                                                                         │
//! │  Discount is ALWAYS applied before tax, tax is charged on the          │
//! │  discounted base, never on the pre-discount subtotal.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{LineItem, QuoteHeader};

/// Aggregate amounts of a quote. Exact, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of all line amounts.
    pub subtotal: Money,

    /// `subtotal × discount_pct / 100`
    pub discount_amount: Money,

    /// `subtotal − discount_amount`
    pub taxable_base: Money,

    /// `taxable_base × tax_pct / 100`
    pub tax_amount: Money,

    /// `taxable_base + tax_amount`
    pub total: Money,
}

impl Totals {
    /// All-zero totals (what an empty quote computes to).
    pub const fn zero() -> Self {
        Totals {
            subtotal: Money::zero(),
            discount_amount: Money::zero(),
            taxable_base: Money::zero(),
            tax_amount: Money::zero(),
            total: Money::zero(),
        }
    }
}

/// Amount of a single line: `quantity × unit_price`.
///
/// Absent quantity or price counts as zero. Never fails, never rounds.
///
/// ## Example
/// ```rust
/// use quotekit_core::{line_amount, LineItem, Money};
///
/// let item = LineItem::new("Tumbler", 2, Money::from_major(13999));
/// assert_eq!(line_amount(&item), Money::from_major(27998));
/// ```
#[inline]
pub fn line_amount(item: &LineItem) -> Money {
    item.unit_price_or_zero()
        .multiply_quantity(item.quantity_or_zero())
}

/// Computes subtotal, discount, taxable base, tax and total.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use quotekit_core::{compute_totals, LineItem, Money, Percent, QuoteHeader};
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let mut header = QuoteHeader::new("Shop", "1", "Client", day, day);
/// header.discount_pct = Percent::new(Decimal::from(10)).unwrap();
/// header.tax_pct = Percent::new(Decimal::from(10)).unwrap();
///
/// let items = vec![LineItem::new("Work", 1, Money::from_major(1000))];
/// let totals = compute_totals(&header, &items);
///
/// assert_eq!(totals.discount_amount, Money::from_major(100));
/// assert_eq!(totals.taxable_base, Money::from_major(900));
/// assert_eq!(totals.tax_amount, Money::from_major(90));
/// assert_eq!(totals.total, Money::from_major(990));
/// ```
pub fn compute_totals(header: &QuoteHeader, items: &[LineItem]) -> Totals {
    let subtotal: Money = items.iter().map(line_amount).sum();
    let discount_amount = subtotal.percentage(header.discount_pct);
    let taxable_base = subtotal - discount_amount;
    let tax_amount = taxable_base.percentage(header.tax_pct);
    let total = taxable_base + tax_amount;

    Totals {
        subtotal,
        discount_amount,
        taxable_base,
        tax_amount,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Percent;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn header(discount: rust_decimal::Decimal, tax: rust_decimal::Decimal) -> QuoteHeader {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut header = QuoteHeader::new("Mamba Shop", "101", "Milena", day, day);
        header.discount_pct = Percent::new(discount).unwrap();
        header.tax_pct = Percent::new(tax).unwrap();
        header
    }

    fn single(amount: rust_decimal::Decimal) -> Vec<LineItem> {
        vec![LineItem::new("Item", 1, Money::new(amount))]
    }

    #[test]
    fn test_line_amount_is_exact() {
        let item = LineItem::new("Screws", 3, Money::new(dec!(0.333)));
        assert_eq!(line_amount(&item).amount(), dec!(0.999));
    }

    #[test]
    fn test_line_amount_missing_values() {
        let no_qty = LineItem {
            description: "No quantity".to_string(),
            quantity: None,
            unit_price: Some(Money::from_major(50)),
        };
        let no_price = LineItem {
            description: "No price".to_string(),
            quantity: Some(4),
            unit_price: None,
        };
        assert!(line_amount(&no_qty).is_zero());
        assert!(line_amount(&no_price).is_zero());
    }

    #[test]
    fn test_discount_then_tax() {
        let totals = compute_totals(&header(dec!(10), dec!(10)), &single(dec!(1000)));
        assert_eq!(totals.subtotal.amount(), dec!(1000));
        assert_eq!(totals.discount_amount.amount(), dec!(100));
        assert_eq!(totals.taxable_base.amount(), dec!(900));
        assert_eq!(totals.tax_amount.amount(), dec!(90));
        assert_eq!(totals.total.amount(), dec!(990));
    }

    #[test]
    fn test_half_discount_no_tax() {
        let totals = compute_totals(&header(dec!(50), dec!(0)), &single(dec!(200)));
        assert_eq!(totals.total.amount(), dec!(100));
    }

    #[test]
    fn test_tax_only() {
        let totals = compute_totals(&header(dec!(0), dec!(21)), &single(dec!(100)));
        assert_eq!(totals.tax_amount.amount(), dec!(21));
        assert_eq!(totals.total.amount(), dec!(121));
    }

    #[test]
    fn test_boundary_percentages() {
        let totals = compute_totals(&header(dec!(100), dec!(100)), &single(dec!(250)));
        assert_eq!(totals.discount_amount.amount(), dec!(250));
        assert!(totals.taxable_base.is_zero());
        assert!(totals.total.is_zero());

        let totals = compute_totals(&header(dec!(0), dec!(100)), &single(dec!(250)));
        assert_eq!(totals.total.amount(), dec!(500));
    }

    #[test]
    fn test_empty_items() {
        let totals = compute_totals(&header(dec!(15), dec!(21)), &[]);
        assert_eq!(totals, Totals::zero());
    }

    #[test]
    fn test_idempotent() {
        let h = header(dec!(15), dec!(10.5));
        let items = vec![
            LineItem::new("Mug", 2, Money::new(dec!(18999.0))),
            LineItem::new("Tumbler", 1, Money::new(dec!(13999.0))),
        ];
        assert_eq!(compute_totals(&h, &items), compute_totals(&h, &items));
    }

    #[test]
    fn test_mamba_shop_scenario() {
        let items = vec![
            LineItem::new("Mug", 1, Money::new(dec!(18999.0))),
            LineItem::new("Tumbler", 1, Money::new(dec!(13999.0))),
        ];
        let totals = compute_totals(&header(dec!(15), dec!(0)), &items);

        assert_eq!(totals.subtotal.to_string(), "32998.00");
        assert_eq!(totals.discount_amount.to_string(), "4949.70");
        assert_eq!(totals.taxable_base.to_string(), "28048.30");
        assert_eq!(totals.tax_amount.to_string(), "0.00");
        assert_eq!(totals.total.to_string(), "28048.30");
    }
}
