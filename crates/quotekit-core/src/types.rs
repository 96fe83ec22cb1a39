//! # Domain Types
//!
//! Core domain types used throughout Quotekit.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  QuoteHeader    │   │    LineItem     │   │ LineItemInput   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  issuer         │   │  description    │   │  raw quantity   │       │
//! │  │  number         │   │  quantity?      │   │  raw price      │       │
//! │  │  client, dates  │   │  unit_price?    │   │  (unvalidated)  │       │
//! │  │  discount, tax  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    Percent      │   0 ≤ value ≤ 100, enforced on construction        │
//! │  └─────────────────┘   and on deserialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw vs Model
//! `LineItemInput` is what a form hands over (fractional or negative numbers
//! allowed). `LineItem` is what the totals engine sees: quantities are whole
//! and non-negative, prices are non-negative.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{normalize_quantity, normalize_unit_price};

// =============================================================================
// Percent
// =============================================================================

/// A percentage between 0 and 100 inclusive (`15` means 15 %).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a percentage, rejecting values outside `0..=100`.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::OutOfRange {
                field: "percent".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(Percent(value))
    }

    /// Creates a percentage, clamping into `0..=100`.
    pub fn clamped(value: Decimal) -> Self {
        Percent(value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(Decimal::ZERO)
    }

    /// The number of percent (`15` for 15 %).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// The fraction (`0.15` for 15 %).
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// One decimal place, as shown next to the totals: `15.0%`.
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self
            .0
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.1}%", shown)
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Percent::new(value)
    }
}

impl From<Percent> for Decimal {
    fn from(pct: Percent) -> Self {
        pct.0
    }
}

// =============================================================================
// Quote Header
// =============================================================================

/// Business-entity fields printed at the top of the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteHeader {
    /// Name of the business issuing the quote.
    pub issuer: String,

    /// Quote number (business identifier, used in export file names).
    pub number: String,

    /// Who the quote is for.
    pub client: String,

    pub issue_date: NaiveDate,

    /// Last day the quoted prices are honored.
    pub due_date: NaiveDate,

    /// Free text, e.g. "Bank transfer or cash".
    pub payment_terms: String,

    /// Discount applied to the subtotal.
    pub discount_pct: Percent,

    /// Tax applied to the discounted base.
    pub tax_pct: Percent,
}

impl QuoteHeader {
    /// Creates a header with no discount and no tax.
    pub fn new(
        issuer: impl Into<String>,
        number: impl Into<String>,
        client: impl Into<String>,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        QuoteHeader {
            issuer: issuer.into(),
            number: number.into(),
            client: client.into(),
            issue_date,
            due_date,
            payment_terms: String::new(),
            discount_pct: Percent::zero(),
            tax_pct: Percent::zero(),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of the quote.
///
/// ## Missing Values
/// `quantity` and `unit_price` may be absent (a row the user has not
/// finished typing). Absent values count as zero everywhere: in
/// [`crate::totals::line_amount`], in snapshots and in exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free text, may be empty.
    #[serde(default)]
    pub description: String,

    /// Whole, non-negative quantity.
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Non-negative unit price; a negative price in a quote file is rejected.
    #[serde(default, deserialize_with = "deserialize_unit_price")]
    pub unit_price: Option<Money>,
}

fn deserialize_unit_price<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Money>::deserialize(deserializer)? {
        Some(price) if price.is_negative() => Err(de::Error::custom(ValidationError::InvalidFormat {
            field: "unit price".to_string(),
            reason: format!("{} is negative", price),
        })),
        price => Ok(price),
    }
}

impl LineItem {
    /// Creates a fully specified line item.
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        LineItem {
            description: description.into(),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }

    /// Builds a line item from raw form input, normalizing the numbers.
    ///
    /// ## Example
    /// ```rust
    /// use quotekit_core::types::{LineItem, LineItemInput};
    /// use rust_decimal::Decimal;
    ///
    /// let input = LineItemInput {
    ///     description: "Mug".to_string(),
    ///     quantity: Some(Decimal::new(25, 1)),   // 2.5 → 2
    ///     unit_price: Some(Decimal::new(-10, 0)), // -10 → 0
    /// };
    /// let item = LineItem::from_input(input);
    /// assert_eq!(item.quantity, Some(2));
    /// assert!(item.unit_price.unwrap().is_zero());
    /// ```
    pub fn from_input(input: LineItemInput) -> Self {
        LineItem {
            description: input.description,
            quantity: normalize_quantity(input.quantity),
            unit_price: normalize_unit_price(input.unit_price),
        }
    }

    /// Quantity, with an absent value read as zero.
    #[inline]
    pub fn quantity_or_zero(&self) -> u32 {
        self.quantity.unwrap_or(0)
    }

    /// Unit price, with an absent value read as zero.
    #[inline]
    pub fn unit_price_or_zero(&self) -> Money {
        self.unit_price.unwrap_or_default()
    }
}

/// Raw line item values as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    #[serde(default)]
    pub description: String,

    /// May be fractional or negative; floored and clamped on entry.
    #[serde(default)]
    pub quantity: Option<Decimal>,

    /// May be negative; clamped to zero on entry.
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

impl LineItemInput {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        LineItemInput {
            description: description.into(),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
