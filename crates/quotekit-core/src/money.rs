//! # Money Module
//!
//! Provides the `Money` type for monetary values and the money formatter used
//! by every rendered document.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64:                                                              │
//! │    32998.0 × 0.15 = 4949.7 (printed)  but stored as 4949.699999…       │
//! │    → a half-up rounding of the last cent can go the wrong way          │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals                                         │
//! │    32998.0 × 15 / 100 = 4949.700 exactly                               │
//! │    Rounding happens ONCE, when the value is formatted for display      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quotekit_core::money::{format_money, CurrencyFormat, DecimalStyle, Money};
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(1899950, 2)); // 18999.50
//! let doubled = price.multiply_quantity(2);
//!
//! let ars = CurrencyFormat::new("ARS", DecimalStyle::Comma);
//! assert_eq!(format_money(doubled, &ars), "ARS 37.999,00");
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::Percent;

/// Fractional digits shown for every formatted amount.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the quote's currency.
///
/// ## Design Decisions
/// - **Decimal**: exact arithmetic, no rounding until display
/// - **Saturating ops**: totals never panic, even for absurd inputs
/// - **Transparent serde**: serialized as a decimal string (`"18999.0"`)
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► line_amount() ──► Totals.subtotal
///                                               │
///                          discount / tax ◄─────┘
///                                               │
///                                   Totals.total ──► format_money() ──► PDF
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a whole amount in major units (e.g. `Money::from_major(100)` = 100.00).
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to two decimals, half away from zero.
    ///
    /// For the non-negative amounts a quote deals with this is plain
    /// half-up rounding: `0.125 → 0.13`, `0.124 → 0.12`.
    pub fn round_half_up(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use quotekit_core::money::Money;
    ///
    /// let unit_price = Money::from_major(13999);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_major(41997));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Money {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Returns `pct` percent of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use quotekit_core::money::Money;
    /// use quotekit_core::types::Percent;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_major(32998);
    /// let discount = subtotal.percentage(Percent::new(Decimal::from(15)).unwrap());
    /// assert_eq!(discount.to_string(), "4949.70");
    /// ```
    pub fn percentage(&self, pct: Percent) -> Money {
        let scaled = self.0.saturating_mul(pct.value());
        Money(
            scaled
                .checked_div(Decimal::ONE_HUNDRED)
                .unwrap_or(Decimal::ZERO),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering (`4949.70`), no symbol and no grouping.
///
/// ## Note
/// Use [`format_money`] for anything a customer reads.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_half_up().0)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            })
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// Separator convention for formatted amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalStyle {
    /// `1,234.56` (thousands `,`, decimals `.`)
    Point,
    /// `1.234,56` (thousands `.`, decimals `,`)
    #[default]
    Comma,
}

impl DecimalStyle {
    /// Character placed between the integer and fractional digits.
    pub const fn decimal_separator(self) -> char {
        match self {
            DecimalStyle::Point => '.',
            DecimalStyle::Comma => ',',
        }
    }

    /// Character placed between groups of three integer digits.
    pub const fn thousands_separator(self) -> char {
        match self {
            DecimalStyle::Point => ',',
            DecimalStyle::Comma => '.',
        }
    }
}

impl FromStr for DecimalStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" | "." => Ok(DecimalStyle::Point),
            "comma" | "," => Ok(DecimalStyle::Comma),
            other => Err(ValidationError::InvalidFormat {
                field: "decimal_style".to_string(),
                reason: format!("expected 'point' or 'comma', got '{}'", other),
            }),
        }
    }
}

/// How money is displayed: currency symbol plus separator convention.
///
/// Rendered as `"<symbol> <number>"`, for example `ARS 28.048,30` or
/// `$ 28,048.30`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Symbol or ISO code printed before the number.
    pub symbol: String,

    /// Separator convention.
    #[serde(default)]
    pub style: DecimalStyle,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, style: DecimalStyle) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            style,
        }
    }

    /// The string every formatting failure falls back to.
    pub fn zero(&self) -> String {
        format!("{} 0{}00", self.symbol, self.style.decimal_separator())
    }
}

/// Pesos with `1.234,56` separators.
impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::new("ARS", DecimalStyle::Comma)
    }
}

/// Formats an amount for display.
///
/// ## Rules
/// - Exactly two fractional digits, half-up rounding
/// - Thousands grouping per [`DecimalStyle`]
/// - Never panics: anything that cannot be rendered prints as zero
///
/// ## Example
/// ```rust
/// use quotekit_core::money::{format_money, CurrencyFormat, DecimalStyle, Money};
///
/// let usd = CurrencyFormat::new("$", DecimalStyle::Point);
/// assert_eq!(format_money(Money::from_major(1234567), &usd), "$ 1,234,567.00");
/// ```
pub fn format_money(amount: Money, format: &CurrencyFormat) -> String {
    render_amount(amount.amount(), format).unwrap_or_else(|| format.zero())
}

/// Formats a raw float, e.g. a value typed into a numeric field.
///
/// NaN, infinities and values outside the decimal range print as zero.
pub fn format_money_f64(amount: f64, format: &CurrencyFormat) -> String {
    match Decimal::from_f64(amount) {
        Some(value) => format_money(Money(value), format),
        None => format.zero(),
    }
}

fn render_amount(value: Decimal, format: &CurrencyFormat) -> Option<String> {
    let rounded =
        value.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.2}", rounded.abs());
    let (whole, fraction) = plain.split_once('.')?;
    if fraction.len() != DISPLAY_DECIMALS as usize
        || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
    {
        return None;
    }

    Some(format!(
        "{} {}{}{}{}",
        format.symbol,
        if negative { "-" } else { "" },
        group_thousands(whole, format.style.thousands_separator()),
        format.style.decimal_separator(),
        fraction
    ))
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
