//! # Quote State
//!
//! The quote being edited, and the actions that change it.
//!
//! ## State + Action → New State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote Operations                                     │
//! │                                                                         │
//! │  User Action              QuoteAction               State Change        │
//! │  ───────────              ───────────               ────────────        │
//! │                                                                         │
//! │  Edit a field ──────────► SetClient(..) ──────────► header.client = ..  │
//! │                                                                         │
//! │  Add a row ─────────────► AddItem(input) ─────────► items.push(item)    │
//! │                                                                         │
//! │  Edit a row ────────────► UpdateItem{..} ─────────► items[i] = item     │
//! │                                                                         │
//! │  Delete a row ──────────► RemoveItem{..} ─────────► items.remove(i)     │
//! │                                                                         │
//! │  Any read ──────────────► quote.totals() ─────────► (recomputed)        │
//! │                                                                         │
//! │  NOTE: The caller owns the Quote. `apply` consumes it and hands back    │
//! │        the next state; nothing is kept anywhere else.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::snapshot::QuoteSnapshot;
use crate::totals::{compute_totals, Totals};
use crate::types::{LineItem, LineItemInput, Percent, QuoteHeader};
use crate::validation::normalize_percent;
use crate::{DEFAULT_VALIDITY_DAYS, MAX_QUOTE_ITEMS};

const SAMPLE_NOTES: &str = "This quote was prepared for the products and quantities requested.\n\
Colors and models may vary slightly depending on stock availability.\n\
Quoted prices do not include VAT.";

const SAMPLE_TERMS: &str = "Payment methods: bank transfer, Mercado Pago or cash.\n\
Delivery: within 5 business days of payment confirmation.\n\
Validity: 7 days from the issue date.";

/// A quote: header, ordered line items and free-text notes/terms.
///
/// ## Invariants
/// - At most [`MAX_QUOTE_ITEMS`] items
/// - Discount and tax stay within `0..=100` (guaranteed by [`Percent`])
/// - Totals are never stored; see [`Quote::totals`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub header: QuoteHeader,

    /// Display order matters, totals do not depend on it.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Printed under "Notes".
    #[serde(default)]
    pub notes: String,

    /// Printed under "Terms".
    #[serde(default)]
    pub terms: String,
}

impl Quote {
    /// Creates an empty quote for the given header.
    pub fn new(header: QuoteHeader) -> Self {
        Quote {
            header,
            items: Vec::new(),
            notes: String::new(),
            terms: String::new(),
        }
    }

    /// The quote a new session starts with.
    ///
    /// ## Defaults
    /// - Issuer "Mamba Shop", number "101", client "Milena"
    /// - Due date one week after `today`
    /// - 15 % discount, no tax
    /// - Two sample items, sample notes and terms
    pub fn sample(today: NaiveDate) -> Self {
        let mut header = QuoteHeader::new(
            "Mamba Shop",
            "101",
            "Milena",
            today,
            today + Duration::days(DEFAULT_VALIDITY_DAYS),
        );
        header.payment_terms = "Bank transfer, Mercado Pago or cash".to_string();
        header.discount_pct = Percent::clamped(Decimal::from(15));

        Quote {
            header,
            items: vec![
                LineItem::new(
                    "Lucky porcelain mug with electric warmer",
                    1,
                    Money::new(Decimal::new(189990, 1)),
                ),
                LineItem::new(
                    "Thermal tumbler with digital temperature sensor",
                    1,
                    Money::new(Decimal::new(139990, 1)),
                ),
            ],
            notes: SAMPLE_NOTES.to_string(),
            terms: SAMPLE_TERMS.to_string(),
        }
    }

    /// Recomputes the totals from the current items.
    #[inline]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.header, &self.items)
    }

    /// Captures an immutable snapshot for the renderers.
    pub fn snapshot(&self) -> QuoteSnapshot {
        QuoteSnapshot::capture(self)
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the quote has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies one user action and returns the next state.
    ///
    /// ## Errors
    /// - `ItemNotFound` when an index is past the end of the item list
    /// - `QuoteTooLarge` when adding beyond [`MAX_QUOTE_ITEMS`]
    ///
    /// On error the previous state is gone; callers that need it keep a
    /// clone (the CLI simply does not save).
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use quotekit_core::{LineItemInput, Quote, QuoteAction};
    /// use rust_decimal::Decimal;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let quote = Quote::sample(day)
    ///     .apply(QuoteAction::RemoveItem { index: 1 })?
    ///     .apply(QuoteAction::AddItem(LineItemInput::new(
    ///         "Gift wrap",
    ///         Decimal::ONE,
    ///         Decimal::from(500),
    ///     )))?;
    ///
    /// assert_eq!(quote.items.len(), 2);
    /// assert_eq!(quote.items[1].description, "Gift wrap");
    /// # Ok::<(), quotekit_core::CoreError>(())
    /// ```
    pub fn apply(mut self, action: QuoteAction) -> CoreResult<Quote> {
        match action {
            QuoteAction::SetIssuer(issuer) => self.header.issuer = issuer,
            QuoteAction::SetNumber(number) => self.header.number = number,
            QuoteAction::SetClient(client) => self.header.client = client,
            QuoteAction::SetIssueDate(date) => self.header.issue_date = date,
            QuoteAction::SetDueDate(date) => self.header.due_date = date,
            QuoteAction::SetPaymentTerms(terms) => self.header.payment_terms = terms,
            QuoteAction::SetDiscount(raw) => self.header.discount_pct = normalize_percent(raw),
            QuoteAction::SetTax(raw) => self.header.tax_pct = normalize_percent(raw),
            QuoteAction::SetNotes(notes) => self.notes = notes,
            QuoteAction::SetTerms(terms) => self.terms = terms,
            QuoteAction::AddItem(input) => {
                if self.items.len() >= MAX_QUOTE_ITEMS {
                    return Err(CoreError::QuoteTooLarge {
                        max: MAX_QUOTE_ITEMS,
                    });
                }
                self.items.push(LineItem::from_input(input));
            }
            QuoteAction::UpdateItem { index, input } => {
                let len = self.items.len();
                let slot = self
                    .items
                    .get_mut(index)
                    .ok_or(CoreError::ItemNotFound { index, len })?;
                *slot = LineItem::from_input(input);
            }
            QuoteAction::RemoveItem { index } => {
                if index >= self.items.len() {
                    return Err(CoreError::ItemNotFound {
                        index,
                        len: self.items.len(),
                    });
                }
                self.items.remove(index);
            }
            QuoteAction::ClearItems => self.items.clear(),
        }

        Ok(self)
    }
}

/// A single user edit.
///
/// Numeric fields carry the raw value as typed; `apply` normalizes them
/// (percentages are clamped into `0..=100`, item numbers go through
/// [`LineItem::from_input`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum QuoteAction {
    SetIssuer(String),
    SetNumber(String),
    SetClient(String),
    SetIssueDate(NaiveDate),
    SetDueDate(NaiveDate),
    SetPaymentTerms(String),
    SetDiscount(Decimal),
    SetTax(Decimal),
    SetNotes(String),
    SetTerms(String),
    AddItem(LineItemInput),
    /// Replaces the item at `index` (0-based).
    UpdateItem { index: usize, input: LineItemInput },
    /// Removes the item at `index` (0-based).
    RemoveItem { index: usize },
    ClearItems,
}

// =============================================================================
// Unit Tests
// =============================================================================
