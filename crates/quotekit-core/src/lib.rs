//! # quotekit-core: Pure Business Logic for Quotekit
//!
//! This crate is the **heart** of Quotekit. It holds the quote model, the
//! totals engine and the snapshot handed to document renderers, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quotekit Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (apps/cli)                         │   │
//! │  │   new ──► set / add-item / remove-item ──► show ──► export      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteAction                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quotekit-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │ snapshot  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │  Totals   │  │  Quote-   │  │   │
//! │  │   │  Percent  │  │ Currency- │  │ line_     │  │  Snapshot │  │   │
//! │  │   │  Header   │  │  Format   │  │  amount   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteSnapshot                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               quotekit-render (Document Layer)                  │   │
//! │  │                  PDF (lopdf), CSV (csv)                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Header, line items, percentages
//! - [`money`] - Decimal money and the money formatter
//! - [`quote`] - The quote state container and its actions
//! - [`totals`] - The totals engine
//! - [`snapshot`] - Immutable document model for renderers
//! - [`theme`] - Visual configuration (colors, currency, logo)
//! - [`validation`] - Input normalization and validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quotekit_core::{Quote, QuoteSnapshot};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let quote = Quote::sample(today);
//!
//! let totals = quote.totals();
//! assert_eq!(totals.total.to_string(), "28048.30");
//!
//! let snapshot = QuoteSnapshot::capture(&quote);
//! assert_eq!(snapshot.items.len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod quote;
pub mod snapshot;
pub mod theme;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_money, format_money_f64, CurrencyFormat, DecimalStyle, Money};
pub use quote::{Quote, QuoteAction};
pub use snapshot::{QuoteSnapshot, SnapshotLine};
pub use theme::{Rgb, Theme};
pub use totals::{compute_totals, line_amount, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of line items on a single quote.
///
/// ## Business Reason
/// Keeps a quote to a handful of pages; a longer list is an order, not a quote.
pub const MAX_QUOTE_ITEMS: usize = 100;

/// Days between issue date and due date on a freshly created quote.
pub const DEFAULT_VALIDITY_DAYS: i64 = 7;

/// Maximum length of a quote number.
///
/// The number ends up in export file names, so it is kept short.
pub const MAX_QUOTE_NUMBER_LEN: usize = 50;
