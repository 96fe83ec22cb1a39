//! # quotekit-render: Documents from Quote Snapshots
//!
//! Turns a [`QuoteSnapshot`](quotekit_core::QuoteSnapshot) into the files a
//! customer receives: a PDF quote and a CSV of its line items.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   quotekit-core ── QuoteSnapshot ──┐                                    │
//! │                                    ▼                                    │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │              ★ quotekit-render (THIS CRATE) ★                    │  │
//! │  │                                                                  │  │
//! │  │   QuoteExporter ─┬─► PdfRenderer ─► layout ─► lopdf ─► bytes     │  │
//! │  │                  └─► CsvRenderer ─► csv ─────────────► bytes     │  │
//! │  │                                                                  │  │
//! │  │   DocumentLabels (en / es)   Theme (colors, currency)   Logo     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                    │ ExportBundle                       │
//! │                                    ▼                                    │
//! │   apps/cli writes Quote_<n>.pdf and items_<n>.csv                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`renderer`] - The `DocumentRenderer` trait
//! - [`pdf`] - PDF output (`lopdf`)
//! - [`csv_export`] - CSV output (`csv`)
//! - [`export`] - Runs renderers, keeps the last good bundle
//! - [`labels`] - Captions for each locale
//! - [`layout`] - Fonts, wrapping and page composition
//! - [`logo`] - Logo decoding (`image`)
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use quotekit_core::{Quote, Theme};
//! use quotekit_render::{DocumentLabels, QuoteExporter};
//!
//! let quote = Quote::sample(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
//! let mut exporter = QuoteExporter::standard(Theme::default(), DocumentLabels::default(), None);
//!
//! let bundle = exporter.export(&quote.snapshot()).unwrap();
//! assert_eq!(bundle.pdf().unwrap().file_name, "Quote_101.pdf");
//! assert!(bundle.csv().unwrap().bytes.starts_with(b"Description,"));
//! ```

pub mod csv_export;
pub mod error;
pub mod export;
pub mod labels;
pub mod layout;
pub mod logo;
pub mod pdf;
pub mod renderer;

pub use csv_export::CsvRenderer;
pub use error::{RenderError, RenderResult};
pub use export::{Artifact, ExportBundle, QuoteExporter};
pub use labels::{DocumentLabels, Locale};
pub use logo::Logo;
pub use pdf::PdfRenderer;
pub use renderer::DocumentRenderer;
