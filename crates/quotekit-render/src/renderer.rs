//! The seam between a snapshot and a concrete document format.

use quotekit_core::QuoteSnapshot;

use crate::error::RenderResult;

/// Produces one document from a quote snapshot.
///
/// Implementations must be deterministic: rendering the same snapshot twice
/// yields identical bytes.
pub trait DocumentRenderer {
    /// Renders the whole document into memory.
    fn render(&self, snapshot: &QuoteSnapshot) -> RenderResult<Vec<u8>>;

    /// Suggested file name, e.g. `Quote_101.pdf`.
    fn file_name(&self, snapshot: &QuoteSnapshot) -> String;

    /// MIME type of the produced bytes.
    fn media_type(&self) -> &'static str;
}
