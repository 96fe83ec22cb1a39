//! CSV export of the line items.
//!
//! One header row (captions from [`DocumentLabels`]) followed by one row per
//! item: description, quantity, unit price, amount. Numbers are plain
//! decimals with a `.` separator and no currency symbol, so spreadsheets
//! can read them regardless of the display currency.

use csv::WriterBuilder;
use quotekit_core::validation::export_file_stem;
use quotekit_core::QuoteSnapshot;
use serde::Serialize;

use crate::error::{RenderError, RenderResult};
use crate::labels::DocumentLabels;
use crate::renderer::DocumentRenderer;

#[derive(Serialize)]
struct CsvItemRow<'a> {
    description: &'a str,
    quantity: u32,
    unit_price: String,
    amount: String,
}

/// Renders the items table of a snapshot as UTF-8 CSV.
#[derive(Debug, Clone, Default)]
pub struct CsvRenderer {
    labels: DocumentLabels,
}

impl CsvRenderer {
    pub fn new(labels: DocumentLabels) -> Self {
        CsvRenderer { labels }
    }
}

impl DocumentRenderer for CsvRenderer {
    fn render(&self, snapshot: &QuoteSnapshot) -> RenderResult<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record([
            &self.labels.csv_description,
            &self.labels.csv_quantity,
            &self.labels.csv_unit_price,
            &self.labels.csv_amount,
        ])?;

        for line in &snapshot.items {
            writer.serialize(CsvItemRow {
                description: &line.description,
                quantity: line.quantity,
                unit_price: line.unit_price.amount().to_string(),
                amount: line.amount.amount().to_string(),
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| RenderError::Io(e.into_error()))?;

        tracing::debug!(
            number = %snapshot.header.number,
            rows = snapshot.item_count(),
            size = bytes.len(),
            "Rendered CSV"
        );
        Ok(bytes)
    }

    fn file_name(&self, snapshot: &QuoteSnapshot) -> String {
        format!("items_{}.csv", export_file_stem(&snapshot.header.number))
    }

    fn media_type(&self) -> &'static str {
        "text/csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use quotekit_core::{LineItem, Money, Quote};
    use rust_decimal_macros::dec;

    fn quote() -> Quote {
        Quote::sample(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_header_then_rows() {
        let bytes = CsvRenderer::default().render(&quote().snapshot()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Description,Quantity,Unit Price,Amount");
        assert_eq!(lines[1], "Lucky porcelain mug with electric warmer,1,18999.0,18999.0");
    }

    #[test]
    fn test_missing_values_are_zero() {
        let mut quote = quote();
        quote.items = vec![LineItem {
            description: String::new(),
            quantity: None,
            unit_price: None,
        }];

        let text = String::from_utf8(CsvRenderer::default().render(&quote.snapshot()).unwrap()).unwrap();
        assert_eq!(text.lines().nth(1), Some(",0,0,0"));
    }

    #[test]
    fn test_quotes_fields_with_commas() {
        let mut quote = quote();
        quote.items = vec![LineItem::new("Mug, large", 2, Money::new(dec!(1.50)))];

        let text = String::from_utf8(CsvRenderer::default().render(&quote.snapshot()).unwrap()).unwrap();
        assert_eq!(text.lines().nth(1), Some("\"Mug, large\",2,1.50,3.00"));
    }

    #[test]
    fn test_spanish_header_and_file_name() {
        let renderer = CsvRenderer::new(DocumentLabels::spanish());
        let snapshot = quote().snapshot();

        let text = String::from_utf8(renderer.render(&snapshot).unwrap()).unwrap();
        assert_eq!(text.lines().next(), Some("Descripción,Cantidad,Precio unitario,Monto"));
        assert_eq!(renderer.file_name(&snapshot), "items_101.csv");
        assert_eq!(renderer.media_type(), "text/csv");
    }
}
