//! # PDF Renderer
//!
//! Lays a quote out on A4 pages and writes it with `lopdf`.
//!
//! ## Page Layout
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [logo]                                       │
//! │ Quote # 101                 Mamba Shop       │  18pt, primary color
//! │ Prepared for: Milena                         │
//! │ Date: 01/03/2024          Valid until: ...   │
//! │ Payment terms: ...                           │
//! │                                              │
//! │ ┌───────────────────┬─────┬────────┬───────┐ │
//! │ │ Description       │ Qty │ Price  │Amount │ │  accent background
//! │ ├───────────────────┼─────┼────────┼───────┤ │
//! │ │ Lucky mug ...     │   1 │ 18.999 │18.999 │ │  repeated on each page
//! │ └───────────────────┴─────┴────────┴───────┘ │
//! │                      Subtotal:      32.998,00│
//! │                      Discount (15.0%): ...   │
//! │                      Tax (0.0%):    ...      │
//! │                      ─────────────────────── │
//! │                      Total:         28.048,30│  bold
//! │ Notes:                                       │  12pt grey
//! │ ...                                          │
//! │ Terms:                                       │
//! │ ...                                          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! The output depends on the snapshot, theme, labels and logo only. No
//! creation date or document ID is written, so the same input always
//! yields byte-identical files.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use quotekit_core::validation::export_file_stem;
use quotekit_core::{format_money, QuoteSnapshot, Rgb, Theme};

use crate::error::{RenderError, RenderResult};
use crate::labels::DocumentLabels;
use crate::layout::{encode_win_ansi, fit_font_size, text_width, wrap_text, Composer, Font, PageGeometry, MM};
use crate::logo::Logo;
use crate::renderer::DocumentRenderer;

// =============================================================================
// Style
// =============================================================================

const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0;
const H1_SIZE: f32 = 18.0;
const H1_LEADING: f32 = 22.0;
const H2_SIZE: f32 = 12.0;
const H2_LEADING: f32 = 15.0;
const MIN_NUMBER_SIZE: f32 = 6.0;

const CELL_PAD_X: f32 = 6.0;
const CELL_PAD_Y: f32 = 3.0;
const HEADER_ROW_PAD_BOTTOM: f32 = 6.0;

const GRID_COLOR: Rgb = Rgb::new(0xD3, 0xD3, 0xD3);
const SECTION_COLOR: Rgb = Rgb::new(0x80, 0x80, 0x80);
const GRID_WIDTH: f32 = 0.25;
const TOTAL_RULE_WIDTH: f32 = 0.5;

/// Items table columns: description, quantity, unit price, amount.
const ITEM_COLUMNS_MM: [f32; 4] = [100.0, 20.0, 25.0, 25.0];
/// Totals table columns: label, value.
const TOTALS_COLUMNS_MM: [f32; 2] = [120.0, 50.0];
/// Header block columns: quote number / client, issuer / due date.
const HEADER_COLUMNS_MM: [f32; 2] = [95.0, 75.0];

const LOGO_NAME: &str = "Im1";
const LOGO_MAX_HEIGHT_MM: f32 = 20.0;
const LOGO_MAX_WIDTH_MM: f32 = 60.0;

// =============================================================================
// Renderer
// =============================================================================

/// Renders a quote snapshot as a PDF document.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    theme: Theme,
    labels: DocumentLabels,
    logo: Option<Logo>,
}

impl PdfRenderer {
    pub fn new(theme: Theme, labels: DocumentLabels) -> Self {
        PdfRenderer {
            theme,
            labels,
            logo: None,
        }
    }

    /// Places `logo` above the header block.
    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Document title, e.g. `Quote_101`.
    pub fn title(&self, snapshot: &QuoteSnapshot) -> String {
        format!("{}_{}", self.labels.document_name, snapshot.header.number)
    }

    fn table_width() -> f32 {
        ITEM_COLUMNS_MM.iter().sum::<f32>() * MM
    }

    fn money(&self, amount: quotekit_core::Money) -> String {
        format_money(amount, &self.theme.currency)
    }

    // -------------------------------------------------------------------------
    // Blocks
    // -------------------------------------------------------------------------

    fn draw_logo(&self, c: &mut Composer, logo: &Logo) {
        let mut height = LOGO_MAX_HEIGHT_MM * MM;
        let mut width = height * logo.aspect_ratio();
        if width > LOGO_MAX_WIDTH_MM * MM {
            width = LOGO_MAX_WIDTH_MM * MM;
            height = width / logo.aspect_ratio();
        }

        let left = c.geometry().left();
        let bottom = c.cursor() - height;
        c.image(LOGO_NAME, left, bottom, width, height);
        c.advance(height + 4.0 * MM);
    }

    fn draw_header(&self, c: &mut Composer, snapshot: &QuoteSnapshot) {
        let header = &snapshot.header;
        let left = c.geometry().left();
        let second_col = left + HEADER_COLUMNS_MM[0] * MM;
        let right = left + Self::table_width();
        let primary = self.theme.primary_color;

        // Quote number and issuer side by side.
        let heading = format!("{} {}", self.labels.quote_heading, header.number);
        let pad = CELL_PAD_X;
        let heading_lines = wrap_text(&heading, Font::Bold, H1_SIZE, HEADER_COLUMNS_MM[0] * MM - pad);
        let issuer_lines = wrap_text(&header.issuer, Font::Bold, H1_SIZE, HEADER_COLUMNS_MM[1] * MM);
        let rows = heading_lines.len().max(issuer_lines.len());

        c.ensure_space(rows as f32 * H1_LEADING);
        let top = c.cursor();
        for (i, line) in heading_lines.iter().enumerate() {
            let y = top - H1_SIZE - i as f32 * H1_LEADING;
            c.text(left, y, Font::Bold, H1_SIZE, primary, line);
        }
        for (i, line) in issuer_lines.iter().enumerate() {
            let y = top - H1_SIZE - i as f32 * H1_LEADING;
            c.text(second_col, y, Font::Bold, H1_SIZE, primary, line);
        }
        c.advance(rows as f32 * H1_LEADING + 6.0);

        // Prepared for: <client>
        c.ensure_space(BODY_LEADING);
        let y = c.cursor() - BODY_SIZE;
        let caption = format!("{} ", self.labels.prepared_for);
        c.text(left, y, Font::Regular, BODY_SIZE, Rgb::BLACK, &caption);
        let client_x = left + text_width(&caption, Font::Regular, BODY_SIZE);
        c.text(client_x, y, Font::Bold, BODY_SIZE, Rgb::BLACK, &header.client);
        c.advance(BODY_LEADING + 2.0);

        // Issue date on the left, due date flush right.
        c.ensure_space(BODY_LEADING);
        let y = c.cursor() - BODY_SIZE;
        let issued = format!("{} {}", self.labels.issue_date, header.issue_date.format("%d/%m/%Y"));
        let due = format!("{} {}", self.labels.due_date, header.due_date.format("%d/%m/%Y"));
        c.text(left, y, Font::Regular, BODY_SIZE, Rgb::BLACK, &issued);
        c.text_right(right, y, Font::Regular, BODY_SIZE, Rgb::BLACK, &due);
        c.advance(BODY_LEADING + 2.0);

        let terms = format!("{} {}", self.labels.payment_terms, header.payment_terms);
        for line in wrap_text(&terms, Font::Regular, BODY_SIZE, Self::table_width()) {
            c.ensure_space(BODY_LEADING);
            let y = c.cursor() - BODY_SIZE;
            c.text(left, y, Font::Regular, BODY_SIZE, Rgb::BLACK, &line);
            c.advance(BODY_LEADING);
        }

        c.advance(6.0 * MM);
    }

    fn items_header_height() -> f32 {
        BODY_LEADING + CELL_PAD_Y + HEADER_ROW_PAD_BOTTOM
    }

    fn item_row_height(lines: usize) -> f32 {
        lines as f32 * BODY_LEADING + 2.0 * CELL_PAD_Y
    }

    /// Number of description lines that fit in `space`.
    fn item_lines_fitting(space: f32) -> usize {
        let usable = space - 2.0 * CELL_PAD_Y;
        if usable < BODY_LEADING {
            0
        } else {
            ((usable + 0.01) / BODY_LEADING) as usize
        }
    }

    fn draw_items_header(&self, c: &mut Composer) {
        let height = Self::items_header_height();
        c.ensure_space(height);

        let top = c.cursor();
        let bottom = top - height;
        let left = c.geometry().left();
        c.fill_rect(left, bottom, Self::table_width(), height, self.theme.accent_color);

        let captions = [
            &self.labels.item,
            &self.labels.quantity,
            &self.labels.price,
            &self.labels.amount,
        ];
        let mut x = left;
        for (caption, width_mm) in captions.into_iter().zip(ITEM_COLUMNS_MM) {
            let width = width_mm * MM;
            let size = fit_font_size(caption, Font::Bold, BODY_SIZE, MIN_NUMBER_SIZE, width - 2.0 * CELL_PAD_X);
            c.text(x + CELL_PAD_X, top - CELL_PAD_Y - BODY_SIZE, Font::Bold, size, Rgb::BLACK, caption);
            c.stroke_rect(x, bottom, width, height, GRID_WIDTH, GRID_COLOR);
            x += width;
        }

        c.advance(height);
    }

    fn continue_items_on_new_page(&self, c: &mut Composer) {
        c.new_page();
        self.draw_items_header(c);
    }

    fn draw_items(&self, c: &mut Composer, snapshot: &QuoteSnapshot) {
        self.draw_items_header(c);

        let desc_width = ITEM_COLUMNS_MM[0] * MM - 2.0 * CELL_PAD_X;
        let page_capacity = c.geometry().top() - c.geometry().margin_bottom - Self::items_header_height();

        for line in &snapshot.items {
            let desc_lines = wrap_text(&line.description, Font::Regular, BODY_SIZE, desc_width);
            let cells = [
                line.quantity.to_string(),
                self.money(line.unit_price),
                self.money(line.amount),
            ];

            // Rows that fit on a page are never split.
            let height = Self::item_row_height(desc_lines.len());
            if height > c.remaining() && height <= page_capacity {
                tracing::trace!(position = line.position, "Items table continues on a new page");
                self.continue_items_on_new_page(c);
            }

            let mut rest: &[String] = &desc_lines;
            let mut numbers = Some(&cells);
            while !rest.is_empty() {
                let mut fit = Self::item_lines_fitting(c.remaining()).min(rest.len());
                if fit == 0 {
                    self.continue_items_on_new_page(c);
                    fit = Self::item_lines_fitting(c.remaining()).clamp(1, rest.len());
                }

                let (chunk, tail) = rest.split_at(fit);
                self.draw_item_row(c, chunk, numbers.take());
                rest = tail;

                if !rest.is_empty() {
                    tracing::trace!(position = line.position, "Splitting a tall row across pages");
                    self.continue_items_on_new_page(c);
                }
            }
        }

        c.advance(4.0 * MM);
    }

    /// Draws one table row at the cursor. `numbers` (quantity, unit price,
    /// amount) is only given for the first part of a split row.
    fn draw_item_row(&self, c: &mut Composer, desc_lines: &[String], numbers: Option<&[String; 3]>) {
        let left = c.geometry().left();
        let height = Self::item_row_height(desc_lines.len());
        let top = c.cursor();
        let bottom = top - height;
        let first_baseline = top - CELL_PAD_Y - BODY_SIZE;

        for (i, text) in desc_lines.iter().enumerate() {
            let y = first_baseline - i as f32 * BODY_LEADING;
            c.text(left + CELL_PAD_X, y, Font::Regular, BODY_SIZE, Rgb::BLACK, text);
        }

        if let Some(cells) = numbers {
            let mut x = left + ITEM_COLUMNS_MM[0] * MM;
            for (cell, width_mm) in cells.iter().zip(&ITEM_COLUMNS_MM[1..]) {
                let width = width_mm * MM;
                let size = fit_font_size(cell, Font::Regular, BODY_SIZE, MIN_NUMBER_SIZE, width - 2.0 * CELL_PAD_X);
                c.text_right(x + width - CELL_PAD_X, first_baseline, Font::Regular, size, Rgb::BLACK, cell);
                x += width;
            }
        }

        let mut x = left;
        for width_mm in ITEM_COLUMNS_MM {
            c.stroke_rect(x, bottom, width_mm * MM, height, GRID_WIDTH, GRID_COLOR);
            x += width_mm * MM;
        }

        c.advance(height);
    }

    fn draw_totals(&self, c: &mut Composer, snapshot: &QuoteSnapshot) {
        let totals = &snapshot.totals;
        let header = &snapshot.header;
        let rows = [
            (self.labels.subtotal.clone(), self.money(totals.subtotal)),
            (self.labels.discount_line(header.discount_pct), self.money(totals.discount_amount)),
            (self.labels.tax_line(header.tax_pct), self.money(totals.tax_amount)),
            (self.labels.total.clone(), self.money(totals.total)),
        ];

        let row_height = BODY_LEADING + 2.0 * CELL_PAD_Y;
        // The block is never split across pages.
        c.ensure_space(row_height * rows.len() as f32);

        let left = c.geometry().left();
        let width: f32 = TOTALS_COLUMNS_MM.iter().sum::<f32>() * MM;
        let value_right = left + width - CELL_PAD_X;
        let value_width = TOTALS_COLUMNS_MM[1] * MM - 2.0 * CELL_PAD_X;
        let last = rows.len() - 1;

        for (i, (label, value)) in rows.iter().enumerate() {
            let top = c.cursor();
            let baseline = top - CELL_PAD_Y - BODY_SIZE;
            let (font, color) = if i == last {
                c.line((left, top), (left + width, top), TOTAL_RULE_WIDTH, Rgb::BLACK);
                (Font::Bold, self.theme.primary_color)
            } else {
                (Font::Regular, Rgb::BLACK)
            };

            c.text(left + CELL_PAD_X, baseline, font, BODY_SIZE, color, label);
            let size = fit_font_size(value, font, BODY_SIZE, MIN_NUMBER_SIZE, value_width);
            c.text_right(value_right, baseline, font, size, color, value);
            c.advance(row_height);
        }

        c.advance(6.0 * MM);
    }

    fn draw_section(&self, c: &mut Composer, heading: &str, body: &str) {
        let left = c.geometry().left();

        // Keep the heading with at least one line of its body.
        c.ensure_space(H2_LEADING + BODY_LEADING);
        let y = c.cursor() - H2_SIZE;
        c.text(left, y, Font::Regular, H2_SIZE, SECTION_COLOR, heading);
        c.advance(H2_LEADING + 4.0);

        for line in wrap_text(body, Font::Regular, BODY_SIZE, Self::table_width()) {
            c.ensure_space(BODY_LEADING);
            if !line.is_empty() {
                let y = c.cursor() - BODY_SIZE;
                c.text(left, y, Font::Regular, BODY_SIZE, Rgb::BLACK, &line);
            }
            c.advance(BODY_LEADING);
        }
    }

    // -------------------------------------------------------------------------
    // Assembly
    // -------------------------------------------------------------------------

    fn assemble(&self, geometry: &PageGeometry, pages: Vec<Vec<Operation>>, title: &str) -> RenderResult<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in [Font::Regular, Font::Bold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), Object::Reference(font_id));
        }

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        if let Some(logo) = &self.logo {
            let image_id = doc.add_object(logo.to_xobject()?);
            let mut xobjects = Dictionary::new();
            xobjects.set(LOGO_NAME, Object::Reference(image_id));
            resources.set("XObject", Object::Dictionary(xobjects));
        }
        let resources_id = doc.add_object(resources);

        let mut kids = Vec::with_capacity(pages.len());
        for operations in pages {
            let content = Content { operations };
            let encoded = content.encode().map_err(|e| RenderError::Pdf(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "Contents" => Object::Reference(content_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => Object::Reference(resources_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(geometry.width),
                    Object::Real(geometry.height),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
            "Producer" => Object::String(b"quotekit".to_vec(), StringFormat::Literal),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(buffer)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, snapshot: &QuoteSnapshot) -> RenderResult<Vec<u8>> {
        let geometry = PageGeometry::a4();
        let mut composer = Composer::new(geometry);

        if let Some(logo) = &self.logo {
            self.draw_logo(&mut composer, logo);
        }
        self.draw_header(&mut composer, snapshot);
        self.draw_items(&mut composer, snapshot);
        self.draw_totals(&mut composer, snapshot);
        self.draw_section(&mut composer, &self.labels.notes, &snapshot.notes);
        composer.advance(2.0 * MM);
        self.draw_section(&mut composer, &self.labels.terms, &snapshot.terms);

        let pages = composer.finish();
        let page_count = pages.len();
        let bytes = self.assemble(&geometry, pages, &self.title(snapshot))?;

        tracing::debug!(
            number = %snapshot.header.number,
            items = snapshot.item_count(),
            pages = page_count,
            size = bytes.len(),
            "Rendered PDF"
        );
        Ok(bytes)
    }

    fn file_name(&self, snapshot: &QuoteSnapshot) -> String {
        format!(
            "{}_{}.pdf",
            self.labels.document_name,
            export_file_stem(&snapshot.header.number)
        )
    }

    fn media_type(&self) -> &'static str {
        "application/pdf"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quotekit_core::{LineItem, Money, Quote};
    use rust_decimal_macros::dec;

    fn sample() -> QuoteSnapshot {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Quote::sample(today).snapshot()
    }

    fn contains(haystack: &[u8], needle: &str) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle.as_bytes())
    }

    #[test]
    fn test_renders_loadable_pdf() {
        let bytes = PdfRenderer::new(Theme::default(), DocumentLabels::default())
            .render(&sample())
            .unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_sections_appear_in_order() {
        let bytes = PdfRenderer::new(Theme::default(), DocumentLabels::default())
            .render(&sample())
            .unwrap();

        let positions: Vec<usize> = [
            "(Quote # 101)",
            "(Mamba Shop)",
            "(Prepared for: )",
            "(Milena)",
            "(Description)",
            "(Subtotal:)",
            "(Discount (15.0%",
            "(Total:)",
            "(ARS 28.048,30)",
            "(Notes:)",
            "(Terms:)",
        ]
        .iter()
        .map(|needle| contains(&bytes, needle).unwrap_or_else(|| panic!("missing {}", needle)))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_dates_use_day_month_year() {
        let bytes = PdfRenderer::new(Theme::default(), DocumentLabels::default())
            .render(&sample())
            .unwrap();
        assert!(contains(&bytes, "(Date: 01/03/2024)").is_some());
        assert!(contains(&bytes, "(Valid until: 08/03/2024)").is_some());
    }

    #[test]
    fn test_title_and_file_name() {
        let renderer = PdfRenderer::new(Theme::default(), DocumentLabels::default());
        let snapshot = sample();

        assert_eq!(renderer.title(&snapshot), "Quote_101");
        assert_eq!(renderer.file_name(&snapshot), "Quote_101.pdf");
        assert_eq!(renderer.media_type(), "application/pdf");

        let bytes = renderer.render(&snapshot).unwrap();
        assert!(contains(&bytes, "(Quote_101)").is_some());
    }

    #[test]
    fn test_spanish_labels() {
        let renderer = PdfRenderer::new(Theme::default(), DocumentLabels::spanish());
        let snapshot = sample();
        assert_eq!(renderer.file_name(&snapshot), "Presupuesto_101.pdf");

        let bytes = renderer.render(&snapshot).unwrap();
        assert!(contains(&bytes, "(Presupuesto # 101)").is_some());
        assert!(contains(&bytes, "(Descuento (15.0%").is_some());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = PdfRenderer::new(Theme::default(), DocumentLabels::default());
        let snapshot = sample();
        assert_eq!(renderer.render(&snapshot).unwrap(), renderer.render(&snapshot).unwrap());
    }

    #[test]
    fn test_empty_quote_still_renders() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut quote = Quote::sample(today);
        quote.items.clear();
        quote.notes.clear();

        let bytes = PdfRenderer::new(Theme::default(), DocumentLabels::default())
            .render(&quote.snapshot())
            .unwrap();
        assert!(contains(&bytes, "(Description)").is_some());
        assert!(contains(&bytes, "(ARS 0,00)").is_some());
    }

    #[test]
    fn test_long_quotes_flow_onto_more_pages() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut quote = Quote::sample(today);
        quote.items = (0..80)
            .map(|i| LineItem::new(format!("Item number {}", i), 1, Money::new(dec!(10))))
            .collect();

        let bytes = PdfRenderer::new(Theme::default(), DocumentLabels::default())
            .render(&quote.snapshot())
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 2);
    }

    /// Baseline y of every text draw, page by page.
    fn text_baselines(bytes: &[u8]) -> Vec<Vec<f32>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Td")
                    .map(|op| op.operands[1].as_float().unwrap())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_row_taller_than_a_page_is_split() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut quote = Quote::sample(today);
        let words: Vec<String> = (0..1500).map(|i| format!("word{}", i)).collect();
        quote.items = vec![LineItem::new(words.join(" "), 1, Money::new(dec!(10)))];

        let bytes = PdfRenderer::new(Theme::default(), DocumentLabels::default())
            .render(&quote.snapshot())
            .unwrap();

        let geometry = PageGeometry::a4();
        let pages = text_baselines(&bytes);
        assert!(pages.len() >= 3, "only {} pages", pages.len());
        for (page, baselines) in pages.iter().enumerate() {
            for &y in baselines {
                assert!(y >= geometry.margin_bottom, "page {} draws text at y={}", page + 1, y);
                assert!(y <= geometry.top(), "page {} draws text at y={}", page + 1, y);
            }
        }

        // Every page after the first repeats the table header.
        let headers = contains_all(&bytes, "(Description)");
        assert!(headers >= pages.len() - 1);
        assert!(contains(&bytes, "word1499").is_some());
    }

    fn contains_all(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|window| *window == needle.as_bytes())
            .count()
    }

    #[test]
    fn test_non_latin_text_is_replaced() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut quote = Quote::sample(today);
        quote.header.client = "Ana 漢".to_string();

        let bytes = PdfRenderer::new(Theme::default(), DocumentLabels::default())
            .render(&quote.snapshot())
            .unwrap();
        assert!(contains(&bytes, "(Ana ?)").is_some());
    }
}
