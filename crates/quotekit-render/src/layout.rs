//! # Page Layout
//!
//! Low-level drawing for the PDF renderer: font metrics for the two
//! standard fonts we use, WinAnsi text encoding, line wrapping and a page
//! composer that turns drawing calls into content stream operations.
//!
//! ## Coordinates
//! ```text
//!   (0, height) ┌───────────────────────┐
//!               │  margin_top           │
//!               │   ┌───────────────┐   │  ◄── cursor starts here and
//!               │   │   content     │   │      moves DOWN as blocks
//!               │   │               │   │      are placed
//!               │   └───────────────┘   │
//!               │  margin_bottom        │
//!        (0, 0) └───────────────────────┘ (width, 0)
//! ```
//! PDF user space has its origin at the bottom-left corner, in points.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use quotekit_core::Rgb;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

// =============================================================================
// Fonts
// =============================================================================

/// The two base-14 fonts used in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Name of the font in the page resources dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Regular => &HELVETICA_WIDTHS,
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of one character, in thousandths of the font size.
    pub fn char_width(self, c: char) -> u16 {
        match c as u32 {
            code @ 32..=126 => self.widths()[(code - 32) as usize],
            _ => DEFAULT_WIDTH,
        }
    }
}

const DEFAULT_WIDTH: u16 = 556;

// Adobe AFM advance widths for codes 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of `text` set in `font` at `size` points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(font.char_width(c))).sum();
    units as f32 * size / 1000.0
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes text for a WinAnsiEncoding font.
///
/// Latin-1 passes through; the typographic characters WinAnsi adds in
/// 0x80..=0x9F are mapped; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

// =============================================================================
// Wrapping
// =============================================================================

/// Breaks `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. Words wider than a whole line are split
/// between characters. An empty paragraph yields an empty line.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, font, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // Hard-break words that cannot fit on a line of their own.
            for c in word.chars() {
                current.push(c);
                if text_width(&current, font, size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, c.to_string()));
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Largest size `<= size` (and `>= min`) at which `text` fits in `width`.
pub fn fit_font_size(text: &str, font: Font, size: f32, min: f32, width: f32) -> f32 {
    let natural = text_width(text, font, size);
    if natural <= width || natural == 0.0 {
        return size;
    }
    (size * width / natural).max(min)
}

// =============================================================================
// Page Composer
// =============================================================================

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_x: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// A4 portrait, 18 mm side margins, 16 mm top and bottom.
    pub fn a4() -> Self {
        PageGeometry {
            width: 210.0 * MM,
            height: 297.0 * MM,
            margin_x: 18.0 * MM,
            margin_top: 16.0 * MM,
            margin_bottom: 16.0 * MM,
        }
    }

    pub fn left(&self) -> f32 {
        self.margin_x
    }

    pub fn top(&self) -> f32 {
        self.height - self.margin_top
    }
}

/// Collects drawing operations page by page.
///
/// `cursor` is the y coordinate of the top of the next block. Callers ask
/// for room with [`Composer::ensure_space`] before drawing a block; when
/// the block does not fit, a new page is started.
pub struct Composer {
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
    cursor: f32,
}

impl Composer {
    pub fn new(geometry: PageGeometry) -> Self {
        Composer {
            geometry,
            pages: vec![Vec::new()],
            cursor: geometry.top(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Moves the cursor down.
    pub fn advance(&mut self, amount: f32) {
        self.cursor -= amount;
    }

    /// Space left between the cursor and the bottom margin.
    pub fn remaining(&self) -> f32 {
        self.cursor - self.geometry.margin_bottom
    }

    /// Starts a new page if less than `height` is left on this one.
    /// Returns `true` when a page break happened.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        let page_is_fresh = self.cursor >= self.geometry.top();
        if height <= self.remaining() || page_is_fresh {
            return false;
        }
        self.new_page();
        true
    }

    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = self.geometry.top();
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` is never empty: it starts with one page and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Draws one line of text with its baseline at `y`.
    pub fn text(&mut self, x: f32, y: f32, font: Font, size: f32, color: Rgb, text: &str) {
        let [r, g, b] = color.unit_components();
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.resource_name().as_bytes().to_vec()), real(size)],
        ));
        ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new("Td", vec![real(x), real(y)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Draws text so that it ends at `right`.
    pub fn text_right(&mut self, right: f32, y: f32, font: Font, size: f32, color: Rgb, text: &str) {
        let x = right - text_width(text, font, size);
        self.text(x, y, font, size, color, text);
    }

    /// Fills a rectangle whose bottom-left corner is `(x, y)`.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let [r, g, b] = color.unit_components();
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new("re", vec![real(x), real(y), real(w), real(h)]));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Outlines a rectangle whose bottom-left corner is `(x, y)`.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Rgb) {
        let [r, g, b] = color.unit_components();
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("RG", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new("w", vec![real(width)]));
        ops.push(Operation::new("re", vec![real(x), real(y), real(w), real(h)]));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb) {
        let [r, g, b] = color.unit_components();
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("RG", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new("w", vec![real(width)]));
        ops.push(Operation::new("m", vec![real(from.0), real(from.1)]));
        ops.push(Operation::new("l", vec![real(to.0), real(to.1)]));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Paints the image XObject `name` into the given box.
    pub fn image(&mut self, name: &str, x: f32, y: f32, w: f32, h: f32) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![real(w), real(0.0), real(0.0), real(h), real(x), real(y)],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Hands back the operations of every page, in order.
    pub fn finish(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_width() {
        // "Total" in Helvetica: 611 + 556 + 278 + 556 + 222 = 2223
        let w = text_width("Total", Font::Regular, 10.0);
        assert!((w - 22.23).abs() < 1e-3, "got {}", w);
        assert!(text_width("Total", Font::Bold, 10.0) > w);
        assert_eq!(text_width("", Font::Regular, 10.0), 0.0);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Quote (1)"), b"Quote (1)".to_vec());
        assert_eq!(encode_win_ansi("Artículo"), vec![b'A', b'r', b't', 0xED, b'c', b'u', b'l', b'o']);
        assert_eq!(encode_win_ansi("€ – …"), vec![0x80, b' ', 0x96, b' ', 0x85]);
        assert_eq!(encode_win_ansi("☕ 漢"), b"? ?".to_vec());
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = wrap_text("Lucky mug", Font::Regular, 10.0, 200.0);
        assert_eq!(lines, vec!["Lucky mug".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width_and_newlines() {
        let text = "Thermal tumbler with digital temperature sensor\nSecond paragraph";
        let lines = wrap_text(text, Font::Regular, 10.0, 100.0);

        assert!(lines.len() > 2);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 10.0) <= 100.0, "too wide: {}", line);
        }
        assert_eq!(lines.last().unwrap(), "Second paragraph");
        assert!(lines[0].starts_with("Thermal"));
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let word = "x".repeat(100);
        let lines = wrap_text(&word, Font::Regular, 10.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", Font::Regular, 10.0, 50.0), vec![String::new()]);
        assert_eq!(wrap_text("a\n\nb", Font::Regular, 10.0, 50.0).len(), 3);
    }

    #[test]
    fn test_fit_font_size() {
        assert_eq!(fit_font_size("ARS 1,00", Font::Regular, 10.0, 6.0, 500.0), 10.0);

        let size = fit_font_size("ARS 1.234.567,89", Font::Regular, 10.0, 6.0, 50.0);
        assert!(size < 10.0);
        assert!(text_width("ARS 1.234.567,89", Font::Regular, size) <= 50.0 + 1e-3);

        assert_eq!(fit_font_size(&"9".repeat(80), Font::Regular, 10.0, 6.0, 50.0), 6.0);
    }

    #[test]
    fn test_composer_page_breaks() {
        let mut composer = Composer::new(PageGeometry::a4());
        assert_eq!(composer.page_count(), 1);

        // A fresh page never breaks, even for oversized blocks.
        assert!(!composer.ensure_space(10_000.0));

        composer.advance(700.0);
        assert!(composer.ensure_space(100.0));
        assert_eq!(composer.page_count(), 2);
        assert_eq!(composer.cursor(), composer.geometry().top());
    }

    #[test]
    fn test_composer_collects_ops() {
        let mut composer = Composer::new(PageGeometry::a4());
        composer.text(10.0, 10.0, Font::Bold, 12.0, Rgb::BLACK, "Hi");
        composer.fill_rect(0.0, 0.0, 5.0, 5.0, Rgb::WHITE);

        let pages = composer.finish();
        let ops: Vec<&str> = pages[0].iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(&ops[..6], &["BT", "Tf", "rg", "Td", "Tj", "ET"]);
        assert!(ops.contains(&"re"));
    }
}
