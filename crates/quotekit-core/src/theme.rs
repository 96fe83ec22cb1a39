//! # Theme
//!
//! Visual configuration for rendered quotes. Every look a quote can have is
//! a `Theme` value; renderers never hard-code colors or currency.
//!
//! ## Recognized Options
//! | Option          | Example     | Used for                              |
//! |-----------------|-------------|---------------------------------------|
//! | `primary_color` | `#1F2937`   | Headings, quote number, total line    |
//! | `accent_color`  | `#F5F5F5`   | Items table header background         |
//! | `currency`      | `ARS`/comma | Money formatting                      |
//! | `logo_path`     | `logo.png`  | Image placed above the header         |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::{CurrencyFormat, DecimalStyle};

// =============================================================================
// Color
// =============================================================================

/// An sRGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Components scaled to `0.0..=1.0`, as PDF color operators expect.
    pub fn unit_components(&self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Rgb {
    type Err = ValidationError;

    /// Parses `#RRGGBB` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "color".to_string(),
            reason: format!("'{}': {}", s, reason),
        };

        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("expected #RRGGBB"));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid("bad hex digit"))
        };

        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Colors, currency display and logo for rendered documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary_color: Rgb,
    pub accent_color: Rgb,
    pub currency: CurrencyFormat,

    /// Image placed above the header, taken verbatim from configuration.
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
}

impl Theme {
    /// Names accepted by [`Theme::preset`].
    pub const PRESETS: [&'static str; 4] = ["classic", "ocean", "forest", "rose"];

    /// Looks up a built-in palette by name. Currency defaults to pesos.
    pub fn preset(name: &str) -> Option<Theme> {
        let (primary, accent) = match name.trim().to_ascii_lowercase().as_str() {
            "classic" => (Rgb::new(0x1F, 0x29, 0x37), Rgb::new(0xF5, 0xF5, 0xF5)),
            "ocean" => (Rgb::new(0x0B, 0x4F, 0x6C), Rgb::new(0xDC, 0xEF, 0xF7)),
            "forest" => (Rgb::new(0x1B, 0x5E, 0x20), Rgb::new(0xE8, 0xF5, 0xE9)),
            "rose" => (Rgb::new(0x88, 0x0E, 0x4F), Rgb::new(0xFC, 0xE4, 0xEC)),
            _ => return None,
        };

        Some(Theme {
            primary_color: primary,
            accent_color: accent,
            currency: CurrencyFormat::default(),
            logo_path: None,
        })
    }

    /// Replaces the currency display.
    pub fn with_currency(mut self, symbol: impl Into<String>, style: DecimalStyle) -> Self {
        self.currency = CurrencyFormat::new(symbol, style);
        self
    }

    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(path.into());
        self
    }
}

/// The "classic" palette.
impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary_color: Rgb::new(0x1F, 0x29, 0x37),
            accent_color: Rgb::new(0xF5, 0xF5, 0xF5),
            currency: CurrencyFormat::default(),
            logo_path: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
