//! # Validation Module
//!
//! Input normalization and validation for Quotekit.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input boundary (THIS MODULE, normalize_*)                    │
//! │  ├── Fractional quantity → floored                                     │
//! │  ├── Negative quantity / price → clamped to zero                       │
//! │  └── Percent outside 0..=100 → clamped                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Strict checks (THIS MODULE, validate_*)                      │
//! │  ├── Quote number present and short                                    │
//! │  └── Due date not before issue date                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Totals engine                                                │
//! │  └── Assumes everything above already happened                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quotekit_core::validation::{export_file_stem, validate_quote_number};
//!
//! validate_quote_number("101").unwrap();
//! assert_eq!(export_file_stem("2024/07 A"), "2024_07_A");
//! ```

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Percent;
use crate::MAX_QUOTE_NUMBER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Normalizers (never fail)
// =============================================================================

/// Normalizes a raw quantity: floors fractions, clamps into `0..=u32::MAX`.
///
/// An absent quantity stays absent; it is read as zero later.
pub fn normalize_quantity(raw: Option<Decimal>) -> Option<u32> {
    raw.map(|qty| {
        let floored = qty.floor();
        if floored <= Decimal::ZERO {
            0
        } else {
            floored.to_u32().unwrap_or(u32::MAX)
        }
    })
}

/// Normalizes a raw unit price: negative prices become zero.
pub fn normalize_unit_price(raw: Option<Decimal>) -> Option<Money> {
    raw.map(|price| Money::new(price.max(Decimal::ZERO)))
}

/// Normalizes a raw percentage into `0..=100`.
pub fn normalize_percent(raw: Decimal) -> Percent {
    Percent::clamped(raw)
}

// =============================================================================
// Validators
// =============================================================================

/// Validates a quote number.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters (it becomes part of the export file names)
pub fn validate_quote_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "quote number".to_string(),
        });
    }

    if number.chars().count() > MAX_QUOTE_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "quote number".to_string(),
            max: MAX_QUOTE_NUMBER_LEN,
        });
    }

    Ok(())
}

/// Validates a percentage without clamping it.
pub fn validate_percent(field: &str, raw: Decimal) -> ValidationResult<Percent> {
    Percent::new(raw).map_err(|_| ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: 100,
    })
}

/// Validates that the due date is not before the issue date.
pub fn validate_dates(issue_date: NaiveDate, due_date: NaiveDate) -> ValidationResult<()> {
    if due_date < issue_date {
        return Err(ValidationError::InvalidFormat {
            field: "due date".to_string(),
            reason: format!("{} is before the issue date {}", due_date, issue_date),
        });
    }

    Ok(())
}

/// Maps a quote number to a file-name-safe stem.
///
/// Characters outside `[A-Za-z0-9_-]` become `_`; an empty number becomes
/// `"quote"`.
pub fn export_file_stem(number: &str) -> String {
    let stem: String = number
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "quote".to_string()
    } else {
        stem
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(None), None);
        assert_eq!(normalize_quantity(Some(dec!(2))), Some(2));
        assert_eq!(normalize_quantity(Some(dec!(2.99))), Some(2));
        assert_eq!(normalize_quantity(Some(dec!(0.5))), Some(0));
        assert_eq!(normalize_quantity(Some(dec!(-3))), Some(0));
        assert_eq!(normalize_quantity(Some(dec!(-0.5))), Some(0));
        assert_eq!(normalize_quantity(Some(dec!(99999999999))), Some(u32::MAX));
    }

    #[test]
    fn test_normalize_unit_price() {
        assert_eq!(normalize_unit_price(None), None);
        assert_eq!(normalize_unit_price(Some(dec!(-1))), Some(Money::zero()));
        assert_eq!(
            normalize_unit_price(Some(dec!(13999.0))),
            Some(Money::new(dec!(13999.0)))
        );
    }

    #[test]
    fn test_normalize_percent() {
        assert_eq!(normalize_percent(dec!(-1)).value(), dec!(0));
        assert_eq!(normalize_percent(dec!(101)).value(), dec!(100));
    }

    #[test]
    fn test_validate_quote_number() {
        assert!(validate_quote_number("101").is_ok());
        assert!(validate_quote_number("Q-2024-007").is_ok());

        assert!(validate_quote_number("").is_err());
        assert!(validate_quote_number("   ").is_err());
        assert!(validate_quote_number(&"9".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_percent() {
        assert!(validate_percent("tax", dec!(21)).is_ok());
        let err = validate_percent("tax", dec!(121)).unwrap_err();
        assert_eq!(err.to_string(), "tax must be between 0 and 100");
    }

    #[test]
    fn test_validate_dates() {
        let issue = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        assert!(validate_dates(issue, due).is_ok());
        assert!(validate_dates(issue, issue).is_ok());
        assert!(validate_dates(due, issue).is_err());
    }

    #[test]
    fn test_export_file_stem() {
        assert_eq!(export_file_stem("101"), "101");
        assert_eq!(export_file_stem(" Q-7_b "), "Q-7_b");
        assert_eq!(export_file_stem("../etc/passwd"), "___etc_passwd");
        assert_eq!(export_file_stem("Nº 5"), "N__5");
        assert_eq!(export_file_stem(""), "quote");
    }
}
