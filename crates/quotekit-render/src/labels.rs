//! # Document Labels
//!
//! Every caption that ends up in a rendered document lives here, so the
//! renderers never embed user-visible text of their own.
//!
//! Two presets ship with the crate: English (the default) and Spanish
//! (`es`), the wording used by the shop the tool was first written for.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language of the captions in rendered documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "es" | "spanish" | "español" => Ok(Locale::Es),
            other => Err(format!("unknown locale '{}' (expected en or es)", other)),
        }
    }
}

/// Captions used by the PDF and CSV renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLabels {
    /// Prefix of the big heading; the quote number follows it.
    pub quote_heading: String,
    /// Prefix of the file name and PDF title (`Quote` → `Quote_101.pdf`).
    pub document_name: String,
    pub prepared_for: String,
    pub issue_date: String,
    pub due_date: String,
    pub payment_terms: String,

    // Items table
    pub item: String,
    pub quantity: String,
    pub price: String,
    pub amount: String,

    // CSV header
    pub csv_description: String,
    pub csv_quantity: String,
    pub csv_unit_price: String,
    pub csv_amount: String,

    // Totals block
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,

    pub notes: String,
    pub terms: String,
}

impl DocumentLabels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::english(),
            Locale::Es => Self::spanish(),
        }
    }

    pub fn english() -> Self {
        DocumentLabels {
            quote_heading: "Quote #".into(),
            document_name: "Quote".into(),
            prepared_for: "Prepared for:".into(),
            issue_date: "Date:".into(),
            due_date: "Valid until:".into(),
            payment_terms: "Payment terms:".into(),
            item: "Description".into(),
            quantity: "Quantity".into(),
            price: "Unit Price".into(),
            amount: "Amount".into(),
            csv_description: "Description".into(),
            csv_quantity: "Quantity".into(),
            csv_unit_price: "Unit Price".into(),
            csv_amount: "Amount".into(),
            subtotal: "Subtotal:".into(),
            discount: "Discount".into(),
            tax: "Tax".into(),
            total: "Total:".into(),
            notes: "Notes:".into(),
            terms: "Terms:".into(),
        }
    }

    pub fn spanish() -> Self {
        DocumentLabels {
            quote_heading: "Presupuesto #".into(),
            document_name: "Presupuesto".into(),
            prepared_for: "Cotización para:".into(),
            issue_date: "Fecha:".into(),
            due_date: "Vencimiento:".into(),
            payment_terms: "Condiciones de pago:".into(),
            item: "Artículo".into(),
            quantity: "Cantidad".into(),
            price: "Precio".into(),
            amount: "Monto".into(),
            csv_description: "Descripción".into(),
            csv_quantity: "Cantidad".into(),
            csv_unit_price: "Precio unitario".into(),
            csv_amount: "Monto".into(),
            subtotal: "Subtotal:".into(),
            discount: "Descuento".into(),
            tax: "Impuesto".into(),
            total: "Total:".into(),
            notes: "Notas:".into(),
            terms: "Términos:".into(),
        }
    }

    /// `Discount (15.0%):`
    pub fn discount_line(&self, pct: impl std::fmt::Display) -> String {
        format!("{} ({}):", self.discount, pct)
    }

    /// `Tax (21.0%):`
    pub fn tax_line(&self, pct: impl std::fmt::Display) -> String {
        format!("{} ({}):", self.tax, pct)
    }
}

impl Default for DocumentLabels {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" ES ".parse::<Locale>().unwrap(), Locale::Es);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_presets_differ() {
        let en = DocumentLabels::for_locale(Locale::En);
        let es = DocumentLabels::for_locale(Locale::Es);
        assert_eq!(en, DocumentLabels::default());
        assert_eq!(es.item, "Artículo");
        assert_eq!(es.csv_unit_price, "Precio unitario");
        assert_ne!(en.notes, es.notes);
    }

    #[test]
    fn test_percent_lines() {
        let es = DocumentLabels::spanish();
        assert_eq!(es.discount_line("15.0%"), "Descuento (15.0%):");
        assert_eq!(DocumentLabels::english().tax_line("21.0%"), "Tax (21.0%):");
    }
}
