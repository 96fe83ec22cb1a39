//! Quote editing commands.
//!
//! Each command is `load → apply → save`. Positions on the command line are
//! 1-based like the rows of the printed table; actions use 0-based indexes.

use std::path::Path;

use chrono::NaiveDate;
use clap::Args;
use quotekit_core::validation::{validate_dates, validate_percent, validate_quote_number};
use quotekit_core::{format_money, LineItem, LineItemInput, Quote, QuoteAction, Theme};
use quotekit_render::DocumentLabels;
use rust_decimal::Decimal;

use crate::error::{CliError, CliResult};
use crate::store;

// =============================================================================
// Arguments
// =============================================================================

/// Header fields; only the given ones change.
#[derive(Debug, Default, Clone, Args)]
pub struct SetArgs {
    #[arg(long)]
    pub issuer: Option<String>,

    #[arg(long)]
    pub number: Option<String>,

    #[arg(long)]
    pub client: Option<String>,

    /// Issue date, YYYY-MM-DD.
    #[arg(long, value_name = "DATE")]
    pub issue_date: Option<NaiveDate>,

    /// Due date, YYYY-MM-DD.
    #[arg(long, value_name = "DATE")]
    pub due_date: Option<NaiveDate>,

    #[arg(long)]
    pub payment_terms: Option<String>,

    /// Discount percentage, 0 to 100.
    #[arg(long, value_name = "PERCENT")]
    pub discount: Option<Decimal>,

    /// Tax percentage, 0 to 100.
    #[arg(long, value_name = "PERCENT")]
    pub tax: Option<Decimal>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub terms: Option<String>,
}

impl SetArgs {
    /// Validates the arguments and turns them into actions, in field order.
    pub fn into_actions(self) -> CliResult<Vec<QuoteAction>> {
        let mut actions = Vec::new();

        if let Some(issuer) = self.issuer {
            actions.push(QuoteAction::SetIssuer(issuer));
        }
        if let Some(number) = self.number {
            validate_quote_number(&number)?;
            actions.push(QuoteAction::SetNumber(number.trim().to_string()));
        }
        if let Some(client) = self.client {
            actions.push(QuoteAction::SetClient(client));
        }
        if let Some(date) = self.issue_date {
            actions.push(QuoteAction::SetIssueDate(date));
        }
        if let Some(date) = self.due_date {
            actions.push(QuoteAction::SetDueDate(date));
        }
        if let Some(terms) = self.payment_terms {
            actions.push(QuoteAction::SetPaymentTerms(terms));
        }
        if let Some(raw) = self.discount {
            let pct = validate_percent("discount", raw)?;
            actions.push(QuoteAction::SetDiscount(pct.value()));
        }
        if let Some(raw) = self.tax {
            let pct = validate_percent("tax", raw)?;
            actions.push(QuoteAction::SetTax(pct.value()));
        }
        if let Some(notes) = self.notes {
            actions.push(QuoteAction::SetNotes(unescape_newlines(&notes)));
        }
        if let Some(terms) = self.terms {
            actions.push(QuoteAction::SetTerms(unescape_newlines(&terms)));
        }

        Ok(actions)
    }
}

/// A new line item.
#[derive(Debug, Clone, Args)]
pub struct NewItemArgs {
    #[arg(short, long)]
    pub description: String,

    /// Whole units; fractions are dropped, negatives count as 0.
    #[arg(short, long, allow_negative_numbers = true)]
    pub quantity: Option<Decimal>,

    /// Unit price; negatives count as 0.
    #[arg(short, long, allow_negative_numbers = true)]
    pub price: Option<Decimal>,
}

/// Changes to an existing line item; omitted fields keep their value.
#[derive(Debug, Default, Clone, Args)]
pub struct ItemArgs {
    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub quantity: Option<Decimal>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub price: Option<Decimal>,
}

impl ItemArgs {
    fn merge_into(self, current: &LineItem) -> LineItemInput {
        LineItemInput {
            description: self.description.unwrap_or_else(|| current.description.clone()),
            quantity: self.quantity.or_else(|| current.quantity.map(Decimal::from)),
            unit_price: self.price.or_else(|| current.unit_price.map(|p| p.amount())),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Creates a quote file holding the sample quote.
pub fn create(path: &Path, today: NaiveDate, force: bool) -> CliResult<Quote> {
    if path.exists() && !force {
        return Err(CliError::input(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let quote = Quote::sample(today);
    store::save(path, &quote)?;
    tracing::info!(path = %path.display(), "Created quote");
    Ok(quote)
}

/// Applies header edits.
pub fn set(path: &Path, args: SetArgs) -> CliResult<Quote> {
    let actions = args.into_actions()?;
    if actions.is_empty() {
        return Err(CliError::input("nothing to change; pass at least one field"));
    }

    let mut quote = store::load(path)?;
    for action in actions {
        quote = quote.apply(action)?;
    }
    validate_dates(quote.header.issue_date, quote.header.due_date)?;

    store::save(path, &quote)?;
    Ok(quote)
}

pub fn add_item(path: &Path, item: NewItemArgs) -> CliResult<Quote> {
    let input = LineItemInput {
        description: item.description,
        quantity: item.quantity,
        unit_price: item.price,
    };
    update(path, QuoteAction::AddItem(input))
}

pub fn update_item(path: &Path, position: usize, item: ItemArgs) -> CliResult<Quote> {
    let index = index_of(position)?;
    let quote = store::load(path)?;
    let len = quote.item_count();
    let current = quote
        .items
        .get(index)
        .ok_or(quotekit_core::CoreError::ItemNotFound { index, len })?;

    let input = item.merge_into(current);
    apply_and_save(path, quote, QuoteAction::UpdateItem { index, input })
}

pub fn remove_item(path: &Path, position: usize) -> CliResult<Quote> {
    let index = index_of(position)?;
    update(path, QuoteAction::RemoveItem { index })
}

pub fn clear_items(path: &Path) -> CliResult<Quote> {
    update(path, QuoteAction::ClearItems)
}

fn update(path: &Path, action: QuoteAction) -> CliResult<Quote> {
    let quote = store::load(path)?;
    apply_and_save(path, quote, action)
}

fn apply_and_save(path: &Path, quote: Quote, action: QuoteAction) -> CliResult<Quote> {
    tracing::debug!(?action, "Applying action");
    let quote = quote.apply(action)?;
    store::save(path, &quote)?;
    Ok(quote)
}

fn index_of(position: usize) -> CliResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| CliError::input("item positions start at 1"))
}

/// `--notes "line one\nline two"` on a shell arrives with a literal `\n`.
fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

// =============================================================================
// Show
// =============================================================================

/// Human-readable summary: header, items and totals.
pub fn summary(quote: &Quote, theme: &Theme, labels: &DocumentLabels) -> String {
    let snapshot = quote.snapshot();
    let header = &snapshot.header;
    let money = |amount| format_money(amount, &theme.currency);
    let mut out = String::new();

    out.push_str(&format!("{} {}    {}\n", labels.quote_heading, header.number, header.issuer));
    out.push_str(&format!("{} {}\n", labels.prepared_for, header.client));
    out.push_str(&format!(
        "{} {}    {} {}\n",
        labels.issue_date,
        header.issue_date.format("%d/%m/%Y"),
        labels.due_date,
        header.due_date.format("%d/%m/%Y"),
    ));
    out.push_str(&format!("{} {}\n\n", labels.payment_terms, header.payment_terms));

    out.push_str(&format!(
        "{:>3}  {:<40} {:>8} {:>18} {:>18}\n",
        "#", labels.item, labels.quantity, labels.price, labels.amount
    ));
    for line in &snapshot.items {
        out.push_str(&format!(
            "{:>3}  {:<40} {:>8} {:>18} {:>18}\n",
            line.position,
            line.description,
            line.quantity,
            money(line.unit_price),
            money(line.amount),
        ));
    }
    if snapshot.items.is_empty() {
        out.push_str("     (no items)\n");
    }

    let totals = &snapshot.totals;
    let rows = [
        (labels.subtotal.clone(), money(totals.subtotal)),
        (labels.discount_line(header.discount_pct), money(totals.discount_amount)),
        (labels.tax_line(header.tax_pct), money(totals.tax_amount)),
        (labels.total.clone(), money(totals.total)),
    ];
    out.push('\n');
    for (label, value) in rows {
        out.push_str(&format!("{:<24}{:>18}\n", label, value));
    }

    out
}
