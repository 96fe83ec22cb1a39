//! Property tests for the totals engine and the money formatter.

use chrono::NaiveDate;
use proptest::prelude::*;
use quotekit_core::{
    compute_totals, format_money, format_money_f64, line_amount, CurrencyFormat, DecimalStyle,
    LineItem, Money, Percent, Quote, QuoteHeader, QuoteSnapshot,
};
use rust_decimal::Decimal;

fn header(discount: Decimal, tax: Decimal) -> QuoteHeader {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let mut header = QuoteHeader::new("Mamba Shop", "101", "Milena", day, day);
    header.discount_pct = Percent::new(discount).unwrap();
    header.tax_pct = Percent::new(tax).unwrap();
    header
}

/// Prices up to 1,000,000.00 with cent precision.
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Percentages in half-percent steps, like the form's number input.
fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..=200).prop_map(|halves| Decimal::new(halves * 5, 1))
}

fn item() -> impl Strategy<Value = LineItem> {
    ("[a-zA-Z ]{0,12}", 0u32..1000, price())
        .prop_map(|(desc, qty, p)| LineItem::new(desc, qty, Money::new(p)))
}

proptest! {
    #[test]
    fn line_amount_is_exact_product(qty in 0u32..100_000, p in price()) {
        let item = LineItem::new("x", qty, Money::new(p));
        prop_assert_eq!(line_amount(&item).amount(), p * Decimal::from(qty));
    }

    #[test]
    fn subtotal_is_order_independent(items in prop::collection::vec(item(), 0..20)) {
        let h = header(Decimal::ZERO, Decimal::ZERO);
        let forward = compute_totals(&h, &items);

        let mut reversed = items.clone();
        reversed.reverse();
        let backward = compute_totals(&h, &reversed);

        let sum: Money = items.iter().map(line_amount).sum();
        prop_assert_eq!(forward.subtotal, sum);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn total_matches_closed_form(
        items in prop::collection::vec(item(), 0..10),
        d in percent(),
        t in percent(),
    ) {
        let totals = compute_totals(&header(d, t), &items);
        let hundred = Decimal::ONE_HUNDRED;
        let s = totals.subtotal.amount();

        let expected = s * (hundred - d) / hundred * (hundred + t) / hundred;
        let diff = (totals.total.amount() - expected).abs();
        prop_assert!(diff < Decimal::new(1, 12), "diff {} too large", diff);

        prop_assert_eq!(totals.taxable_base, totals.subtotal - totals.discount_amount);
        prop_assert_eq!(totals.total, totals.taxable_base + totals.tax_amount);
    }

    #[test]
    fn compute_totals_is_idempotent(items in prop::collection::vec(item(), 0..10), d in percent(), t in percent()) {
        let h = header(d, t);
        prop_assert_eq!(compute_totals(&h, &items), compute_totals(&h, &items));
    }

    #[test]
    fn format_money_always_has_two_decimals(mantissa in any::<i64>(), scale in 0u32..10) {
        let amount = Money::new(Decimal::new(mantissa, scale));
        for format in [
            CurrencyFormat::new("$", DecimalStyle::Point),
            CurrencyFormat::new("ARS", DecimalStyle::Comma),
        ] {
            let text = format_money(amount, &format);
            let (_, fraction) = text.rsplit_once(format.style.decimal_separator()).unwrap();
            prop_assert_eq!(fraction.len(), 2);
            prop_assert!(fraction.bytes().all(|b| b.is_ascii_digit()));
            prop_assert!(text.starts_with(&format.symbol));
        }
    }

    #[test]
    fn format_money_f64_never_panics(value in any::<f64>()) {
        let format = CurrencyFormat::default();
        let text = format_money_f64(value, &format);
        prop_assert!(text.starts_with("ARS "));
    }

    #[test]
    fn snapshot_json_round_trip(items in prop::collection::vec(item(), 0..10), d in percent(), t in percent()) {
        let mut quote = Quote::new(header(d, t));
        quote.items = items;
        let snapshot = QuoteSnapshot::capture(&quote);

        let back = QuoteSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        prop_assert_eq!(back, snapshot);
    }
}

#[test]
fn mamba_shop_end_to_end() {
    let mut quote = Quote::new(header(Decimal::from(15), Decimal::ZERO));
    quote.items = vec![
        LineItem::new("Mug", 1, Money::new(Decimal::new(189990, 1))),
        LineItem::new("Tumbler", 1, Money::new(Decimal::new(139990, 1))),
    ];

    let totals = quote.totals();
    let ars = CurrencyFormat::default();

    assert_eq!(format_money(totals.subtotal, &ars), "ARS 32.998,00");
    assert_eq!(format_money(totals.discount_amount, &ars), "ARS 4.949,70");
    assert_eq!(format_money(totals.taxable_base, &ars), "ARS 28.048,30");
    assert_eq!(format_money(totals.tax_amount, &ars), "ARS 0,00");
    assert_eq!(format_money(totals.total, &ars), "ARS 28.048,30");
}
