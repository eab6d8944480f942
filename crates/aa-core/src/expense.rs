//! Price detection for expenses.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::intent::Intent;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([$€£₹])\s?([0-9]+[.,]?[0-9]*)").unwrap());

/// Finds the first currency amount and a best-effort merchant name.
pub fn detect_expense(text: &str) -> Option<Intent> {
    let caps = PRICE_RE.captures(text)?;
    let currency = &caps[1];

    let Some(amount) = parse_amount(&caps[2]) else {
        tracing::trace!(literal = &caps[2], "unparseable amount");
        return None;
    };

    let merchant = text
        .lines()
        .map(str::trim)
        .find(|line| {
            !line.is_empty()
                && !line.contains(currency)
                && !line.chars().any(|c| c.is_ascii_digit())
        })
        .map(String::from);

    tracing::debug!(%amount, currency, ?merchant, "expense detected");
    Some(Intent::SaveExpense {
        amount,
        currency: currency.to_string(),
        merchant,
    })
}

/// Parses `45.67`, `45,67` or `45.` as a decimal.
fn parse_amount(literal: &str) -> Option<Decimal> {
    let normalized = literal.replace(',', ".");
    Decimal::from_str(normalized.trim_end_matches('.')).ok()
}
