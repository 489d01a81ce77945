//! Conversion arithmetic and rate-table formatting.

use crate::{
    domain::{CurrencyCode, RateSnapshot},
    errors::Error,
    Result,
};

/// Multiply `amount` by the snapshot rate for `to`.
///
/// Deterministic given (amount, snapshot); `CurrencyNotFound` when the
/// target is absent from the snapshot.
pub fn convert(amount: f64, snapshot: &RateSnapshot, to: &CurrencyCode) -> Result<f64> {
    snapshot
        .get(to)
        .map(|rate| amount * rate)
        .ok_or_else(|| Error::CurrencyNotFound(to.to_string()))
}

/// One line per currency, sorted lexicographically by code, rates to two
/// decimal places. Telegram HTML.
pub fn format_rates_table(snapshot: &RateSnapshot) -> String {
    let mut out = format!("💹 <b>Rates for {}:</b>\n", snapshot.base());
    for (code, rate) in snapshot.iter() {
        out.push_str(&format!("🔸 {code}: {rate:.2}\n"));
    }
    out
}
