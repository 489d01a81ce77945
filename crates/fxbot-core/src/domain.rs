use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a delivered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Uppercase alphabetic currency token ("USD").
///
/// No canonical list is enforced here; the rate provider is the source of
/// truth, and an unknown code simply yields an empty lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Accepts 2-5 ASCII-alphabetic characters, normalized to uppercase.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if !(2..=5).contains(&token.len()) || !token.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(Self(token.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time exchange rates relative to `base`.
///
/// Rates are kept non-negative; iteration order is lexicographic by code.
#[derive(Clone, Debug)]
pub struct RateSnapshot {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
}

impl RateSnapshot {
    pub fn new(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: BTreeMap::new(),
        }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn insert(&mut self, code: CurrencyCode, rate: f64) {
        self.rates.insert(code, rate.max(0.0));
    }

    pub fn get(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, f64)> {
        self.rates.iter().map(|(code, rate)| (code, *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// One dated rate observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Dated rates for one currency pair over a trailing window, ascending by date.
#[derive(Clone, Debug)]
pub struct RateSeries {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    points: Vec<RatePoint>,
}

impl RateSeries {
    /// Builds a series from points in any order; sorts ascending by date and
    /// clamps rates to non-negative.
    pub fn from_unsorted(
        base: CurrencyCode,
        target: CurrencyCode,
        mut points: Vec<RatePoint>,
    ) -> Self {
        for p in &mut points {
            p.rate = p.rate.max(0.0);
        }
        points.sort_by_key(|p| p.date);
        Self {
            base,
            target,
            points,
        }
    }

    pub fn points(&self) -> &[RatePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A user-saved (from, to) currency shortcut.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FavoritePair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_code_normalizes_case() {
        assert_eq!(CurrencyCode::parse("usd").unwrap().as_str(), "USD");
        assert_eq!(CurrencyCode::parse(" eur ").unwrap().as_str(), "EUR");
    }

    #[test]
    fn currency_code_rejects_bad_tokens() {
        assert!(CurrencyCode::parse("U").is_none());
        assert!(CurrencyCode::parse("DOLLARS").is_none());
        assert!(CurrencyCode::parse("US1").is_none());
        assert!(CurrencyCode::parse("").is_none());
    }

    #[test]
    fn snapshot_clamps_negative_rates() {
        let mut snap = RateSnapshot::new(CurrencyCode::parse("USD").unwrap());
        snap.insert(CurrencyCode::parse("EUR").unwrap(), -0.5);
        assert_eq!(snap.get(&CurrencyCode::parse("EUR").unwrap()), Some(0.0));
    }

    #[test]
    fn series_sorts_ascending_by_date() {
        let d = |day| NaiveDate::from_ymd_opt(2026, 8, day).unwrap();
        let series = RateSeries::from_unsorted(
            CurrencyCode::parse("USD").unwrap(),
            CurrencyCode::parse("EUR").unwrap(),
            vec![
                RatePoint { date: d(3), rate: 0.93 },
                RatePoint { date: d(1), rate: 0.91 },
                RatePoint { date: d(2), rate: 0.92 },
            ],
        );
        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(1), d(2), d(3)]);
    }
}
