use async_trait::async_trait;

use chrono::NaiveDate;

use crate::{
    domain::{CurrencyCode, RateSeries, RateSnapshot},
    Result,
};

/// Rate-source port. The FreeCurrencyAPI adapter is the first
/// implementation; tests use in-memory fakes.
///
/// Implementations return `Error::Provider` on transport failures, non-2xx
/// statuses, and malformed payloads; they never panic and never retry.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Latest rates relative to `base`.
    async fn latest(&self, base: &CurrencyCode) -> Result<RateSnapshot>;

    /// Dated rates for `target` relative to `base` over `[from, to]`,
    /// ascending by date.
    async fn historical(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RateSeries>;
}
