//! FreeCurrencyAPI adapter.
//!
//! Implements the core `RateProvider` port over the provider's `latest` and
//! `historical` endpoints. Decoding is split from transport so payload
//! handling unit-tests without a network.

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use fxbot_core::{
    domain::{CurrencyCode, RatePoint, RateSeries, RateSnapshot},
    errors::Error,
    ports::RateProvider,
    Result,
};

#[derive(Clone, Debug)]
pub struct FreeCurrencyApi {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl FreeCurrencyApi {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Provider(format!("http client build: {e}")))?;
        Ok(Self {
            base_url,
            api_key,
            http,
        })
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
        let url = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        let resp = self
            .http
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                %status,
                body = %body.chars().take(200).collect::<String>(),
                "rate provider returned an error"
            );
            return Err(Error::Provider(format!("provider status {status}")));
        }

        resp.json()
            .await
            .map_err(|e| Error::Provider(format!("undecodable payload: {e}")))
    }
}

#[async_trait]
impl RateProvider for FreeCurrencyApi {
    async fn latest(&self, base: &CurrencyCode) -> Result<RateSnapshot> {
        let payload = self
            .get_json("latest", &[("base_currency", base.to_string())])
            .await?;
        decode_latest(payload, base)
    }

    async fn historical(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RateSeries> {
        let payload = self
            .get_json(
                "historical",
                &[
                    ("base_currency", base.to_string()),
                    ("date_from", from.format("%Y-%m-%d").to_string()),
                    ("date_to", to.format("%Y-%m-%d").to_string()),
                ],
            )
            .await?;
        decode_historical(payload, base, target)
    }
}

#[derive(Deserialize)]
struct LatestPayload {
    data: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
struct HistoricalPayload {
    data: BTreeMap<String, BTreeMap<String, f64>>,
}

/// `{ "data": { CODE: rate, ... } }` relative to `base`. A missing or
/// malformed `data` field is a provider error.
pub fn decode_latest(payload: serde_json::Value, base: &CurrencyCode) -> Result<RateSnapshot> {
    let parsed: LatestPayload = serde_json::from_value(payload)
        .map_err(|e| Error::Provider(format!("missing or malformed data field: {e}")))?;

    let mut snapshot = RateSnapshot::new(base.clone());
    for (code, rate) in parsed.data {
        let Some(code) = CurrencyCode::parse(&code) else {
            tracing::warn!(%code, "skipping non-currency key in latest payload");
            continue;
        };
        snapshot.insert(code, rate);
    }
    Ok(snapshot)
}

/// `{ "data": { "YYYY-MM-DD": { CODE: rate, ... }, ... } }`. Points come out
/// ascending by date whatever order the provider used. A date that lacks
/// `target` contributes rate 0 (provider data gap; logged so the chart
/// distortion is visible server-side).
pub fn decode_historical(
    payload: serde_json::Value,
    base: &CurrencyCode,
    target: &CurrencyCode,
) -> Result<RateSeries> {
    let parsed: HistoricalPayload = serde_json::from_value(payload)
        .map_err(|e| Error::Provider(format!("missing or malformed data field: {e}")))?;

    let mut points = Vec::with_capacity(parsed.data.len());
    for (date, rates) in parsed.data {
        let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
            tracing::warn!(%date, "skipping unparseable date in historical payload");
            continue;
        };
        let rate = match rates.get(target.as_str()) {
            Some(rate) => *rate,
            None => {
                tracing::warn!(%date, %target, "provider gap, charting rate as 0");
                0.0
            }
        };
        points.push(RatePoint { date, rate });
    }

    Ok(RateSeries::from_unsorted(
        base.clone(),
        target.clone(),
        points,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn decodes_latest_payload() {
        let payload = json!({ "data": { "EUR": 0.92, "GBP": 0.79 } });
        let snap = decode_latest(payload, &code("USD")).unwrap();
        assert_eq!(snap.get(&code("EUR")), Some(0.92));
        assert_eq!(snap.get(&code("GBP")), Some(0.79));
        assert_eq!(snap.len(), 2);
    }

    #[test]
    fn latest_without_data_field_is_a_provider_error() {
        for payload in [json!({}), json!({ "message": "invalid key" }), json!(null)] {
            assert!(matches!(
                decode_latest(payload, &code("USD")),
                Err(Error::Provider(_))
            ));
        }
    }

    #[test]
    fn latest_with_non_numeric_rates_is_a_provider_error() {
        let payload = json!({ "data": { "EUR": "0.92" } });
        assert!(matches!(
            decode_latest(payload, &code("USD")),
            Err(Error::Provider(_))
        ));
    }

    #[test]
    fn historical_sorts_dates_ascending() {
        let payload = json!({
            "data": {
                "2026-08-03": { "EUR": 0.93 },
                "2026-08-01": { "EUR": 0.91 },
                "2026-08-02": { "EUR": 0.92 },
            }
        });
        let series = decode_historical(payload, &code("USD"), &code("EUR")).unwrap();
        let rates: Vec<f64> = series.points().iter().map(|p| p.rate).collect();
        assert_eq!(rates, vec![0.91, 0.92, 0.93]);
    }

    #[test]
    fn historical_gap_becomes_zero_rate() {
        let payload = json!({
            "data": {
                "2026-08-01": { "EUR": 0.91 },
                "2026-08-02": { "GBP": 0.79 },
            }
        });
        let series = decode_historical(payload, &code("USD"), &code("EUR")).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].rate, 0.0);
    }

    #[test]
    fn historical_without_data_field_is_a_provider_error() {
        assert!(matches!(
            decode_historical(json!({ "oops": true }), &code("USD"), &code("EUR")),
            Err(Error::Provider(_))
        ));
    }

    #[test]
    fn historical_skips_unparseable_dates() {
        let payload = json!({
            "data": {
                "not-a-date": { "EUR": 0.5 },
                "2026-08-01": { "EUR": 0.91 },
            }
        });
        let series = decode_historical(payload, &code("USD"), &code("EUR")).unwrap();
        assert_eq!(series.len(), 1);
    }
}
