//! Remote draw source for the per-round lottery endpoint.
//!
//! The endpoint answers every round number with HTTP 200; rounds that have
//! not been drawn yet carry `"returnValue": "fail"` in the body instead.
//! The outcome type keeps that case separate from transient failures so the
//! store can log and (optionally) stop scanning on the first gap.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

use super::rate_limiter::RateLimiter;
use super::{draw_url, LOTTO_MAX, LOTTO_MIN};
use crate::types::Draw;

/// Result of querying a single round.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Well-formed draw payload.
    Success(Draw),
    /// The remote reports the round does not exist (yet).
    NotYetDrawn,
    /// Network error, bad status, or a malformed payload.
    Transient(String),
}

/// Source of per-round draw results.
#[async_trait]
pub trait DrawSource: Send + Sync {
    async fn fetch_draw(&self, round: u32) -> FetchOutcome;
}

#[async_trait]
impl<T: DrawSource> DrawSource for &T {
    async fn fetch_draw(&self, round: u32) -> FetchOutcome {
        (**self).fetch_draw(round).await
    }
}

/// Raw per-round payload as served by the endpoint.
#[derive(Debug, Deserialize)]
struct RawDrawRecord {
    #[serde(rename = "returnValue")]
    return_value: Option<String>,
    #[serde(rename = "drwNo")]
    round: Option<u32>,
    #[serde(rename = "drwNoDate")]
    date: Option<String>,
    #[serde(rename = "drwtNo1")]
    no1: Option<i64>,
    #[serde(rename = "drwtNo2")]
    no2: Option<i64>,
    #[serde(rename = "drwtNo3")]
    no3: Option<i64>,
    #[serde(rename = "drwtNo4")]
    no4: Option<i64>,
    #[serde(rename = "drwtNo5")]
    no5: Option<i64>,
    #[serde(rename = "drwtNo6")]
    no6: Option<i64>,
}

impl RawDrawRecord {
    /// Classify the payload. `fail` means the round is not drawn yet; a
    /// success payload missing or corrupting any field is transient.
    fn into_outcome(self) -> FetchOutcome {
        if self.return_value.as_deref() == Some("fail") {
            return FetchOutcome::NotYetDrawn;
        }

        let round = match self.round {
            Some(r) if r > 0 => r,
            _ => return FetchOutcome::Transient("missing or invalid drwNo".into()),
        };

        let date = match self.date.as_deref().map(str::parse::<NaiveDate>) {
            Some(Ok(d)) => d,
            _ => return FetchOutcome::Transient(format!("round {}: bad drwNoDate", round)),
        };

        let raw = [self.no1, self.no2, self.no3, self.no4, self.no5, self.no6];
        let mut numbers = [0u8; 6];
        for (slot, value) in numbers.iter_mut().zip(raw) {
            match value {
                Some(n) if (LOTTO_MIN as i64..=LOTTO_MAX as i64).contains(&n) => *slot = n as u8,
                _ => {
                    return FetchOutcome::Transient(format!(
                        "round {}: missing or out-of-range winning number",
                        round
                    ))
                }
            }
        }

        let draw = Draw {
            round,
            date,
            numbers,
        };
        if !draw.is_valid() {
            return FetchOutcome::Transient(format!("round {}: duplicate winning numbers", round));
        }
        FetchOutcome::Success(draw)
    }
}

/// Draw source backed by the public HTTP endpoint.
pub struct HttpDrawSource {
    client: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
}

impl HttpDrawSource {
    pub fn new(base_url: impl Into<String>, requests_per_minute: u32) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            limiter: RateLimiter::new(requests_per_minute),
        })
    }
}

#[async_trait]
impl DrawSource for HttpDrawSource {
    async fn fetch_draw(&self, round: u32) -> FetchOutcome {
        self.limiter.acquire().await;

        let url = draw_url(&self.base_url, round);
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => return FetchOutcome::Transient(format!("round {}: {}", round, e)),
        };

        if !response.status().is_success() {
            return FetchOutcome::Transient(format!(
                "round {}: HTTP {}",
                round,
                response.status()
            ));
        }

        match response.json::<RawDrawRecord>().await {
            Ok(raw) => raw.into_outcome(),
            Err(e) => FetchOutcome::Transient(format!("round {}: bad JSON: {}", round, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FetchOutcome {
        serde_json::from_str::<RawDrawRecord>(json)
            .map(RawDrawRecord::into_outcome)
            .unwrap_or_else(|e| FetchOutcome::Transient(e.to_string()))
    }

    #[test]
    fn test_success_payload() {
        let outcome = parse(
            r#"{"returnValue":"success","drwNo":1,"drwNoDate":"2002-12-07",
                "drwtNo1":10,"drwtNo2":23,"drwtNo3":29,"drwtNo4":33,"drwtNo5":37,"drwtNo6":40,
                "bnusNo":16,"totSellamnt":3681782000}"#,
        );
        match outcome {
            FetchOutcome::Success(draw) => {
                assert_eq!(draw.round, 1);
                assert_eq!(draw.numbers, [10, 23, 29, 33, 37, 40]);
                assert_eq!(draw.date.to_string(), "2002-12-07");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_fail_indicator_is_not_yet_drawn() {
        let outcome = parse(r#"{"returnValue":"fail"}"#);
        assert!(matches!(outcome, FetchOutcome::NotYetDrawn));
    }

    #[test]
    fn test_missing_number_field_produces_no_draw() {
        // drwtNo6 absent
        let outcome = parse(
            r#"{"returnValue":"success","drwNo":2,"drwNoDate":"2002-12-14",
                "drwtNo1":9,"drwtNo2":13,"drwtNo3":21,"drwtNo4":25,"drwtNo5":32}"#,
        );
        assert!(matches!(outcome, FetchOutcome::Transient(_)));
    }

    #[test]
    fn test_out_of_range_number_rejected() {
        let outcome = parse(
            r#"{"returnValue":"success","drwNo":3,"drwNoDate":"2002-12-21",
                "drwtNo1":0,"drwtNo2":13,"drwtNo3":21,"drwtNo4":25,"drwtNo5":32,"drwtNo6":46}"#,
        );
        assert!(matches!(outcome, FetchOutcome::Transient(_)));
    }

    #[test]
    fn test_bad_date_rejected() {
        let outcome = parse(
            r#"{"returnValue":"success","drwNo":4,"drwNoDate":"not-a-date",
                "drwtNo1":1,"drwtNo2":2,"drwtNo3":3,"drwtNo4":4,"drwtNo5":5,"drwtNo6":6}"#,
        );
        assert!(matches!(outcome, FetchOutcome::Transient(_)));
    }

    #[test]
    fn test_missing_round_rejected() {
        let outcome = parse(
            r#"{"returnValue":"success","drwNoDate":"2002-12-07",
                "drwtNo1":1,"drwtNo2":2,"drwtNo3":3,"drwtNo4":4,"drwtNo5":5,"drwtNo6":6}"#,
        );
        assert!(matches!(outcome, FetchOutcome::Transient(_)));
    }
}
