//! Domain and API types for lotto-lab.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lotto::{LOTTO_MAX, LOTTO_PICK};

/// One historical lottery result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub round: u32,
    pub date: NaiveDate,
    pub numbers: [u8; LOTTO_PICK],
}

impl Draw {
    /// Check structural validity: positive round, all numbers in range,
    /// no duplicate numbers within the draw.
    pub fn is_valid(&self) -> bool {
        if self.round == 0 {
            return false;
        }
        if self.numbers.iter().any(|&n| n < 1 || n > LOTTO_MAX) {
            return false;
        }
        let mut seen = [false; LOTTO_MAX as usize + 1];
        for &n in &self.numbers {
            if seen[n as usize] {
                return false;
            }
            seen[n as usize] = true;
        }
        true
    }
}

/// Ordered collection of draws: ascending by round, no duplicate rounds.
///
/// Serializes as a bare JSON array, which is exactly the cache artifact
/// format (`[{"round":..,"date":"..","numbers":[..]}, ...]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawHistory(Vec<Draw>);

impl DrawHistory {
    /// Build a history from draws in any order: sorts ascending by round
    /// and drops later duplicates of the same round.
    pub fn from_unordered(mut draws: Vec<Draw>) -> Self {
        draws.sort_by_key(|d| d.round);
        draws.dedup_by_key(|d| d.round);
        Self(draws)
    }

    /// Check the stored invariant: every draw valid, rounds strictly
    /// increasing. Used to reject corrupt cache artifacts.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(Draw::is_valid) && self.0.windows(2).all(|w| w[0].round < w[1].round)
    }

    pub fn draws(&self) -> &[Draw] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Round number of the most recent draw, if any.
    pub fn latest_round(&self) -> Option<u32> {
        self.0.last().map(|d| d.round)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Draw history response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_round: Option<u32>,
    pub draws: Vec<Draw>,
}

/// Per-number frequency entry in the stats response.
#[derive(Debug, Serialize)]
pub struct NumberCount {
    pub number: u8,
    pub count: u32,
}

/// Frequency statistics response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub draws_counted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_window: Option<usize>,
    pub counts: Vec<NumberCount>,
}

/// Weighted generation request.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// How many sets to produce.
    #[serde(default)]
    pub sets: Option<usize>,
    /// Blend between uniform (0.0) and historical frequency (1.0).
    #[serde(default)]
    pub weight_factor: Option<f64>,
    /// Restrict frequency counting to the most recent N draws.
    #[serde(default)]
    pub recent_window: Option<usize>,
}

/// Weighted generation response.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub sets: Vec<[u8; LOTTO_PICK]>,
    pub weight_factor: f64,
    pub draws_counted: usize,
}

/// Curve sampling request shared by both teaching curves.
#[derive(Debug, Clone, Deserialize)]
pub struct CurveRequest {
    pub a: f64,
    pub p: f64,
    pub q: f64,
    #[serde(default = "default_x_min")]
    pub x_min: f64,
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_x_min() -> f64 {
    -10.0
}

fn default_x_max() -> f64 {
    10.0
}

fn default_points() -> usize {
    400
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(round: u32, numbers: [u8; 6]) -> Draw {
        Draw {
            round,
            date: NaiveDate::from_ymd_opt(2002, 12, 7).unwrap(),
            numbers,
        }
    }

    #[test]
    fn test_draw_validity() {
        assert!(draw(1, [10, 23, 29, 33, 37, 40]).is_valid());
        // Out of range
        assert!(!draw(1, [0, 23, 29, 33, 37, 40]).is_valid());
        assert!(!draw(1, [10, 23, 29, 33, 37, 46]).is_valid());
        // Duplicate number
        assert!(!draw(1, [10, 10, 29, 33, 37, 40]).is_valid());
        // Round zero
        assert!(!draw(0, [10, 23, 29, 33, 37, 40]).is_valid());
    }

    #[test]
    fn test_from_unordered_sorts_and_dedups() {
        let history = DrawHistory::from_unordered(vec![
            draw(3, [1, 2, 3, 4, 5, 6]),
            draw(1, [10, 23, 29, 33, 37, 40]),
            draw(3, [7, 8, 9, 10, 11, 12]),
            draw(2, [2, 4, 6, 8, 10, 12]),
        ]);

        let rounds: Vec<u32> = history.draws().iter().map(|d| d.round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);
        assert_eq!(history.latest_round(), Some(3));
        assert!(history.is_valid());
    }

    #[test]
    fn test_out_of_order_history_rejected() {
        let json = r#"[
            {"round":2,"date":"2002-12-14","numbers":[1,2,3,4,5,6]},
            {"round":1,"date":"2002-12-07","numbers":[10,23,29,33,37,40]}
        ]"#;
        let history: DrawHistory = serde_json::from_str(json).unwrap();
        assert!(!history.is_valid());
    }

    #[test]
    fn test_cache_artifact_encoding() {
        let json = r#"[{"round":1,"date":"2002-12-07","numbers":[10,23,29,33,37,40]}]"#;
        let history: DrawHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.draws()[0].round, 1);
        assert_eq!(history.draws()[0].numbers, [10, 23, 29, 33, 37, 40]);

        let encoded = serde_json::to_string(&history).unwrap();
        let reparsed: DrawHistory = serde_json::from_str(&encoded).unwrap();
        assert_eq!(history, reparsed);
    }
}
