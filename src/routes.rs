//! API route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rand::thread_rng;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::lotto::generator::generate_sets;
use crate::lotto::stats::NumberFrequency;
use crate::math::quadratic::{QuadraticCurve, QuadraticSeries};
use crate::math::rational::{RationalCurve, RationalSeries};
use crate::types::{
    CurveRequest, DrawHistory, ErrorResponse, GenerateRequest, GenerateResponse, HealthResponse,
    HistoryResponse, NumberCount, StatsResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub history: DrawHistory,
    pub config: AppConfig,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full draw history endpoint.
pub async fn history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        count: state.history.len(),
        latest_round: state.history.latest_round(),
        draws: state.history.draws().to_vec(),
    })
}

/// Number frequency endpoint.
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let window = state.config.generator.recent_window;
    let frequency = match window {
        Some(w) => NumberFrequency::from_recent(state.history.draws(), w),
        None => NumberFrequency::from_draws(state.history.draws()),
    };

    Json(StatsResponse {
        draws_counted: frequency.draws_counted(),
        recent_window: window,
        counts: frequency
            .counts()
            .iter()
            .enumerate()
            .map(|(i, &count)| NumberCount {
                number: i as u8 + 1,
                count,
            })
            .collect(),
    })
}

/// Weighted set generation endpoint.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let defaults = &state.config.generator;
    let sets = req.sets.unwrap_or(defaults.sets);
    let weight_factor = req.weight_factor.unwrap_or(defaults.weight_factor);
    let recent_window = req.recent_window.or(defaults.recent_window);

    if sets == 0 || sets > 100 {
        return Err(ApiError::bad_request("sets must be between 1 and 100"));
    }
    if !(0.0..=1.0).contains(&weight_factor) {
        return Err(ApiError::bad_request(
            "weight_factor must be between 0.0 and 1.0",
        ));
    }

    let picked = generate_sets(
        state.history.draws(),
        sets,
        weight_factor,
        recent_window,
        &mut thread_rng(),
    )
    .map_err(|e| ApiError::internal(format!("generation failed: {}", e)))?;

    Ok(Json(GenerateResponse {
        sets: picked,
        weight_factor,
        draws_counted: match recent_window {
            Some(w) => state.history.len().min(w),
            None => state.history.len(),
        },
    }))
}

fn validate_curve(req: &CurveRequest) -> Result<(), ApiError> {
    if req.points == 0 || req.points > 100_000 {
        return Err(ApiError::bad_request("points must be between 1 and 100000"));
    }
    if req.x_min >= req.x_max {
        return Err(ApiError::bad_request("x_min must be less than x_max"));
    }
    Ok(())
}

/// Quadratic curve series endpoint.
pub async fn curve_quadratic(
    Json(req): Json<CurveRequest>,
) -> Result<Json<QuadraticSeries>, ApiError> {
    validate_curve(&req)?;
    let curve = QuadraticCurve::new(req.a, req.p, req.q);
    Ok(Json(curve.sample(req.x_min, req.x_max, req.points)))
}

/// Rational curve series endpoint.
pub async fn curve_rational(
    Json(req): Json<CurveRequest>,
) -> Result<Json<RationalSeries>, ApiError> {
    validate_curve(&req)?;
    if req.a == 0.0 {
        return Err(ApiError::bad_request("a must be nonzero"));
    }
    let curve = RationalCurve::new(req.a, req.p, req.q);
    Ok(Json(curve.sample(req.x_min, req.x_max, req.points)))
}
