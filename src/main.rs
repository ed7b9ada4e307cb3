//! lotto-lab
//!
//! Lotto 6/45 draw history service: cached remote fetching, frequency
//! statistics, weighted number generation, and math-curve series, exposed
//! over both a CLI and a REST API.

mod cli;
mod config;
mod lotto;
mod math;
mod routes;
mod types;

use axum::{routing::get, routing::post, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::lotto::{FileHistoryCache, HistoricalDrawStore, HttpDrawSource};
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_server(Some(host), Some(port)).await,
        Commands::Fetch {
            max_round,
            cache,
            force,
            stop_at_gap,
        } => cli::run_fetch(max_round, cache, force, stop_at_gap).await,
        Commands::Generate {
            sets,
            weight_factor,
            recent,
            seed,
        } => cli::run_generate(sets, weight_factor, recent, seed).await,
        Commands::Stats { top, recent } => cli::run_stats(top, recent).await,
        Commands::Curve {
            kind,
            a,
            p,
            q,
            x_min,
            x_max,
            points,
        } => cli::run_curve(kind, a, p, q, x_min, x_max, points).await,
    }
}

/// Run the API server.
async fn run_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lotto_lab=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Cache artifact: {}", config.lotto.cache_path);

    // Load the draw history (cache hit is instant; a miss scans the remote)
    tracing::info!("Loading draw history...");
    let source = HttpDrawSource::new(&config.lotto.api_url, config.lotto.requests_per_minute)?;
    let cache = FileHistoryCache::new(&config.lotto.cache_path);
    let store =
        HistoricalDrawStore::new(source, cache).with_fan_out(config.lotto.fetch_concurrency);
    let history = store.load(config.lotto.max_round_guess).await;
    tracing::info!("Draw history ready: {} draws", history.len());

    // Create application state
    let state = Arc::new(AppState {
        history,
        config: config.clone(),
    });

    // Build router
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/history", get(routes::history))
        .route("/stats", get(routes::stats))
        .route("/generate", post(routes::generate))
        .route("/curve/quadratic", post(routes::curve_quadratic))
        .route("/curve/rational", post(routes::curve_rational))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
