//! CLI commands for lotto-lab.
//!
//! Supports the API server mode plus offline history fetching, number
//! generation, frequency stats, and curve sampling.

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::lotto::generator::generate_sets;
use crate::lotto::stats::NumberFrequency;
use crate::lotto::{FileHistoryCache, HistoricalDrawStore, HttpDrawSource, ScanPolicy};
use crate::math::quadratic::QuadraticCurve;
use crate::math::rational::RationalCurve;
use crate::types::DrawHistory;

#[derive(Parser)]
#[command(name = "lotto-lab")]
#[command(version, about = "Lotto 6/45 history, weighted picks, and curve series", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Fetch the draw history into the cache artifact
    Fetch {
        /// Upper bound on the round scan
        #[arg(short, long)]
        max_round: Option<u32>,

        /// Cache artifact path override
        #[arg(short, long)]
        cache: Option<PathBuf>,

        /// Re-fetch even if a cache artifact exists
        #[arg(short, long)]
        force: bool,

        /// Stop scanning at the first not-yet-drawn round
        #[arg(long)]
        stop_at_gap: bool,
    },

    /// Generate weighted number sets from the cached history
    Generate {
        /// Number of sets to produce
        #[arg(short, long)]
        sets: Option<usize>,

        /// Blend between uniform (0.0) and historical frequency (1.0)
        #[arg(short, long)]
        weight_factor: Option<f64>,

        /// Count frequencies over the most recent N draws only
        #[arg(short, long)]
        recent: Option<usize>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the number frequency table from the cached history
    Stats {
        /// Show only the N most frequent numbers
        #[arg(short, long)]
        top: Option<usize>,

        /// Count frequencies over the most recent N draws only
        #[arg(short, long)]
        recent: Option<usize>,
    },

    /// Sample a teaching curve and print the series as JSON
    Curve {
        /// Which curve to sample
        #[arg(value_enum)]
        kind: CurveKind,

        #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
        a: f64,

        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        p: f64,

        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        q: f64,

        #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
        x_min: f64,

        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        x_max: f64,

        #[arg(long, default_value_t = 400)]
        points: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CurveKind {
    /// y = a(x - p)^2 + q
    Quadratic,
    /// y = a/(x - p) + q
    Rational,
}

/// Build the production store from config and load the history.
async fn load_history(
    config: &AppConfig,
    cache_override: Option<PathBuf>,
    max_round: Option<u32>,
    stop_at_gap: bool,
) -> anyhow::Result<DrawHistory> {
    let cache_path = cache_override
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| config.lotto.cache_path.clone());

    let source = HttpDrawSource::new(&config.lotto.api_url, config.lotto.requests_per_minute)?;
    let cache = FileHistoryCache::new(&cache_path);
    let policy = if stop_at_gap {
        ScanPolicy::StopAtFirstGap
    } else {
        ScanPolicy::FullScan
    };
    let store = HistoricalDrawStore::new(source, cache)
        .with_fan_out(config.lotto.fetch_concurrency)
        .with_policy(policy);

    Ok(store
        .load(max_round.unwrap_or(config.lotto.max_round_guess))
        .await)
}

/// Rebuild or verify the cache artifact.
pub async fn run_fetch(
    max_round: Option<u32>,
    cache: Option<PathBuf>,
    force: bool,
    stop_at_gap: bool,
) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let cache_path = cache
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.lotto.cache_path));
    if force && cache_path.exists() {
        eprintln!("Removing existing cache: {}", cache_path.display());
        std::fs::remove_file(&cache_path)?;
    }

    eprintln!(
        "Loading draw history (max round {})...",
        max_round.unwrap_or(config.lotto.max_round_guess)
    );
    let history = load_history(&config, cache, max_round, stop_at_gap).await?;

    eprintln!("Loaded {} draws", history.len());
    if let Some(latest) = history.latest_round() {
        eprintln!("Latest round: {}", latest);
    }
    println!("{}", cache_path.display());

    Ok(())
}

/// Generate weighted number sets.
pub async fn run_generate(
    sets: Option<usize>,
    weight_factor: Option<f64>,
    recent: Option<usize>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let history = load_history(&config, None, None, false).await?;
    eprintln!("History: {} draws", history.len());
    if history.is_empty() {
        eprintln!("Warning: empty history, picks fall back to uniform weights");
    }

    let sets = sets.unwrap_or(config.generator.sets);
    let weight_factor = weight_factor.unwrap_or(config.generator.weight_factor);
    let recent = recent.or(config.generator.recent_window);

    let picked = match seed {
        Some(s) => generate_sets(
            history.draws(),
            sets,
            weight_factor,
            recent,
            &mut StdRng::seed_from_u64(s),
        )?,
        None => generate_sets(
            history.draws(),
            sets,
            weight_factor,
            recent,
            &mut thread_rng(),
        )?,
    };

    for (i, set) in picked.iter().enumerate() {
        let formatted: Vec<String> = set.iter().map(|n| format!("{:2}", n)).collect();
        println!("Set {}: {}", i + 1, formatted.join(" "));
    }

    Ok(())
}

/// Print the frequency table.
pub async fn run_stats(top: Option<usize>, recent: Option<usize>) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let history = load_history(&config, None, None, false).await?;
    let frequency = match recent {
        Some(w) => NumberFrequency::from_recent(history.draws(), w),
        None => NumberFrequency::from_draws(history.draws()),
    };

    eprintln!("Draws counted: {}", frequency.draws_counted());

    let mut rows: Vec<(u8, u32)> = (1..=crate::lotto::LOTTO_MAX)
        .map(|n| (n, frequency.count_of(n)))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    if let Some(n) = top {
        rows.truncate(n);
    }

    println!("{:>6} {:>6}", "number", "count");
    for (number, count) in rows {
        println!("{:>6} {:>6}", number, count);
    }

    Ok(())
}

/// Sample a curve and print the series as JSON.
pub async fn run_curve(
    kind: CurveKind,
    a: f64,
    p: f64,
    q: f64,
    x_min: f64,
    x_max: f64,
    points: usize,
) -> anyhow::Result<()> {
    anyhow::ensure!(x_min < x_max, "x_min must be less than x_max");
    anyhow::ensure!(points > 0, "points must be positive");

    let json = match kind {
        CurveKind::Quadratic => {
            let series = QuadraticCurve::new(a, p, q).sample(x_min, x_max, points);
            serde_json::to_string_pretty(&series)?
        }
        CurveKind::Rational => {
            anyhow::ensure!(a != 0.0, "a must be nonzero for the rational curve");
            let series = RationalCurve::new(a, p, q).sample(x_min, x_max, points);
            serde_json::to_string_pretty(&series)?
        }
    };

    println!("{}", json);
    Ok(())
}
