//! Cache-or-rebuild store for the draw history.
//!
//! `load` favors availability: every per-round failure is skipped, never
//! fatal, and a history (possibly empty) always comes back. The remote is
//! only touched when the cache artifact is absent or invalid.

use futures::{stream, StreamExt};
use tracing::{debug, info, warn};

use super::cache::HistoryCache;
use super::source::{DrawSource, FetchOutcome};
use crate::types::DrawHistory;

/// How to react to rounds the remote reports as not drawn yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Query every round up to the guess. Matches the original loader.
    FullScan,
    /// Stop scheduling rounds after the first batch containing a gap.
    /// Saves the tail of the scan once the not-yet-drawn region starts.
    StopAtFirstGap,
}

const DEFAULT_FAN_OUT: usize = 8;

/// Obtains the draw history from cache or by a per-round remote scan.
pub struct HistoricalDrawStore<S, C> {
    source: S,
    cache: C,
    fan_out: usize,
    policy: ScanPolicy,
}

impl<S: DrawSource, C: HistoryCache> HistoricalDrawStore<S, C> {
    pub fn new(source: S, cache: C) -> Self {
        Self {
            source,
            cache,
            fan_out: DEFAULT_FAN_OUT,
            policy: ScanPolicy::FullScan,
        }
    }

    /// Set the fetch fan-out. `1` reproduces a strictly sequential scan.
    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out.max(1);
        self
    }

    pub fn with_policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Return the cached history, or rebuild it by querying rounds
    /// `1..=max_round_guess` and persist the result best-effort.
    pub async fn load(&self, max_round_guess: u32) -> DrawHistory {
        if let Some(history) = self.cache.read() {
            debug!(draws = history.len(), "draw history served from cache");
            return history;
        }

        info!(max_round_guess, "cache miss, rebuilding draw history");
        let history = self.rebuild(max_round_guess).await;
        info!(draws = history.len(), "draw history rebuilt");

        // Persistence is best-effort: the next run just re-fetches.
        if let Err(e) = self.cache.write(&history) {
            warn!("failed to persist draw history: {}", e);
        }

        history
    }

    async fn rebuild(&self, max_round_guess: u32) -> DrawHistory {
        let mut draws = Vec::new();
        let rounds: Vec<u32> = (1..=max_round_guess).collect();

        for batch in rounds.chunks(self.fan_out) {
            let outcomes: Vec<(u32, FetchOutcome)> = stream::iter(batch.iter().copied())
                .map(|round| async move { (round, self.source.fetch_draw(round).await) })
                .buffer_unordered(self.fan_out)
                .collect()
                .await;

            let mut saw_gap = false;
            for (round, outcome) in outcomes {
                match outcome {
                    FetchOutcome::Success(draw) => draws.push(draw),
                    FetchOutcome::NotYetDrawn => {
                        debug!(round, "round not drawn yet, skipping");
                        saw_gap = true;
                    }
                    FetchOutcome::Transient(reason) => {
                        warn!("skipping round {}: {}", round, reason);
                    }
                }
            }

            if saw_gap && self.policy == ScanPolicy::StopAtFirstGap {
                debug!("gap reached, stopping scan");
                break;
            }
        }

        // Fan-out delivers out of order; the sort restores round order.
        DrawHistory::from_unordered(draws)
    }
}
