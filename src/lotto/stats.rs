//! Per-number frequency statistics over a draw history.

use crate::types::Draw;

use super::LOTTO_MAX;

/// Appearance counts for every drawable number.
#[derive(Debug, Clone)]
pub struct NumberFrequency {
    counts: [u32; LOTTO_MAX as usize],
    draws_counted: usize,
}

impl NumberFrequency {
    /// Count appearances over the whole history.
    pub fn from_draws(draws: &[Draw]) -> Self {
        Self::count(draws)
    }

    /// Count appearances over the most recent `window` draws only.
    /// A window larger than the history degrades to the full count.
    pub fn from_recent(draws: &[Draw], window: usize) -> Self {
        let start = draws.len().saturating_sub(window);
        Self::count(&draws[start..])
    }

    fn count(draws: &[Draw]) -> Self {
        let mut counts = [0u32; LOTTO_MAX as usize];
        for draw in draws {
            for &n in &draw.numbers {
                counts[n as usize - 1] += 1;
            }
        }
        Self {
            counts,
            draws_counted: draws.len(),
        }
    }

    /// How many draws went into the counts.
    pub fn draws_counted(&self) -> usize {
        self.draws_counted
    }

    /// Appearance count for a number (1..=45).
    pub fn count_of(&self, number: u8) -> u32 {
        self.counts[number as usize - 1]
    }

    /// Counts indexed by number - 1.
    pub fn counts(&self) -> &[u32; LOTTO_MAX as usize] {
        &self.counts
    }

    /// Normalized appearance probabilities (sum 1.0). Uniform when the
    /// history is empty, so downstream weighting never divides by zero.
    pub fn probabilities(&self) -> [f64; LOTTO_MAX as usize] {
        let total: u32 = self.counts.iter().sum();
        let mut probs = [0.0; LOTTO_MAX as usize];
        if total == 0 {
            probs.fill(1.0 / LOTTO_MAX as f64);
            return probs;
        }
        for (p, &c) in probs.iter_mut().zip(&self.counts) {
            *p = c as f64 / total as f64;
        }
        probs
    }
}
