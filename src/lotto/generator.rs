//! Weighted lotto number generation.
//!
//! Blends a uniform distribution with historical appearance frequencies and
//! samples 6 distinct numbers without replacement.

use anyhow::Result;
use rand::distributions::WeightedIndex;
use rand::prelude::*;

use super::stats::NumberFrequency;
use super::{LOTTO_MAX, LOTTO_PICK};
use crate::types::Draw;

/// Per-number sampling weights, indexed by number - 1.
///
/// `weight_factor` 0.0 is pure uniform, 1.0 pure historical frequency.
/// The factor is clamped to [0, 1].
pub fn blended_weights(frequency: &NumberFrequency, weight_factor: f64) -> [f64; LOTTO_MAX as usize] {
    let factor = weight_factor.clamp(0.0, 1.0);
    let uniform = 1.0 / LOTTO_MAX as f64;
    let probs = frequency.probabilities();

    let mut weights = [0.0; LOTTO_MAX as usize];
    for (w, &p) in weights.iter_mut().zip(&probs) {
        *w = (1.0 - factor) * uniform + factor * p;
    }
    weights
}

/// Sample one set of 6 distinct numbers, returned sorted ascending.
pub fn pick_set<R: Rng>(weights: &[f64; LOTTO_MAX as usize], rng: &mut R) -> Result<[u8; LOTTO_PICK]> {
    let mut remaining = *weights;
    let mut picked = [0u8; LOTTO_PICK];

    for slot in picked.iter_mut() {
        let dist = WeightedIndex::new(remaining.iter())?;
        let index = dist.sample(rng);
        *slot = index as u8 + 1;
        // Without replacement: a drawn number cannot repeat
        remaining[index] = 0.0;
    }

    picked.sort_unstable();
    Ok(picked)
}

/// Generate `sets` candidate number sets from a history.
pub fn generate_sets<R: Rng>(
    draws: &[Draw],
    sets: usize,
    weight_factor: f64,
    recent_window: Option<usize>,
    rng: &mut R,
) -> Result<Vec<[u8; LOTTO_PICK]>> {
    let frequency = match recent_window {
        Some(window) => NumberFrequency::from_recent(draws, window),
        None => NumberFrequency::from_draws(draws),
    };
    let weights = blended_weights(&frequency, weight_factor);

    (0..sets).map(|_| pick_set(&weights, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;

    fn draw(round: u32, numbers: [u8; 6]) -> Draw {
        Draw {
            round,
            date: NaiveDate::from_ymd_opt(2002, 12, 7).unwrap(),
            numbers,
        }
    }

    fn assert_valid_set(set: &[u8; 6]) {
        assert!(set.iter().all(|&n| (1..=45).contains(&n)));
        assert!(set.windows(2).all(|w| w[0] < w[1]), "not sorted/distinct: {:?}", set);
    }

    #[test]
    fn test_pick_set_is_valid() {
        let freq = NumberFrequency::from_draws(&[]);
        let weights = blended_weights(&freq, 0.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let set = pick_set(&weights, &mut rng).unwrap();
            assert_valid_set(&set);
        }
    }

    #[test]
    fn test_full_weight_restricts_to_seen_numbers() {
        // Only numbers 1..=12 ever appeared; factor 1.0 must never pick others
        let draws = vec![draw(1, [1, 2, 3, 4, 5, 6]), draw(2, [7, 8, 9, 10, 11, 12])];
        let mut rng = StdRng::seed_from_u64(42);

        let sets = generate_sets(&draws, 50, 1.0, None, &mut rng).unwrap();
        for set in &sets {
            assert_valid_set(set);
            assert!(set.iter().all(|&n| n <= 12), "unseen number in {:?}", set);
        }
    }

    #[test]
    fn test_zero_weight_ignores_history() {
        let draws = vec![draw(1, [1, 2, 3, 4, 5, 6])];
        let freq = NumberFrequency::from_draws(&draws);
        let weights = blended_weights(&freq, 0.0);
        assert!(weights.iter().all(|&w| (w - 1.0 / 45.0).abs() < 1e-12));
    }

    #[test]
    fn test_empty_history_with_full_weight_is_uniform() {
        let mut rng = StdRng::seed_from_u64(1);
        let sets = generate_sets(&[], 10, 1.0, None, &mut rng).unwrap();
        assert_eq!(sets.len(), 10);
        for set in &sets {
            assert_valid_set(set);
        }
    }

    #[test]
    fn test_weight_factor_clamped() {
        let freq = NumberFrequency::from_draws(&[]);
        let low = blended_weights(&freq, -3.0);
        let high = blended_weights(&freq, 5.0);
        assert!((low[0] - 1.0 / 45.0).abs() < 1e-12);
        assert!((high.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let draws = vec![draw(1, [10, 23, 29, 33, 37, 40])];
        let a = generate_sets(&draws, 3, 0.5, None, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate_sets(&draws, 3, 0.5, None, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recent_window_changes_weighting() {
        // Number 45 only appears in the old draw; a window of 1 excludes it
        let draws = vec![draw(1, [40, 41, 42, 43, 44, 45]), draw(2, [1, 2, 3, 4, 5, 6])];
        let mut rng = StdRng::seed_from_u64(11);

        let sets = generate_sets(&draws, 30, 1.0, Some(1), &mut rng).unwrap();
        for set in &sets {
            assert!(set.iter().all(|&n| n <= 6), "stale number in {:?}", set);
        }
    }
}
