//! Rational curve: `y = a/(x - p) + q`.
//!
//! The function is undefined at `x = p`, so sampling splits the domain into
//! a left and right branch with a small gap on each side of the vertical
//! asymptote.

use serde::Serialize;

use super::{sample_fn, Point};

/// Gap kept on each side of the vertical asymptote when sampling.
const ASYMPTOTE_EPS: f64 = 1e-3;

#[derive(Debug, Clone, Copy)]
pub struct RationalCurve {
    pub a: f64,
    pub p: f64,
    pub q: f64,
}

/// Sampled rational series with asymptote metadata.
#[derive(Debug, Serialize)]
pub struct RationalSeries {
    /// Vertical asymptote, `x = p`.
    pub vertical_asymptote: f64,
    /// Horizontal asymptote, `y = q`.
    pub horizontal_asymptote: f64,
    /// Branch left of the asymptote. Empty when `p <= x_min`.
    pub left: Vec<Point>,
    /// Branch right of the asymptote. Empty when the asymptote lies outside
    /// the range (the whole range is then a single branch, stored in `left`).
    pub right: Vec<Point>,
    /// Probe values just beside the asymptote (`p ± 0.1`, `p ± 0.01`),
    /// filtered to the sampled range.
    pub near_asymptote: Vec<Point>,
}

impl RationalCurve {
    pub fn new(a: f64, p: f64, q: f64) -> Self {
        Self { a, p, q }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.a / (x - self.p) + self.q
    }

    /// Sample the curve over `[x_min, x_max]`, splitting at the vertical
    /// asymptote when it falls inside the range.
    pub fn sample(&self, x_min: f64, x_max: f64, points: usize) -> RationalSeries {
        let (left, right) = if self.p <= x_min || self.p >= x_max {
            // Asymptote outside the range: one continuous branch
            (sample_fn(|x| self.eval(x), x_min, x_max, points), Vec::new())
        } else {
            let half = (points / 2).max(2);
            (
                sample_fn(|x| self.eval(x), x_min, self.p - ASYMPTOTE_EPS, half),
                sample_fn(|x| self.eval(x), self.p + ASYMPTOTE_EPS, x_max, half),
            )
        };

        RationalSeries {
            vertical_asymptote: self.p,
            horizontal_asymptote: self.q,
            left,
            right,
            near_asymptote: self.near_asymptote(x_min, x_max),
        }
    }

    /// Probe the function at `p ± 0.1` and `p ± 0.01`, keeping probes that
    /// fall strictly inside `(x_min, x_max)`.
    fn near_asymptote(&self, x_min: f64, x_max: f64) -> Vec<Point> {
        [-0.1, -0.01, 0.01, 0.1]
            .iter()
            .map(|offset| self.p + offset)
            .filter(|&x| x > x_min && x < x_max)
            .map(|x| Point {
                x,
                y: self.eval(x),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval() {
        let curve = RationalCurve::new(1.0, 0.0, 0.0);
        assert_eq!(curve.eval(2.0), 0.5);
        assert_eq!(curve.eval(-2.0), -0.5);

        let shifted = RationalCurve::new(2.0, 1.0, 3.0);
        assert_eq!(shifted.eval(2.0), 5.0);
    }

    #[test]
    fn test_split_branches_avoid_asymptote() {
        let curve = RationalCurve::new(1.0, 0.0, 0.0);
        let series = curve.sample(-10.0, 10.0, 800);

        assert!(!series.left.is_empty());
        assert!(!series.right.is_empty());
        assert!(series.left.iter().all(|pt| pt.x < 0.0));
        assert!(series.right.iter().all(|pt| pt.x > 0.0));
        assert!(series
            .left
            .iter()
            .chain(&series.right)
            .all(|pt| pt.y.is_finite()));
    }

    #[test]
    fn test_asymptote_outside_range_single_branch() {
        let curve = RationalCurve::new(1.0, 15.0, 0.0);
        let series = curve.sample(-10.0, 10.0, 100);

        assert_eq!(series.left.len(), 100);
        assert!(series.right.is_empty());
        assert!(series.near_asymptote.is_empty());
    }

    #[test]
    fn test_branches_approach_horizontal_asymptote() {
        let curve = RationalCurve::new(1.0, 0.0, 3.0);
        let series = curve.sample(-100.0, 100.0, 1000);

        let far_left = series.left.first().unwrap();
        let far_right = series.right.last().unwrap();
        assert!((far_left.y - 3.0).abs() < 0.05);
        assert!((far_right.y - 3.0).abs() < 0.05);
    }

    #[test]
    fn test_near_asymptote_probes() {
        let curve = RationalCurve::new(1.0, 2.0, 0.0);
        let series = curve.sample(-10.0, 10.0, 100);

        assert_eq!(series.near_asymptote.len(), 4);
        // Probes straddle the asymptote with opposite signs (a > 0)
        assert!(series.near_asymptote[0].y < 0.0); // p - 0.1
        assert!(series.near_asymptote[3].y > 0.0); // p + 0.1
        // Closer probes have larger magnitude
        assert!(series.near_asymptote[1].y.abs() > series.near_asymptote[0].y.abs());
    }

    #[test]
    fn test_probes_filtered_to_range() {
        // Asymptote right at the range edge: only inner probes survive
        let curve = RationalCurve::new(1.0, -10.0, 0.0);
        let series = curve.sample(-10.0, 10.0, 100);
        assert!(series.near_asymptote.iter().all(|pt| pt.x > -10.0));
        assert_eq!(series.near_asymptote.len(), 2);
    }
}
