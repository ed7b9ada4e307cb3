//! Quadratic curve in vertex form: `y = a(x - p)^2 + q`.
//!
//! Teaches translation: `p` shifts along x, `q` along y, relative to the
//! base parabola `y = a x^2`.

use serde::Serialize;

use super::{sample_fn, Point};

#[derive(Debug, Clone, Copy)]
pub struct QuadraticCurve {
    pub a: f64,
    pub p: f64,
    pub q: f64,
}

/// Sampled quadratic series with translation metadata.
#[derive(Debug, Serialize)]
pub struct QuadraticSeries {
    pub vertex: Point,
    /// Axis of symmetry, `x = p`.
    pub axis_of_symmetry: f64,
    pub opens_upward: bool,
    /// The reference parabola `y = a x^2` over the same range.
    pub base: Vec<Point>,
    /// The translated curve.
    pub shifted: Vec<Point>,
}

impl QuadraticCurve {
    pub fn new(a: f64, p: f64, q: f64) -> Self {
        Self { a, p, q }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.a * (x - self.p).powi(2) + self.q
    }

    pub fn vertex(&self) -> Point {
        Point {
            x: self.p,
            y: self.q,
        }
    }

    /// Sample both the base and the translated curve over `[x_min, x_max]`.
    pub fn sample(&self, x_min: f64, x_max: f64, points: usize) -> QuadraticSeries {
        QuadraticSeries {
            vertex: self.vertex(),
            axis_of_symmetry: self.p,
            opens_upward: self.a > 0.0,
            base: sample_fn(|x| self.a * x * x, x_min, x_max, points),
            shifted: sample_fn(|x| self.eval(x), x_min, x_max, points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_at_vertex() {
        let curve = QuadraticCurve::new(2.0, 1.5, -3.0);
        assert_eq!(curve.eval(1.5), -3.0);
        assert_eq!(curve.vertex(), Point { x: 1.5, y: -3.0 });
    }

    #[test]
    fn test_translation_from_base() {
        let curve = QuadraticCurve::new(1.0, 2.0, 5.0);
        // y(x) = base(x - p) + q
        assert_eq!(curve.eval(3.0), 1.0 + 5.0);
        assert_eq!(curve.eval(0.0), 4.0 + 5.0);
    }

    #[test]
    fn test_sample_series() {
        let curve = QuadraticCurve::new(-1.0, 0.0, 0.0);
        let series = curve.sample(-10.0, 10.0, 401);

        assert_eq!(series.base.len(), 401);
        assert_eq!(series.shifted.len(), 401);
        assert!(!series.opens_upward);
        assert_eq!(series.axis_of_symmetry, 0.0);
        // p and q both zero: base and shifted coincide
        for (b, s) in series.base.iter().zip(&series.shifted) {
            assert_eq!(b, s);
        }
    }

    #[test]
    fn test_symmetry_about_axis() {
        let curve = QuadraticCurve::new(3.0, -2.0, 1.0);
        let delta = 1.7;
        let left = curve.eval(-2.0 - delta);
        let right = curve.eval(-2.0 + delta);
        assert!((left - right).abs() < 1e-9);
    }
}
