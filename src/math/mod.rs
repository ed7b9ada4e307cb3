//! Series generators for the math-teaching curves.
//!
//! Produces sampled points and translation/asymptote metadata; rendering is
//! left entirely to the consumer.

pub mod quadratic;
pub mod rational;

use serde::Serialize;

/// One sampled point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Uniformly sample `f` over `[x_min, x_max]` with `points` samples.
pub(crate) fn sample_fn(
    f: impl Fn(f64) -> f64,
    x_min: f64,
    x_max: f64,
    points: usize,
) -> Vec<Point> {
    if points == 0 || x_min > x_max {
        return Vec::new();
    }
    if points == 1 {
        return vec![Point {
            x: x_min,
            y: f(x_min),
        }];
    }

    let step = (x_max - x_min) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let x = x_min + step * i as f64;
            Point { x, y: f(x) }
        })
        .collect()
}
