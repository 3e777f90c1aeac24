//! Gauss–Legendre rules for the reference interval `[-1, 1]`.

use crate::Error;
use std::f64::consts::PI;

/// The largest number of points for which [`try_gauss`] produces a rule.
pub const MAX_GAUSS_POINTS: usize = 64;

const NEWTON_MAX_ITERATIONS: usize = 100;

/// A one-dimensional quadrature rule, stored as parallel arrays of points and weights.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussRule {
    points: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussRule {
    /// Constructs a rule from explicit points and weights.
    ///
    /// # Panics
    ///
    /// Panics if the number of points and weights differ.
    pub fn from_points_and_weights(points: Vec<f64>, weights: Vec<f64>) -> Self {
        assert_eq!(points.len(), weights.len(), "Points and weights must have the same length");
        Self { points, weights }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Maps the rule from `[-1, 1]` onto `[a, b]`.
    ///
    /// Points are mapped affinely, `x = a + (t + 1) / 2 * (b - a)`, and weights are scaled by
    /// `(b - a) / 2`.
    pub fn mapped_to(&self, a: f64, b: f64) -> Self {
        let scale = (b - a).abs() / 2.0;
        let points = self
            .points
            .iter()
            .map(|t| {
                let s = (t + 1.0) / 2.0;
                (1.0 - s) * a + s * b
            })
            .collect();
        let weights = self.weights.iter().map(|w| w * scale).collect();
        Self { points, weights }
    }

    /// Approximates the integral of `f` with this rule.
    pub fn integrate(&self, f: impl Fn(f64) -> f64) -> f64 {
        self.points
            .iter()
            .zip(&self.weights)
            .map(|(&x, &w)| w * f(x))
            .sum()
    }
}

/// Evaluates the Legendre polynomial `P_n` and its derivative at `x`.
///
/// The derivative formula is singular at `|x| == 1`, so `x` must lie in the open interval.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    // Bonnet's recursion: m P_m = (2m - 1) x P_{m-1} - (m - 1) P_{m-2}
    let (mut p_prev, mut p) = (0.0, 1.0);
    for m in 1..=n {
        let m = m as f64;
        let p_next = ((2.0 * m - 1.0) * x * p - (m - 1.0) * p_prev) / m;
        p_prev = p;
        p = p_next;
    }
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}

/// Gauss–Legendre rule with `num_points` points on `[-1, 1]`.
///
/// A rule with `n` points integrates polynomials of degree up to `2n - 1` exactly.
/// Points are returned in increasing order.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn gauss(num_points: usize) -> GaussRule {
    let n = num_points;
    assert!(n > 0, "number of points must be positive");

    let mut points = vec![0.0; n];
    let mut weights = vec![0.0; n];

    // Roots are symmetric about the origin, so only the positive half is computed
    for i in 0..(n + 1) / 2 {
        // Tricomi's initial guess for the i-th largest root
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        let mut dp = legendre_with_derivative(n, x).1;
        for _ in 0..NEWTON_MAX_ITERATIONS {
            let (p, dp_x) = legendre_with_derivative(n, x);
            let dx = p / dp_x;
            x -= dx;
            dp = dp_x;
            if dx.abs() <= 1e-15 {
                dp = legendre_with_derivative(n, x).1;
                break;
            }
        }

        let w = 2.0 / ((1.0 - x * x) * dp * dp);
        points[i] = -x;
        points[n - 1 - i] = x;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    if n % 2 == 1 {
        // The middle root is exactly zero
        points[n / 2] = 0.0;
    }

    GaussRule { points, weights }
}

/// Like [`gauss`], but returns an error instead of panicking for unsupported point counts.
pub fn try_gauss(num_points: usize) -> Result<GaussRule, Error> {
    if num_points == 0 || num_points > MAX_GAUSS_POINTS {
        Err(Error::NoRuleAvailable {
            requested_points: num_points,
        })
    } else {
        Ok(gauss(num_points))
    }
}
