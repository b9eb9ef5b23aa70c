use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the result of a fixed-point iteration
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FixedPointOutcome {
    /// The iteration converged to `x` within the tolerance
    Converged { x: f64, iterations: usize },

    /// The iteration cap was reached; `last` and `previous` are the last two iterates
    NotConverged { last: f64, previous: f64 },

    /// The step function refused to produce a new iterate; `last` is the last valid iterate
    Aborted { last: f64 },
}

impl FixedPointOutcome {
    /// Returns the converged value, if any
    pub fn converged(&self) -> Option<f64> {
        match self {
            FixedPointOutcome::Converged { x, .. } => Some(*x),
            _ => None,
        }
    }

    /// Returns the converged value or the last iterate
    pub fn value_or_last(&self) -> f64 {
        match self {
            FixedPointOutcome::Converged { x, .. } => *x,
            FixedPointOutcome::NotConverged { last, .. } => *last,
            FixedPointOutcome::Aborted { last } => *last,
        }
    }
}

/// Implements a bounded (and optionally damped) fixed-point iterator x ← g(x)
///
/// The damped update is:
///
/// ```text
/// x_{k+1} = (1 - ω) x_k + ω g(x_k)
/// ```
///
/// where `ω = damping` (1.0 means no damping).
///
/// Convergence is declared when `|x_{k+1} - x_k| ≤ tolerance · max(1, |x_{k+1}|)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedPoint {
    /// Maximum number of iterations
    pub max_iterations: usize,

    /// Tolerance
    pub tolerance: f64,

    /// Damping (relaxation) factor ω with 0 < ω ≤ 1
    pub damping: f64,
}

impl FixedPoint {
    /// Allocates a new instance (without damping)
    pub fn new(max_iterations: usize, tolerance: f64) -> Result<Self, StrError> {
        FixedPoint::new_damped(max_iterations, tolerance, 1.0)
    }

    /// Allocates a new instance with damping
    pub fn new_damped(max_iterations: usize, tolerance: f64, damping: f64) -> Result<Self, StrError> {
        if max_iterations < 1 {
            return Err("max_iterations must be ≥ 1");
        }
        if tolerance <= 0.0 {
            return Err("tolerance must be > 0.0");
        }
        if damping <= 0.0 || damping > 1.0 {
            return Err("damping must satisfy 0 < ω ≤ 1");
        }
        Ok(FixedPoint {
            max_iterations,
            tolerance,
            damping,
        })
    }

    /// Runs the iteration starting from `x0`
    ///
    /// The `step` function returns `None` to abort the iteration (e.g., when a
    /// denominator collapses); non-finite values also abort.
    pub fn solve<F>(&self, x0: f64, mut step: F) -> FixedPointOutcome
    where
        F: FnMut(f64) -> Option<f64>,
    {
        let mut x = x0;
        let mut previous = x0;
        for k in 0..self.max_iterations {
            let gx = match step(x) {
                Some(v) if v.is_finite() => v,
                _ => return FixedPointOutcome::Aborted { last: x },
            };
            let x_new = (1.0 - self.damping) * x + self.damping * gx;
            if f64::abs(x_new - x) <= self.tolerance * f64::max(1.0, f64::abs(x_new)) {
                return FixedPointOutcome::Converged {
                    x: x_new,
                    iterations: k + 1,
                };
            }
            previous = x;
            x = x_new;
        }
        FixedPointOutcome::NotConverged { last: x, previous }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
