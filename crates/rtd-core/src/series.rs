//! Uniform time grids and time/value response curves.

use crate::numeric::{Real, Tolerances, ensure_finite, ensure_positive, nearly_equal};
use crate::{RtdError, RtdResult};

/// Half-open uniform grid `t_i = i * dt` for every `t_i < end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    dt: Real,
    end: Real,
}

impl TimeGrid {
    pub fn new(dt: Real, end: Real) -> RtdResult<Self> {
        let dt = ensure_positive(dt, "grid step")?;
        let end = ensure_positive(end, "grid end")?;
        Ok(Self { dt, end })
    }

    pub fn dt(&self) -> Real {
        self.dt
    }

    pub fn end(&self) -> Real {
        self.end
    }

    /// Number of samples. An `end` that lands on a multiple of `dt` (up to
    /// round-off) is excluded.
    pub fn len(&self) -> usize {
        let ratio = self.end / self.dt;
        let whole = ratio.round();
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        if nearly_equal(ratio, whole, tol) {
            whole as usize
        } else {
            ratio.ceil() as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> Vec<Real> {
        (0..self.len()).map(|i| i as Real * self.dt).collect()
    }

    /// Index of the sample nearest to `t`, if it lies on the grid.
    pub fn nearest_index(&self, t: Real) -> Option<usize> {
        if !t.is_finite() || t < 0.0 {
            return None;
        }
        let idx = (t / self.dt).round() as usize;
        (idx < self.len()).then_some(idx)
    }
}

/// Paired time points (seconds) and values.
///
/// Time points are non-decreasing. A repeated time value marks a
/// discontinuity (a spliced marker or a spike at t=0).
///
/// Serialize-only: every curve is built through the checked constructors.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResponseCurve {
    time_s: Vec<Real>,
    values: Vec<Real>,
}

impl ResponseCurve {
    pub fn new(time_s: Vec<Real>, values: Vec<Real>) -> RtdResult<Self> {
        if time_s.len() != values.len() {
            return Err(RtdError::Invariant {
                what: "time and value sequences differ in length",
            });
        }
        if time_s.windows(2).any(|w| w[1] < w[0]) {
            return Err(RtdError::Invariant {
                what: "time points must be ascending",
            });
        }
        for &t in &time_s {
            ensure_finite(t, "curve time point")?;
        }
        Ok(Self { time_s, values })
    }

    /// Samples `f` at every grid point.
    pub fn sample(grid: &TimeGrid, f: impl Fn(Real) -> Real) -> Self {
        let time_s = grid.points();
        let values = time_s.iter().map(|&t| f(t)).collect();
        Self { time_s, values }
    }

    /// Pairs precomputed per-sample values with the grid.
    pub fn from_grid(grid: &TimeGrid, values: Vec<Real>) -> RtdResult<Self> {
        Self::new(grid.points(), values)
    }

    pub fn time_s(&self) -> &[Real] {
        &self.time_s
    }

    pub fn values(&self) -> &[Real] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.time_s.iter().copied().zip(self.values.iter().copied())
    }

    /// Value of the first sample at or after `t`.
    pub fn value_at(&self, t: Real) -> Option<Real> {
        let idx = self.time_s.partition_point(|&x| x < t);
        self.values.get(idx).copied()
    }

    pub fn max_value(&self) -> Option<Real> {
        self.values.iter().copied().reduce(Real::max)
    }

    pub fn is_ascending(&self) -> bool {
        self.time_s.windows(2).all(|w| w[0] <= w[1])
    }

    /// Appends a sample; `t` must not precede the last time point.
    pub fn push(&mut self, t: Real, value: Real) -> RtdResult<()> {
        if self.time_s.last().is_some_and(|&last| t < last) {
            return Err(RtdError::Invariant {
                what: "appended time point precedes the curve end",
            });
        }
        self.time_s.push(t);
        self.values.push(value);
        Ok(())
    }

    pub fn map_values(&mut self, f: impl Fn(Real) -> Real) {
        for v in &mut self.values {
            *v = f(*v);
        }
    }

    pub fn set_value(&mut self, index: usize, value: Real) {
        if let Some(v) = self.values.get_mut(index) {
            *v = value;
        }
    }

    /// Inserts a synthetic `(t, value)` point at its sorted position and
    /// returns the index it landed on. Ties go before existing samples with
    /// an equal time value.
    pub fn splice_marker(&mut self, t: Real, value: Real) -> usize {
        let idx = self.time_s.partition_point(|&x| x < t);
        self.time_s.insert(idx, t);
        self.values.insert(idx, value);
        idx
    }
}
