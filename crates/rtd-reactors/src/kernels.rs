//! Ideal-reactor RTD kernels sampled on a uniform time grid.

use std::cmp::Ordering;
use std::num::NonZeroU32;

use rtd_core::{Real, TimeGrid};

/// Exit-age and cumulative distributions of an ideal flow pattern.
pub trait IdealRtd {
    /// Mean residence time [s]
    fn mean_residence_time(&self) -> Real;

    /// E(t) at every grid point [1/s]
    fn exit_age(&self, grid: &TimeGrid) -> Vec<Real>;

    /// F(t) at every grid point, in [0, 1]
    fn step_response(&self, grid: &TimeGrid) -> Vec<Real>;
}

/// Ideal plug flow: every fluid element leaves after exactly `tau`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pfr {
    tau: Real,
}

impl Pfr {
    pub fn new(tau: Real) -> Self {
        Self { tau }
    }
}

impl IdealRtd for Pfr {
    fn mean_residence_time(&self) -> Real {
        self.tau
    }

    /// Discrete impulse of area one at the sample nearest `tau`; all zeros
    /// when `tau` lies past the grid.
    fn exit_age(&self, grid: &TimeGrid) -> Vec<Real> {
        let mut out = vec![0.0; grid.len()];
        if let Some(k) = grid.nearest_index(self.tau) {
            out[k] = 1.0 / grid.dt();
        }
        out
    }

    /// Trapezoidal running integral of the impulse: 0, then 0.5 on the
    /// impulse sample, then 1.
    fn step_response(&self, grid: &TimeGrid) -> Vec<Real> {
        let Some(k) = grid.nearest_index(self.tau) else {
            return vec![0.0; grid.len()];
        };
        (0..grid.len())
            .map(|i| match i.cmp(&k) {
                Ordering::Less => 0.0,
                Ordering::Equal => 0.5,
                Ordering::Greater => 1.0,
            })
            .collect()
    }
}

/// `n` equal stirred tanks in series with total mean residence time `tau`.
///
/// Both distributions are evaluated in log space so that large `n` stays
/// finite over the whole plotted horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TanksInSeries {
    tau: Real,
    tanks: NonZeroU32,
    /// ln((n - 1)!)
    ln_norm: Real,
}

/// Relative size at which the Poisson tail sum is truncated.
const TAIL_EPS: Real = 1e-17;

fn ln_factorial(k: u32) -> Real {
    (2..=k).map(|i| Real::from(i).ln()).sum()
}

impl TanksInSeries {
    pub fn new(tau: Real, tanks: NonZeroU32) -> Self {
        Self {
            tau,
            tanks,
            ln_norm: ln_factorial(tanks.get() - 1),
        }
    }

    pub fn single(tau: Real) -> Self {
        Self::new(tau, NonZeroU32::MIN)
    }

    pub fn tanks(&self) -> NonZeroU32 {
        self.tanks
    }

    fn tank_tau(&self) -> Real {
        self.tau / Real::from(self.tanks.get())
    }

    /// `t^(n-1) / ((n-1)! tau_i^n) * exp(-t / tau_i)`
    pub fn exit_age_at(&self, t: Real) -> Real {
        if t < 0.0 {
            return 0.0;
        }
        let tau_i = self.tank_tau();
        let x = t / tau_i;
        let order = Real::from(self.tanks.get() - 1);
        if x == 0.0 {
            return if self.tanks.get() == 1 { 1.0 / tau_i } else { 0.0 };
        }
        (order * x.ln() - self.ln_norm - x).exp() / tau_i
    }

    /// `1 - exp(-t / tau_i) * sum_{k<n} (t / tau_i)^k / k!`
    ///
    /// Below the mode (`x < n`) the complementary Poisson tail
    /// `sum_{k>=n}` is summed instead, which avoids cancellation while F is
    /// small.
    pub fn step_response_at(&self, t: Real) -> Real {
        if t <= 0.0 {
            return 0.0;
        }
        let x = t / self.tank_tau();
        let ln_x = x.ln();
        let n = self.tanks.get();

        let f = if x < Real::from(n) {
            let mut k = Real::from(n);
            let mut term = (k * ln_x - (self.ln_norm + k.ln()) - x).exp();
            let mut tail = 0.0;
            while term > TAIL_EPS * tail || tail == 0.0 {
                tail += term;
                if term == 0.0 {
                    break;
                }
                k += 1.0;
                term *= x / k;
            }
            tail
        } else {
            let mut ln_fact = 0.0;
            let mut head = 0.0;
            for k in 0..n {
                if k > 0 {
                    ln_fact += Real::from(k).ln();
                }
                head += (Real::from(k) * ln_x - ln_fact - x).exp();
            }
            1.0 - head
        };
        f.clamp(0.0, 1.0)
    }
}

impl IdealRtd for TanksInSeries {
    fn mean_residence_time(&self) -> Real {
        self.tau
    }

    fn exit_age(&self, grid: &TimeGrid) -> Vec<Real> {
        grid.points()
            .into_iter()
            .map(|t| self.exit_age_at(t))
            .collect()
    }

    fn step_response(&self, grid: &TimeGrid) -> Vec<Real> {
        grid.points()
            .into_iter()
            .map(|t| self.step_response_at(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tanks(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn pfr_impulse_has_unit_area() {
        let grid = TimeGrid::new(0.01, 20.0).unwrap();
        let e = Pfr::new(10.0).exit_age(&grid);
        let area: Real = e.iter().sum::<Real>() * grid.dt();
        assert!((area - 1.0).abs() < 1e-9);
        assert_eq!(e.iter().position(|&v| v > 0.0), Some(1000));
    }

    #[test]
    fn pfr_step_breaks_through_at_tau() {
        let grid = TimeGrid::new(0.25, 20.0).unwrap();
        let f = Pfr::new(12.5).step_response(&grid);
        assert_eq!(f[49], 0.0);
        assert_eq!(f[50], 0.5);
        assert_eq!(f[51], 1.0);
    }

    #[test]
    fn pfr_beyond_horizon_is_silent() {
        let grid = TimeGrid::new(0.25, 20.0).unwrap();
        let pfr = Pfr::new(30.0);
        assert!(pfr.exit_age(&grid).iter().all(|&v| v == 0.0));
        assert!(pfr.step_response(&grid).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn single_tank_is_exponential() {
        let cstr = TanksInSeries::single(10.0);
        assert!((cstr.exit_age_at(0.0) - 0.1).abs() < 1e-12);
        let expected = 0.1 * (-1.0_f64).exp();
        assert!((cstr.exit_age_at(10.0) - expected).abs() < 1e-12);
        assert!((cstr.step_response_at(10.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn tanks_in_series_start_at_zero() {
        let cstr = TanksInSeries::new(10.0, tanks(3));
        assert_eq!(cstr.exit_age_at(0.0), 0.0);
        assert_eq!(cstr.step_response_at(0.0), 0.0);
    }

    #[test]
    fn exit_age_integrates_to_one() {
        let grid = TimeGrid::new(0.01, 100.0).unwrap();
        for n in [1, 2, 5] {
            let e = TanksInSeries::new(10.0, tanks(n)).exit_age(&grid);
            let area: Real = e.windows(2).map(|w| 0.5 * (w[0] + w[1]) * grid.dt()).sum();
            assert!((area - 1.0).abs() < 1e-3, "n = {n}, area = {area}");
        }
    }

    #[test]
    fn step_response_is_monotone_and_bounded() {
        let grid = TimeGrid::new(0.1, 60.0).unwrap();
        for n in [1, 3, 8] {
            let f = TanksInSeries::new(10.0, tanks(n)).step_response(&grid);
            assert!(f.windows(2).all(|w| w[1] >= w[0]));
            assert!(f.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn many_tanks_stay_finite() {
        // 5 tau horizon, as plotted for stirred tanks
        let grid = TimeGrid::new(0.01, 50.0).unwrap();
        for n in [300, 1000] {
            let kernel = TanksInSeries::new(10.0, tanks(n));
            let e = kernel.exit_age(&grid);
            let f = kernel.step_response(&grid);
            assert!(e.iter().all(|v| v.is_finite() && *v >= 0.0), "n = {n}");
            assert!(f.iter().all(|v| (0.0..=1.0).contains(v)), "n = {n}");
            assert!(f.windows(2).all(|w| w[1] >= w[0] - 1e-12), "n = {n}");
            assert!(f[0] == 0.0 && (f[f.len() - 1] - 1.0).abs() < 1e-12);

            let area: Real = e.windows(2).map(|w| 0.5 * (w[0] + w[1]) * grid.dt()).sum();
            assert!((area - 1.0).abs() < 1e-3, "n = {n}, area = {area}");
        }
    }

    #[test]
    fn tail_and_head_sums_agree_at_the_mode() {
        let kernel = TanksInSeries::new(10.0, tanks(4));
        // x = 4 switches from the tail sum to the head sum
        let below = kernel.step_response_at(10.0 - 1e-9);
        let at = kernel.step_response_at(10.0);
        let exact = 1.0 - (-4.0_f64).exp() * (1.0 + 4.0 + 8.0 + 64.0 / 6.0);
        assert!((at - exact).abs() < 1e-12);
        assert!((below - exact).abs() < 1e-9);
    }

    #[test]
    fn more_tanks_approach_plug_flow() {
        let wide = TanksInSeries::new(10.0, tanks(1));
        let narrow = TanksInSeries::new(10.0, tanks(20));
        assert!(narrow.step_response_at(5.0) < wide.step_response_at(5.0));
        assert!(narrow.step_response_at(15.0) > wide.step_response_at(15.0));
    }
}
