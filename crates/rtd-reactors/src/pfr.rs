//! Plug-flow reactor responses with flow bypass or dead volume.
//!
//! Concentration curves are drawn on the coarse grid as discrete plateaus
//! and markers; E(t) and F(t) are drawn on the fine grid with the ideal
//! reactor as reference.

use rtd_core::{Real, ResponseCurve, RtdResult, TimeGrid, is_whole, round_to};
use tracing::{debug, warn};

use crate::calculator::{Resolution, RtdCalculator};
use crate::config::{TRACER_AMOUNT, TracerMode};
use crate::kernels::{IdealRtd, Pfr};
use crate::model::{CurveSet, NonIdeality, ReactorKind};

/// Split of the feed between the plug-flow zone and an instant bypass.
#[derive(Debug, Clone, Copy)]
struct Variant {
    /// Residence time of the plug-flow zone [s]
    tau: Real,
    /// Fraction of the tracer travelling through the plug-flow zone
    through: Real,
    /// Fraction leaving at t=0
    bypass: Real,
}

impl Variant {
    fn new(calc: &RtdCalculator, case: NonIdeality) -> Self {
        let bypass = match case {
            NonIdeality::Bypass => calc.params().bypass_fraction,
            NonIdeality::Ideal | NonIdeality::DeadVolume => 0.0,
        };
        Self {
            tau: calc.residence_time_s(case),
            through: 1.0 - bypass,
            bypass,
        }
    }
}

fn grid(calc: &RtdCalculator, resolution: Resolution, variant: Variant) -> RtdResult<TimeGrid> {
    let grid = calc.grid(ReactorKind::Pfr, resolution)?;
    if grid.nearest_index(variant.tau).is_none() {
        warn!(
            tau_s = variant.tau,
            horizon_s = grid.end(),
            "plug-flow exit falls beyond the plotted horizon"
        );
    }
    Ok(grid)
}

/// Outlet concentration for the configured tracer mode.
pub fn concentration(calc: &RtdCalculator, case: NonIdeality) -> RtdResult<ResponseCurve> {
    let variant = Variant::new(calc, case);
    let grid = grid(calc, Resolution::Coarse, variant)?;
    match calc.config().tracer() {
        TracerMode::Pulse => pulse_concentration(&grid, variant),
        TracerMode::Step => step_concentration(&grid, variant),
    }
}

/// A pulse only has a representable sample when the exit time is a whole
/// number of seconds on the grid. Otherwise the sampled impulse is cleared
/// and a single marker of the through-flow peak is spliced in at the exit
/// time rounded to two decimals.
fn pulse_concentration(grid: &TimeGrid, variant: Variant) -> RtdResult<ResponseCurve> {
    let peak = TRACER_AMOUNT * variant.through;
    let scale = grid.dt() * peak;
    let values = Pfr::new(variant.tau)
        .exit_age(grid)
        .into_iter()
        .map(|e| e * scale)
        .collect();
    let mut curve = ResponseCurve::from_grid(grid, values)?;

    let representable = is_whole(variant.tau) && is_whole(variant.tau / grid.dt());
    if !representable {
        curve.map_values(|_| 0.0);
    }
    if variant.bypass > 0.0 {
        curve.set_value(0, variant.bypass * TRACER_AMOUNT);
    }
    if !representable {
        let at = round_to(variant.tau, 2);
        let index = curve.splice_marker(at, peak);
        debug!(time_s = at, index, value = peak, "spliced exit marker");
    }
    Ok(curve)
}

/// Two plateaus: the bypass leakage before breakthrough, full feed after.
fn step_concentration(grid: &TimeGrid, variant: Variant) -> RtdResult<ResponseCurve> {
    let low = variant.bypass * TRACER_AMOUNT;
    let half = TRACER_AMOUNT / 2.0;
    let values = Pfr::new(variant.tau)
        .step_response(grid)
        .into_iter()
        .map(|f| if f * TRACER_AMOUNT < half { low } else { TRACER_AMOUNT })
        .collect();
    ResponseCurve::from_grid(grid, values)
}

/// E(t): the through-flow impulse at `tau` plus the bypass spike at t=0.
pub fn exit_age(calc: &RtdCalculator, case: NonIdeality) -> RtdResult<CurveSet> {
    let variant = Variant::new(calc, case);
    let grid = grid(calc, Resolution::Fine, variant)?;

    let mut values: Vec<Real> = Pfr::new(variant.tau)
        .exit_age(&grid)
        .into_iter()
        .map(|e| e * variant.through)
        .collect();
    if let Some(first) = values.first_mut().filter(|_| variant.bypass > 0.0) {
        *first += variant.bypass / grid.dt();
    }
    let primary = ResponseCurve::from_grid(&grid, values)?;

    CurveSet::with_ideal_reference(primary, case, || {
        ResponseCurve::from_grid(&grid, Pfr::new(calc.constants().mean_s()).exit_age(&grid))
    })
}

/// F(t): the bypass floor, then full breakthrough at `tau`.
pub fn cumulative(calc: &RtdCalculator, case: NonIdeality) -> RtdResult<CurveSet> {
    let variant = Variant::new(calc, case);
    let grid = grid(calc, Resolution::Fine, variant)?;

    let values = Pfr::new(variant.tau)
        .step_response(&grid)
        .into_iter()
        .map(|f| variant.bypass + variant.through * f)
        .collect();
    let primary = ResponseCurve::from_grid(&grid, values)?;

    CurveSet::with_ideal_reference(primary, case, || {
        ResponseCurve::from_grid(
            &grid,
            Pfr::new(calc.constants().mean_s()).step_response(&grid),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NonIdealityParameters, ReactorConfig};
    use rtd_core::units::{m3, m3ps};

    fn calc(volume: Real, flow: Real, tracer: TracerMode) -> RtdCalculator {
        let config = ReactorConfig::new(m3(volume), m3ps(flow), tracer).unwrap();
        RtdCalculator::new(config, NonIdealityParameters::default()).unwrap()
    }

    #[test]
    fn bypass_step_plateaus() {
        let c = calc(20.0, 2.0, TracerMode::Step);
        let curve = concentration(&c, NonIdeality::Bypass).unwrap();
        assert_eq!(curve.len(), 80);
        for (t, v) in curve.points() {
            if t < 12.5 {
                assert_eq!(v, 20.0, "t = {t}");
            } else {
                assert_eq!(v, 100.0, "t = {t}");
            }
        }
    }

    #[test]
    fn dead_volume_step_has_zero_low_plateau() {
        let c = calc(20.0, 2.0, TracerMode::Step);
        let curve = concentration(&c, NonIdeality::DeadVolume).unwrap();
        assert_eq!(curve.value_at(4.75), Some(0.0));
        assert_eq!(curve.value_at(5.0), Some(100.0));
        assert!(curve.values().iter().all(|&v| v == 0.0 || v == 100.0));
    }

    #[test]
    fn bypass_pulse_off_integer_tau_splices_marker() {
        let c = calc(20.0, 2.0, TracerMode::Pulse);
        let curve = concentration(&c, NonIdeality::Bypass).unwrap();

        // 80 grid samples plus the marker
        assert_eq!(curve.len(), 81);
        assert!(curve.is_ascending());
        assert_eq!(curve.values()[0], 20.0);

        let idx = curve.values().iter().position(|&v| v == 80.0).unwrap();
        assert_eq!(curve.time_s()[idx], 12.5);
        // Tie with the existing 12.5 sample: marker goes first
        assert_eq!(curve.time_s()[idx + 1], 12.5);
        assert_eq!(curve.values()[idx + 1], 0.0);

        let nonzero = curve.values().iter().filter(|&&v| v != 0.0).count();
        assert_eq!(nonzero, 2);
    }

    #[test]
    fn dead_volume_pulse_on_integer_tau_keeps_grid() {
        let c = calc(20.0, 2.0, TracerMode::Pulse);
        let curve = concentration(&c, NonIdeality::DeadVolume).unwrap();
        assert_eq!(curve.len(), 80);
        assert_eq!(curve.value_at(5.0), Some(100.0));
        assert_eq!(curve.values().iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn dead_volume_pulse_off_grid_marker_is_full_amount() {
        // tau_dead = (30 - 10) / 3 = 6.666..
        let c = calc(30.0, 3.0, TracerMode::Pulse);
        let curve = concentration(&c, NonIdeality::DeadVolume).unwrap();
        assert_eq!(curve.len(), 81);
        let idx = curve.values().iter().position(|&v| v == 100.0).unwrap();
        assert_eq!(curve.time_s()[idx], 6.67);
        assert!(curve.is_ascending());
        assert_eq!(curve.values()[0], 0.0);
    }

    #[test]
    fn bypass_exit_age_has_spike_and_delayed_peak() {
        let c = calc(20.0, 2.0, TracerMode::Pulse);
        let set = exit_age(&c, NonIdeality::Bypass).unwrap();
        let dt = c.grid_settings().fine_dt;
        assert!((set.primary.values()[0] - 0.2 / dt).abs() < 1e-9);
        let peak = set.primary.value_at(12.5).unwrap();
        assert!((peak - 0.8 / dt).abs() < 1e-6);

        let reference = set.reference.unwrap();
        assert!((reference.value_at(10.0).unwrap() - 1.0 / dt).abs() < 1e-6);
    }

    #[test]
    fn t0_spike_only_with_bypass() {
        let c = calc(20.0, 2.0, TracerMode::Pulse);
        for case in [NonIdeality::Ideal, NonIdeality::DeadVolume] {
            let set = exit_age(&c, case).unwrap();
            assert_eq!(set.primary.values()[0], 0.0, "{case}");
        }
    }

    #[test]
    fn bypass_cumulative_floor_and_ceiling() {
        let c = calc(20.0, 2.0, TracerMode::Step);
        let set = cumulative(&c, NonIdeality::Bypass).unwrap();
        let f = set.primary.values();
        assert!((f[0] - 0.2).abs() < 1e-12);
        assert!((f[f.len() - 1] - 1.0).abs() < 1e-12);
        assert!(f.windows(2).all(|w| w[1] >= w[0]));
        assert!(f.iter().all(|&v| v >= 0.2 - 1e-12));
    }

    #[test]
    fn ideal_cumulative_has_no_reference() {
        let c = calc(20.0, 2.0, TracerMode::Step);
        let set = cumulative(&c, NonIdeality::Ideal).unwrap();
        assert!(set.reference.is_none());
        assert_eq!(set.primary.value_at(9.99), Some(0.0));
        assert_eq!(set.primary.value_at(10.01), Some(1.0));
    }
}
