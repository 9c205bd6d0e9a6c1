//! Stirred-tank responses with flow bypass or dead volume.

use std::num::NonZeroU32;

use rtd_core::{Real, ResponseCurve, RtdResult, TimeGrid};

use crate::calculator::{Resolution, RtdCalculator};
use crate::config::{TRACER_AMOUNT, TracerMode};
use crate::kernels::{IdealRtd, TanksInSeries};
use crate::model::{CurveSet, NonIdeality, ReactorKind};

fn grid(calc: &RtdCalculator, tanks: NonZeroU32, resolution: Resolution) -> RtdResult<TimeGrid> {
    calc.grid(ReactorKind::Cstr { tanks }, resolution)
}

/// Outlet concentration of a single well-mixed tank.
///
/// Pulse: `(C0 / V) exp(-t / tau)`. Step: `(C0 / Q) (1 - exp(-t / tau))`.
pub fn concentration(calc: &RtdCalculator, case: NonIdeality) -> RtdResult<ResponseCurve> {
    let grid = grid(calc, NonZeroU32::MIN, Resolution::Coarse)?;
    let tau = calc.residence_time_s(case);
    let volume = calc.config().volume_m3();
    let flow = calc.config().flow_m3_s();

    let curve = match calc.config().tracer() {
        TracerMode::Pulse => {
            ResponseCurve::sample(&grid, |t| (TRACER_AMOUNT / volume) * (-t / tau).exp())
        }
        TracerMode::Step => {
            ResponseCurve::sample(&grid, |t| (TRACER_AMOUNT / flow) * (1.0 - (-t / tau).exp()))
        }
    };
    Ok(curve)
}

pub fn exit_age(calc: &RtdCalculator, case: NonIdeality, tanks: NonZeroU32) -> RtdResult<CurveSet> {
    let grid = grid(calc, tanks, Resolution::Fine)?;
    let primary = match case {
        NonIdeality::Bypass => bypass_exit_age(calc, &grid)?,
        NonIdeality::Ideal | NonIdeality::DeadVolume => {
            let kernel = TanksInSeries::new(calc.residence_time_s(case), tanks);
            ResponseCurve::from_grid(&grid, kernel.exit_age(&grid))?
        }
    };
    CurveSet::with_ideal_reference(primary, case, || {
        let ideal = TanksInSeries::new(calc.constants().mean_s(), tanks);
        ResponseCurve::from_grid(&grid, ideal.exit_age(&grid))
    })
}

pub fn cumulative(
    calc: &RtdCalculator,
    case: NonIdeality,
    tanks: NonZeroU32,
) -> RtdResult<CurveSet> {
    let grid = grid(calc, tanks, Resolution::Fine)?;
    let primary = match case {
        NonIdeality::Bypass => bypass_cumulative(calc, &grid, tanks)?,
        NonIdeality::Ideal | NonIdeality::DeadVolume => {
            let kernel = TanksInSeries::new(calc.residence_time_s(case), tanks);
            ResponseCurve::from_grid(&grid, kernel.step_response(&grid))?
        }
    };
    CurveSet::with_ideal_reference(primary, case, || {
        let ideal = TanksInSeries::new(calc.constants().mean_s(), tanks);
        ResponseCurve::from_grid(&grid, ideal.step_response(&grid))
    })
}

/// Spike `(0, b)` for the unmixed tracer, then the decay of the tank fed
/// with `(1 - b) Q`: `((1 - b) Q)^2 / (V Q) exp(-t / tau_decay)`.
fn bypass_exit_age(calc: &RtdCalculator, grid: &TimeGrid) -> RtdResult<ResponseCurve> {
    let b = calc.params().bypass_fraction;
    let volume = calc.config().volume_m3();
    let flow = calc.config().flow_m3_s();
    let tau = calc.bypass_decay_time_s();
    let amplitude: Real = ((1.0 - b) * flow).powi(2) / (volume * flow);

    let mut curve = ResponseCurve::default();
    curve.push(0.0, b)?;
    for t in grid.points() {
        curve.push(t, amplitude * (-t / tau).exp())?;
    }
    Ok(curve)
}

/// Starts at the bypass floor `b`; keeps only step-response samples that
/// have reached it, so the curve never drops below `b`.
fn bypass_cumulative(
    calc: &RtdCalculator,
    grid: &TimeGrid,
    tanks: NonZeroU32,
) -> RtdResult<ResponseCurve> {
    let b = calc.params().bypass_fraction;
    let kernel = TanksInSeries::new(calc.bypass_decay_time_s(), tanks);

    let mut curve = ResponseCurve::default();
    curve.push(0.0, b)?;
    for (t, f) in grid.points().into_iter().zip(kernel.step_response(grid)) {
        if f >= b {
            curve.push(t, f)?;
        }
    }
    Ok(curve)
}
