//! Reactor response calculator: one validated configuration, every curve.

use std::num::NonZeroU32;

use rtd_core::{Real, RtdError, RtdResult, TimeGrid};
use tracing::debug;

use crate::config::{BypassDecay, GridSettings, NonIdealityParameters, ReactorConfig};
use crate::model::{CurveKind, CurveSet, NonIdeality, ReactorKind};
use crate::time_constants::TimeConstants;
use crate::{cstr, pfr};

/// Upper bound on the samples of any single curve.
pub const MAX_GRID_SAMPLES: usize = 10_000_000;

/// Grid resolution used by a curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Concentration curves
    Coarse,
    /// E(t) and F(t) curves
    Fine,
}

/// Validated reactor configuration with its derived time constants.
///
/// All validation happens in [`RtdCalculator::new`]; every curve evaluation
/// afterwards is a pure function of this value.
#[derive(Debug, Clone, PartialEq)]
pub struct RtdCalculator {
    config: ReactorConfig,
    params: NonIdealityParameters,
    grid: GridSettings,
    constants: TimeConstants,
}

impl RtdCalculator {
    pub fn new(config: ReactorConfig, params: NonIdealityParameters) -> RtdResult<Self> {
        Self::with_grid(config, params, GridSettings::default())
    }

    pub fn with_grid(
        config: ReactorConfig,
        params: NonIdealityParameters,
        grid: GridSettings,
    ) -> RtdResult<Self> {
        grid.validate()?;
        let constants = TimeConstants::derive(&config, &params)?;
        check_grid_size(&constants, &grid)?;
        debug!(
            volume_m3 = config.volume_m3(),
            flow_m3_s = config.flow_m3_s(),
            tracer = %config.tracer(),
            tau_s = constants.mean_s(),
            tau_bypass_s = constants.bypass_s(),
            tau_dead_s = constants.dead_volume_s(),
            "derived residence times"
        );
        Ok(Self {
            config,
            params,
            grid,
            constants,
        })
    }

    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    pub fn params(&self) -> &NonIdealityParameters {
        &self.params
    }

    pub fn grid_settings(&self) -> &GridSettings {
        &self.grid
    }

    pub fn constants(&self) -> &TimeConstants {
        &self.constants
    }

    /// Residence time of the non-ideal reactor for `case`.
    pub fn residence_time_s(&self, case: NonIdeality) -> Real {
        match case {
            NonIdeality::Ideal => self.constants.mean_s(),
            NonIdeality::Bypass => self.constants.bypass_s(),
            NonIdeality::DeadVolume => self.constants.dead_volume_s(),
        }
    }

    /// Time constant of the CSTR bypass E(t)/F(t) decay.
    pub fn bypass_decay_time_s(&self) -> Real {
        match self.params.bypass_decay {
            BypassDecay::DeadVolume => self.constants.dead_volume_s(),
            BypassDecay::Bypass => self.constants.bypass_s(),
        }
    }

    /// End of the plotted time axis [s].
    pub fn horizon_s(&self, reactor: ReactorKind) -> Real {
        self.constants.mean_s() * reactor.horizon_factor()
    }

    pub(crate) fn grid(&self, reactor: ReactorKind, resolution: Resolution) -> RtdResult<TimeGrid> {
        let dt = match resolution {
            Resolution::Coarse => self.grid.coarse_dt,
            Resolution::Fine => self.grid.fine_dt,
        };
        TimeGrid::new(dt, self.horizon_s(reactor))
    }

    /// Evaluates one (reactor, non-ideality, curve kind) combination.
    pub fn curves(
        &self,
        reactor: ReactorKind,
        case: NonIdeality,
        kind: CurveKind,
    ) -> RtdResult<CurveSet> {
        debug!(%reactor, %case, %kind, "evaluating response curve");
        match (reactor, kind) {
            (ReactorKind::Pfr, CurveKind::Concentration) => {
                Ok(CurveSet::single(pfr::concentration(self, case)?))
            }
            (ReactorKind::Pfr, CurveKind::ExitAge) => pfr::exit_age(self, case),
            (ReactorKind::Pfr, CurveKind::Cumulative) => pfr::cumulative(self, case),
            (ReactorKind::Cstr { .. }, CurveKind::Concentration) => {
                Ok(CurveSet::single(cstr::concentration(self, case)?))
            }
            (ReactorKind::Cstr { tanks }, CurveKind::ExitAge) => cstr::exit_age(self, case, tanks),
            (ReactorKind::Cstr { tanks }, CurveKind::Cumulative) => {
                cstr::cumulative(self, case, tanks)
            }
        }
    }
}

/// Rejects configurations whose longest horizon needs more than
/// [`MAX_GRID_SAMPLES`] samples at either resolution.
fn check_grid_size(constants: &TimeConstants, grid: &GridSettings) -> RtdResult<()> {
    let reactors = [
        ReactorKind::Pfr,
        ReactorKind::Cstr {
            tanks: NonZeroU32::MIN,
        },
    ];
    for reactor in reactors {
        let horizon = constants.mean_s() * reactor.horizon_factor();
        for dt in [grid.coarse_dt, grid.fine_dt] {
            let samples = (horizon / dt).ceil();
            if !(samples <= MAX_GRID_SAMPLES as Real) {
                return Err(RtdError::invalid(format!(
                    "{} horizon of {horizon} s at step {dt} s needs {samples} samples \
                     (limit {MAX_GRID_SAMPLES})",
                    reactor.label()
                )));
            }
        }
    }
    Ok(())
}
