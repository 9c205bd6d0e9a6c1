//! Reactor, non-ideality and grid configuration.

use std::fmt;
use std::str::FromStr;

use rtd_core::units::{Volume, VolumeRate, as_m3, as_m3ps, m3, s};
use rtd_core::{Real, RtdError, RtdResult, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Normalized tracer amount injected (pulse) or fed (step).
pub const TRACER_AMOUNT: Real = 100.0;

/// How the tracer enters the reactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TracerMode {
    /// Fixed amount injected at t=0
    Pulse,
    /// Inlet concentration switched on at t=0 and held
    Step,
}

impl FromStr for TracerMode {
    type Err = RtdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pulse" => Ok(Self::Pulse),
            "step" => Ok(Self::Step),
            other => Err(RtdError::invalid(format!(
                "unrecognized tracer mode '{other}' (expected 'pulse' or 'step')"
            ))),
        }
    }
}

impl fmt::Display for TracerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pulse => write!(f, "pulse"),
            Self::Step => write!(f, "step"),
        }
    }
}

/// Reactor volume, volumetric flow and tracer mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactorConfig {
    volume: Volume,
    flow_rate: VolumeRate,
    tracer: TracerMode,
}

impl ReactorConfig {
    pub fn new(volume: Volume, flow_rate: VolumeRate, tracer: TracerMode) -> RtdResult<Self> {
        ensure_positive(as_m3(volume), "reactor volume")?;
        ensure_positive(as_m3ps(flow_rate), "flow rate")?;
        Ok(Self {
            volume,
            flow_rate,
            tracer,
        })
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn flow_rate(&self) -> VolumeRate {
        self.flow_rate
    }

    pub fn tracer(&self) -> TracerMode {
        self.tracer
    }

    pub fn volume_m3(&self) -> Real {
        as_m3(self.volume)
    }

    pub fn flow_m3_s(&self) -> Real {
        as_m3ps(self.flow_rate)
    }

    /// V / Q
    pub fn mean_residence_time(&self) -> rtd_core::units::Time {
        s(self.volume_m3() / self.flow_m3_s())
    }
}

/// Which time constant drives the CSTR bypass E(t)/F(t) decay.
///
/// The reference curves decay with the dead-volume residence time even in
/// the bypass case. For a tank whose inflow is reduced to `(1 - b) Q` the
/// consistent constant is the bypass residence time `V / ((1 - b) Q)`;
/// select [`BypassDecay::Bypass`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BypassDecay {
    #[default]
    DeadVolume,
    Bypass,
}

impl FromStr for BypassDecay {
    type Err = RtdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "dead_volume" => Ok(Self::DeadVolume),
            "bypass" => Ok(Self::Bypass),
            other => Err(RtdError::invalid(format!(
                "unrecognized bypass decay '{other}'"
            ))),
        }
    }
}

/// Flow bypass and stagnant volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonIdealityParameters {
    /// Fraction of the feed short-circuiting the reactor, in [0, 1)
    pub bypass_fraction: Real,
    /// Stagnant volume, less than the reactor volume
    pub dead_volume: Volume,
    pub bypass_decay: BypassDecay,
}

impl Default for NonIdealityParameters {
    fn default() -> Self {
        Self {
            bypass_fraction: 0.2,
            dead_volume: m3(10.0),
            bypass_decay: BypassDecay::default(),
        }
    }
}

impl NonIdealityParameters {
    pub fn dead_volume_m3(&self) -> Real {
        as_m3(self.dead_volume)
    }

    pub fn validate(&self, config: &ReactorConfig) -> RtdResult<()> {
        let b = ensure_finite(self.bypass_fraction, "bypass fraction")?;
        if !(0.0..1.0).contains(&b) {
            return Err(RtdError::invalid(format!(
                "bypass fraction must lie in [0, 1) (got {b})"
            )));
        }

        let dead = ensure_finite(self.dead_volume_m3(), "dead volume")?;
        if dead < 0.0 {
            return Err(RtdError::invalid(format!(
                "dead volume must be >= 0 (got {dead})"
            )));
        }
        if dead >= config.volume_m3() {
            return Err(RtdError::invalid(format!(
                "dead volume {dead} m3 must be smaller than reactor volume {} m3",
                config.volume_m3()
            )));
        }
        Ok(())
    }
}

/// Sampling steps for the time grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Step for concentration curves [s]
    pub coarse_dt: Real,
    /// Step for E(t) and F(t) curves [s]
    pub fine_dt: Real,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            coarse_dt: 0.25,
            fine_dt: 0.01,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> RtdResult<()> {
        ensure_positive(self.coarse_dt, "coarse grid step")?;
        ensure_positive(self.fine_dt, "fine grid step")?;
        Ok(())
    }
}
