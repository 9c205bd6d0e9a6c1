//! Scenario schema definitions.

use rtd_reactors::{BypassDecay, CurveKind, NonIdeality, TracerMode};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub reactor: ReactorDef,
    #[serde(default)]
    pub non_ideality: NonIdealityDef,
    #[serde(default)]
    pub grid: GridDef,
    #[serde(default = "default_tanks_in_series")]
    pub tanks_in_series: u32,
    /// Empty means every reactor x non-ideality x curve combination.
    #[serde(default)]
    pub charts: Vec<ChartDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactorDef {
    pub volume_m3: f64,
    pub flow_m3_s: f64,
    pub tracer: TracerMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NonIdealityDef {
    #[serde(default = "default_bypass_fraction")]
    pub bypass_fraction: f64,
    #[serde(default = "default_dead_volume_m3")]
    pub dead_volume_m3: f64,
    #[serde(default)]
    pub bypass_decay: BypassDecay,
}

impl Default for NonIdealityDef {
    fn default() -> Self {
        Self {
            bypass_fraction: default_bypass_fraction(),
            dead_volume_m3: default_dead_volume_m3(),
            bypass_decay: BypassDecay::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridDef {
    #[serde(default = "default_coarse_dt_s")]
    pub coarse_dt_s: f64,
    #[serde(default = "default_fine_dt_s")]
    pub fine_dt_s: f64,
}

impl Default for GridDef {
    fn default() -> Self {
        Self {
            coarse_dt_s: default_coarse_dt_s(),
            fine_dt_s: default_fine_dt_s(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReactorTypeDef {
    Pfr,
    Cstr,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChartDef {
    pub reactor: ReactorTypeDef,
    pub non_ideality: NonIdeality,
    pub curve: CurveKind,
}

fn default_tanks_in_series() -> u32 {
    1
}

fn default_bypass_fraction() -> f64 {
    0.2
}

fn default_dead_volume_m3() -> f64 {
    10.0
}

fn default_coarse_dt_s() -> f64 {
    0.25
}

fn default_fine_dt_s() -> f64 {
    0.01
}
