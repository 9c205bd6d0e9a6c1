//! rtd-reactors: residence time distribution responses of real reactors.
//!
//! Provides:
//! - Reactor and non-ideality configuration (validated at construction)
//! - Time-constant derivation (mean, bypass-adjusted, dead-volume-adjusted)
//! - Ideal RTD kernels (`IdealRtd` trait: plug flow, tanks in series)
//! - PFR and CSTR evaluators for concentration, E(t) and F(t) curves
//! - `RtdCalculator`, the single entry point dispatching over
//!   reactor x non-ideality x curve kind
//!
//! # Example
//!
//! ```
//! use rtd_core::units::{m3, m3ps};
//! use rtd_reactors::{
//!     CurveKind, NonIdeality, NonIdealityParameters, ReactorConfig, ReactorKind, RtdCalculator,
//!     TracerMode,
//! };
//!
//! let config = ReactorConfig::new(m3(20.0), m3ps(2.0), TracerMode::Step).unwrap();
//! let calc = RtdCalculator::new(config, NonIdealityParameters::default()).unwrap();
//! assert_eq!(calc.constants().bypass_s(), 12.5);
//!
//! let set = calc
//!     .curves(ReactorKind::Pfr, NonIdeality::Bypass, CurveKind::Concentration)
//!     .unwrap();
//! assert_eq!(set.primary.value_at(12.5), Some(100.0));
//! ```

pub mod calculator;
pub mod config;
pub mod cstr;
pub mod kernels;
pub mod model;
pub mod pfr;
pub mod time_constants;

// Re-exports for ergonomics
pub use calculator::{MAX_GRID_SAMPLES, RtdCalculator};
pub use config::{
    BypassDecay, GridSettings, NonIdealityParameters, ReactorConfig, TRACER_AMOUNT, TracerMode,
};
pub use kernels::{IdealRtd, Pfr, TanksInSeries};
pub use model::{CurveKind, CurveSet, NonIdeality, ReactorKind};
pub use time_constants::TimeConstants;
