//! rtd-core: stable foundation for the real-reactor RTD workspace.
//!
//! Contains:
//! - units (uom SI volume, flow and time types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - series (uniform time grids and response curves)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod series;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RtdError, RtdResult};
pub use numeric::*;
pub use series::{ResponseCurve, TimeGrid};
pub use units::*;
