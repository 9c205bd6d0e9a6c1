//! rtd-charts: chart-ready packaging of reactor response curves.
//!
//! A [`ChartResult`] pairs the computed curves with axis ranges, titles and
//! an annotation naming the physical cause of the deviation. It converts to
//! a [`ChartSpec`], the library-neutral description handed to a renderer,
//! and exports as JSON or CSV.

pub mod chart;
pub mod export;
pub mod spec;

pub use chart::{Annotation, AxisRanges, ChartRequest, ChartResult, package};
pub use export::{ExportError, ExportResult, result_to_json, spec_from_json, to_csv, to_json};
pub use spec::{AxisSpec, ChartSpec, DataSeries};
