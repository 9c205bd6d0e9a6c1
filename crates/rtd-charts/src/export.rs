//! JSON and CSV export of packaged charts.

use std::fmt::{self, Write as _};

use crate::chart::ChartResult;
use crate::spec::ChartSpec;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] fmt::Error),
}

/// Pretty-printed chart specification.
pub fn to_json(spec: &ChartSpec) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(spec)?)
}

/// Full packaged result including request and raw curves.
pub fn result_to_json(chart: &ChartResult) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(chart)?)
}

pub fn spec_from_json(json: &str) -> ExportResult<ChartSpec> {
    Ok(serde_json::from_str(json)?)
}

/// `series,time_s,value` rows, primary curve first.
pub fn to_csv(chart: &ChartResult) -> ExportResult<String> {
    let mut csv = String::from("series,time_s,value\n");
    write_rows(&mut csv, &chart.primary_label, &chart.primary)?;
    if let Some(reference) = &chart.reference {
        write_rows(&mut csv, "Ideal", reference)?;
    }
    Ok(csv)
}

fn write_rows(out: &mut String, label: &str, curve: &rtd_core::ResponseCurve) -> fmt::Result {
    for (t, v) in curve.points() {
        writeln!(out, "{label},{t},{v}")?;
    }
    Ok(())
}
