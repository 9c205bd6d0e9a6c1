//! Scenario validation.

use std::collections::HashSet;

use crate::schema::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported scenario version {version} (latest is {LATEST_VERSION})")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Duplicate chart entry: {chart}")]
    DuplicateChart { chart: String },
}

fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason,
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be finite and > 0"));
    }
    Ok(())
}

/// Checks a scenario before anything is computed from it.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(invalid("name", &scenario.name, "must not be empty"));
    }

    let reactor = &scenario.reactor;
    positive("reactor.volume_m3", reactor.volume_m3)?;
    positive("reactor.flow_m3_s", reactor.flow_m3_s)?;

    let ni = &scenario.non_ideality;
    let b = ni.bypass_fraction;
    if !b.is_finite() || !(0.0..1.0).contains(&b) {
        return Err(invalid(
            "non_ideality.bypass_fraction",
            b,
            "must lie in [0, 1)",
        ));
    }
    let dead = ni.dead_volume_m3;
    if !dead.is_finite() || dead < 0.0 || dead >= reactor.volume_m3 {
        return Err(invalid(
            "non_ideality.dead_volume_m3",
            dead,
            "must be >= 0 and smaller than the reactor volume",
        ));
    }

    positive("grid.coarse_dt_s", scenario.grid.coarse_dt_s)?;
    positive("grid.fine_dt_s", scenario.grid.fine_dt_s)?;

    if scenario.tanks_in_series == 0 {
        return Err(invalid("tanks_in_series", 0, "must be >= 1"));
    }

    let mut seen = HashSet::new();
    for chart in &scenario.charts {
        if !seen.insert(chart) {
            return Err(ValidationError::DuplicateChart {
                chart: format!(
                    "{:?} {} {}",
                    chart.reactor, chart.non_ideality, chart.curve
                ),
            });
        }
    }

    Ok(())
}
