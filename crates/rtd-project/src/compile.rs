//! Turns a validated scenario into a calculator and chart requests.

use rtd_charts::{ChartRequest, ChartResult, package};
use rtd_core::RtdResult;
use rtd_core::units::{m3, m3ps};
use rtd_reactors::{
    GridSettings, NonIdealityParameters, ReactorConfig, ReactorKind, RtdCalculator,
};
use tracing::info;

use crate::ProjectResult;
use crate::schema::{ReactorTypeDef, Scenario};
use crate::validate::validate_scenario;

pub fn build_calculator(scenario: &Scenario) -> RtdResult<RtdCalculator> {
    let config = ReactorConfig::new(
        m3(scenario.reactor.volume_m3),
        m3ps(scenario.reactor.flow_m3_s),
        scenario.reactor.tracer,
    )?;
    let params = NonIdealityParameters {
        bypass_fraction: scenario.non_ideality.bypass_fraction,
        dead_volume: m3(scenario.non_ideality.dead_volume_m3),
        bypass_decay: scenario.non_ideality.bypass_decay,
    };
    let grid = GridSettings {
        coarse_dt: scenario.grid.coarse_dt_s,
        fine_dt: scenario.grid.fine_dt_s,
    };
    RtdCalculator::with_grid(config, params, grid)
}

/// Requested charts, or the full catalogue for a PFR and the configured
/// CSTR when the scenario lists none.
pub fn chart_requests(scenario: &Scenario) -> RtdResult<Vec<ChartRequest>> {
    let cstr = ReactorKind::cstr(scenario.tanks_in_series)?;
    if scenario.charts.is_empty() {
        let mut all = ChartRequest::all(ReactorKind::Pfr);
        all.extend(ChartRequest::all(cstr));
        return Ok(all);
    }
    Ok(scenario
        .charts
        .iter()
        .map(|def| {
            let reactor = match def.reactor {
                ReactorTypeDef::Pfr => ReactorKind::Pfr,
                ReactorTypeDef::Cstr => cstr,
            };
            ChartRequest::new(reactor, def.non_ideality, def.curve)
        })
        .collect())
}

/// Validates, then packages every requested chart.
pub fn render(scenario: &Scenario) -> ProjectResult<Vec<ChartResult>> {
    validate_scenario(scenario)?;
    let calc = build_calculator(scenario)?;
    let requests = chart_requests(scenario)?;
    info!(scenario = %scenario.name, charts = requests.len(), "rendering scenario");
    let charts = requests
        .into_iter()
        .map(|request| package(&calc, request))
        .collect::<RtdResult<Vec<_>>>()?;
    Ok(charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use rtd_reactors::{CurveKind, NonIdeality, TracerMode};

    fn scenario() -> Scenario {
        Scenario {
            version: LATEST_VERSION,
            name: "reference".to_string(),
            reactor: ReactorDef {
                volume_m3: 20.0,
                flow_m3_s: 2.0,
                tracer: TracerMode::Step,
            },
            non_ideality: NonIdealityDef::default(),
            grid: GridDef::default(),
            tanks_in_series: 3,
            charts: Vec::new(),
        }
    }

    #[test]
    fn builds_calculator_with_derived_times() {
        let calc = build_calculator(&scenario()).unwrap();
        let tc = calc.constants();
        assert!((tc.mean_s() - 10.0).abs() < 1e-12);
        assert!((tc.bypass_s() - 12.5).abs() < 1e-12);
        assert!((tc.dead_volume_s() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn empty_chart_list_expands_to_catalogue() {
        let requests = chart_requests(&scenario()).unwrap();
        assert_eq!(requests.len(), 18);
        assert!(
            requests
                .iter()
                .any(|r| r.reactor == ReactorKind::cstr(3).unwrap())
        );
    }

    #[test]
    fn cstr_charts_use_configured_tanks() {
        let mut s = scenario();
        s.charts = vec![ChartDef {
            reactor: ReactorTypeDef::Cstr,
            non_ideality: NonIdeality::Ideal,
            curve: CurveKind::Cumulative,
        }];
        let requests = chart_requests(&s).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].reactor, ReactorKind::cstr(3).unwrap());
    }

    #[test]
    fn render_rejects_invalid_scenario() {
        let mut s = scenario();
        s.reactor.volume_m3 = -1.0;
        assert!(matches!(
            render(&s),
            Err(crate::ProjectError::Validation(_))
        ));
    }

    #[test]
    fn render_packages_every_request() {
        let charts = render(&scenario()).unwrap();
        assert_eq!(charts.len(), 18);
    }
}
