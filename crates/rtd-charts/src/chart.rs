//! Result packaging: curves plus presentation metadata.

use std::fmt;

use rtd_core::{Real, ResponseCurve, RtdResult};
use rtd_reactors::{CurveKind, CurveSet, NonIdeality, ReactorKind, RtdCalculator, TRACER_AMOUNT};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Headroom above the tallest value on the value axis.
const VALUE_HEADROOM: Real = 1.1;

/// One (reactor, non-ideality, curve kind) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartRequest {
    pub reactor: ReactorKind,
    pub non_ideality: NonIdeality,
    pub curve: CurveKind,
}

impl ChartRequest {
    pub fn new(reactor: ReactorKind, non_ideality: NonIdeality, curve: CurveKind) -> Self {
        Self {
            reactor,
            non_ideality,
            curve,
        }
    }

    /// Every non-ideality x curve kind for `reactor`.
    pub fn all(reactor: ReactorKind) -> Vec<Self> {
        NonIdeality::ALL
            .into_iter()
            .flat_map(|case| {
                CurveKind::ALL
                    .into_iter()
                    .map(move |curve| Self::new(reactor, case, curve))
            })
            .collect()
    }

    /// File-name friendly identifier, e.g. `pfr-bypass-concentration`.
    pub fn slug(&self) -> String {
        let reactor = match self.reactor {
            ReactorKind::Pfr => "pfr".to_string(),
            ReactorKind::Cstr { tanks } if tanks.get() == 1 => "cstr".to_string(),
            ReactorKind::Cstr { tanks } => format!("cstr{tanks}"),
        };
        format!(
            "{reactor}-{}-{}",
            self.non_ideality.as_str().replace('_', "-"),
            self.curve.as_str().replace('_', "-")
        )
    }
}

impl fmt::Display for ChartRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.reactor, self.non_ideality, self.curve)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRanges {
    pub time: (Real, Real),
    pub value: (Real, Real),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub x: Real,
    pub y: Real,
}

/// Packaged curves for one chart. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResult {
    pub request: ChartRequest,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub primary_label: String,
    pub primary: ResponseCurve,
    /// Ideal reactor with the same volume and flow
    pub reference: Option<ResponseCurve>,
    pub axes: AxisRanges,
    pub show_value_ticks: bool,
    pub annotation: Annotation,
}

/// Evaluates `request` and wraps the curves with display metadata.
pub fn package(calc: &RtdCalculator, request: ChartRequest) -> RtdResult<ChartResult> {
    let CurveSet { primary, reference } =
        calc.curves(request.reactor, request.non_ideality, request.curve)?;

    let peak = peak_value(&primary, reference.as_ref());
    let value_top = match (request.reactor, request.curve) {
        (ReactorKind::Pfr, CurveKind::Concentration) => TRACER_AMOUNT * VALUE_HEADROOM,
        _ => peak * VALUE_HEADROOM,
    };
    let time_end = calc.horizon_s(request.reactor);

    let (text, x_fraction) = annotation_text(&request);
    let annotation = Annotation {
        text: text.to_string(),
        x: time_end * x_fraction,
        y: 0.5 * peak,
    };

    let show_value_ticks = !matches!(
        (request.reactor, request.curve),
        (ReactorKind::Pfr, CurveKind::Concentration | CurveKind::ExitAge)
    );

    let primary_label = match request.non_ideality {
        NonIdeality::Ideal => "Ideal",
        NonIdeality::Bypass | NonIdeality::DeadVolume => "Real",
    };

    debug!(
        chart = %request,
        points = primary.len(),
        reference_points = reference.as_ref().map_or(0, ResponseCurve::len),
        "packaged chart"
    );

    Ok(ChartResult {
        request,
        title: title(&request),
        x_title: "Time (s)".to_string(),
        y_title: y_title(request.curve).to_string(),
        primary_label: primary_label.to_string(),
        primary,
        reference,
        axes: AxisRanges {
            time: (0.0, time_end),
            value: (0.0, value_top),
        },
        show_value_ticks,
        annotation,
    })
}

/// Largest value across both curves; 1 when nothing is positive.
fn peak_value(primary: &ResponseCurve, reference: Option<&ResponseCurve>) -> Real {
    let peak = primary
        .max_value()
        .into_iter()
        .chain(reference.and_then(ResponseCurve::max_value))
        .fold(0.0, Real::max);
    if peak > 0.0 { peak } else { 1.0 }
}

/// Annotation text and its position as a fraction of the time axis.
fn annotation_text(request: &ChartRequest) -> (&'static str, Real) {
    match (request.reactor, request.non_ideality) {
        (ReactorKind::Pfr, NonIdeality::Bypass) => {
            let x = if request.curve == CurveKind::Concentration {
                0.275
            } else {
                0.25
            };
            ("Flow bypass, delayed exit", x)
        }
        (ReactorKind::Pfr, NonIdeality::DeadVolume) => ("Dead volume, early exit", 0.75),
        (ReactorKind::Pfr, NonIdeality::Ideal) => ("Ideal plug flow", 0.25),
        (ReactorKind::Cstr { .. }, NonIdeality::Bypass) => ("Flow bypass, gentler gradient", 0.6),
        (ReactorKind::Cstr { .. }, NonIdeality::DeadVolume) => {
            ("Dead volume, steeper gradient", 0.6)
        }
        (ReactorKind::Cstr { .. }, NonIdeality::Ideal) => ("Ideal mixing", 0.6),
    }
}

fn title(request: &ChartRequest) -> String {
    let reactor = request.reactor.label();
    match request.curve {
        CurveKind::Concentration => {
            let prefix = match request.non_ideality {
                NonIdeality::Ideal => "Ideal",
                NonIdeality::Bypass | NonIdeality::DeadVolume => "Real",
            };
            format!("{prefix} {reactor}: Plot of Concentration against Time")
        }
        CurveKind::ExitAge => format!("{reactor}: Plot of E against Time"),
        CurveKind::Cumulative => format!("{reactor}: Plot of F against Time"),
    }
}

fn y_title(curve: CurveKind) -> &'static str {
    match curve {
        CurveKind::Concentration => "Concentration (mol/m3)",
        CurveKind::ExitAge => "Exit Age Function (1/s)",
        CurveKind::Cumulative => "Cumulative Distribution Function",
    }
}
