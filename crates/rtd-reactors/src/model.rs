//! Selectors for reactor geometry, non-ideality and curve kind.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use rtd_core::{ResponseCurve, RtdError, RtdResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReactorKind {
    Pfr,
    /// `tanks` equal stirred tanks in series
    Cstr { tanks: NonZeroU32 },
}

impl ReactorKind {
    pub fn cstr(tanks: u32) -> RtdResult<Self> {
        NonZeroU32::new(tanks)
            .map(|tanks| Self::Cstr { tanks })
            .ok_or_else(|| RtdError::invalid("number of tanks in series must be >= 1"))
    }

    /// Plotted horizon as a multiple of the mean residence time.
    pub fn horizon_factor(&self) -> f64 {
        match self {
            Self::Pfr => 2.0,
            Self::Cstr { .. } => 5.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pfr => "PFR",
            Self::Cstr { .. } => "CSTR",
        }
    }
}

impl fmt::Display for ReactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pfr => write!(f, "PFR"),
            Self::Cstr { tanks } if tanks.get() == 1 => write!(f, "CSTR"),
            Self::Cstr { tanks } => write!(f, "{tanks}xCSTR"),
        }
    }
}

/// Deviation from ideal flow being modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonIdeality {
    Ideal,
    Bypass,
    DeadVolume,
}

impl NonIdeality {
    pub const ALL: [Self; 3] = [Self::Ideal, Self::Bypass, Self::DeadVolume];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::Bypass => "bypass",
            Self::DeadVolume => "dead_volume",
        }
    }
}

impl FromStr for NonIdeality {
    type Err = RtdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "ideal" => Ok(Self::Ideal),
            "bypass" => Ok(Self::Bypass),
            "dead_volume" | "deadvol" => Ok(Self::DeadVolume),
            other => Err(RtdError::invalid(format!("unrecognized non-ideality '{other}'"))),
        }
    }
}

impl fmt::Display for NonIdeality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Outlet tracer concentration
    Concentration,
    /// E(t)
    ExitAge,
    /// F(t)
    Cumulative,
}

impl CurveKind {
    pub const ALL: [Self; 3] = [Self::Concentration, Self::ExitAge, Self::Cumulative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concentration => "concentration",
            Self::ExitAge => "exit_age",
            Self::Cumulative => "cumulative",
        }
    }
}

impl FromStr for CurveKind {
    type Err = RtdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "concentration" | "c" => Ok(Self::Concentration),
            "exit_age" | "e" => Ok(Self::ExitAge),
            "cumulative" | "f" => Ok(Self::Cumulative),
            other => Err(RtdError::invalid(format!("unrecognized curve kind '{other}'"))),
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed curve and, for E(t)/F(t) of a non-ideal reactor, the ideal
/// reactor's curve for overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
    pub primary: ResponseCurve,
    pub reference: Option<ResponseCurve>,
}

impl CurveSet {
    pub fn single(primary: ResponseCurve) -> Self {
        Self {
            primary,
            reference: None,
        }
    }

    /// Attaches `reference()` unless the primary curve already is the ideal one.
    pub fn with_ideal_reference(
        primary: ResponseCurve,
        case: NonIdeality,
        reference: impl FnOnce() -> RtdResult<ResponseCurve>,
    ) -> RtdResult<Self> {
        let reference = match case {
            NonIdeality::Ideal => None,
            NonIdeality::Bypass | NonIdeality::DeadVolume => Some(reference()?),
        };
        Ok(Self { primary, reference })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tanks_rejected() {
        assert!(ReactorKind::cstr(0).is_err());
        assert_eq!(ReactorKind::cstr(3).unwrap().to_string(), "3xCSTR");
        assert_eq!(ReactorKind::cstr(1).unwrap().to_string(), "CSTR");
    }

    #[test]
    fn selectors_parse() {
        assert_eq!("dead-volume".parse::<NonIdeality>().unwrap(), NonIdeality::DeadVolume);
        assert_eq!("E".parse::<CurveKind>().unwrap(), CurveKind::ExitAge);
        assert_eq!("exit-age".parse::<CurveKind>().unwrap(), CurveKind::ExitAge);
        assert!("laminar".parse::<NonIdeality>().is_err());
    }

    #[test]
    fn ideal_case_skips_reference() {
        let set = CurveSet::with_ideal_reference(ResponseCurve::default(), NonIdeality::Ideal, || {
            panic!("reference must not be computed")
        })
        .unwrap();
        assert!(set.reference.is_none());
    }
}
