//! Residence-time constants of the ideal and non-ideal reactor.

use rtd_core::units::{Time, as_s, s};
use rtd_core::{Real, RtdResult, ensure_finite, ensure_positive};

use crate::config::{NonIdealityParameters, ReactorConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeConstants {
    /// V / Q
    pub mean: Time,
    /// V / ((1 - b) Q)
    pub bypass: Time,
    /// (V - V_dead) / Q
    pub dead_volume: Time,
}

impl TimeConstants {
    pub fn derive(config: &ReactorConfig, params: &NonIdealityParameters) -> RtdResult<Self> {
        params.validate(config)?;

        let v = config.volume_m3();
        let q = ensure_positive(config.flow_m3_s(), "flow rate")?;
        let b = params.bypass_fraction;

        let mean = ensure_finite(v / q, "mean residence time")?;
        let bypass = ensure_finite(v / ((1.0 - b) * q), "bypass residence time")?;
        let dead_volume = ensure_finite(
            (v - params.dead_volume_m3()) / q,
            "dead-volume residence time",
        )?;

        Ok(Self {
            mean: s(mean),
            bypass: s(bypass),
            dead_volume: s(dead_volume),
        })
    }

    pub fn mean_s(&self) -> Real {
        as_s(self.mean)
    }

    pub fn bypass_s(&self) -> Real {
        as_s(self.bypass)
    }

    pub fn dead_volume_s(&self) -> Real {
        as_s(self.dead_volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TracerMode;
    use rtd_core::units::{m3, m3ps};

    #[test]
    fn reference_reactor_constants() {
        let config = ReactorConfig::new(m3(20.0), m3ps(2.0), TracerMode::Step).unwrap();
        let tc = TimeConstants::derive(&config, &NonIdealityParameters::default()).unwrap();
        assert_eq!(tc.mean_s(), 10.0);
        assert_eq!(tc.bypass_s(), 12.5);
        assert_eq!(tc.dead_volume_s(), 5.0);
    }

    #[test]
    fn no_bypass_no_dead_volume_collapses_to_mean() {
        let config = ReactorConfig::new(m3(8.0), m3ps(4.0), TracerMode::Pulse).unwrap();
        let params = NonIdealityParameters {
            bypass_fraction: 0.0,
            dead_volume: m3(0.0),
            ..Default::default()
        };
        let tc = TimeConstants::derive(&config, &params).unwrap();
        assert_eq!(tc.mean_s(), 2.0);
        assert_eq!(tc.bypass_s(), 2.0);
        assert_eq!(tc.dead_volume_s(), 2.0);
    }

    #[test]
    fn litre_inputs_give_same_constants() {
        use uom::si::volume::liter;
        use uom::si::volume_rate::liter_per_second;
        let config = ReactorConfig::new(
            rtd_core::Volume::new::<liter>(20_000.0),
            rtd_core::VolumeRate::new::<liter_per_second>(2_000.0),
            TracerMode::Step,
        )
        .unwrap();
        let tc = TimeConstants::derive(&config, &NonIdealityParameters::default()).unwrap();
        assert!((tc.mean_s() - 10.0).abs() < 1e-9);
        assert!((tc.dead_volume_s() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn non_physical_dead_volume_fails() {
        let config = ReactorConfig::new(m3(5.0), m3ps(1.0), TracerMode::Step).unwrap();
        assert!(TimeConstants::derive(&config, &NonIdealityParameters::default()).is_err());
    }
}
