// rtd-core/src/units.rs

use uom::si::f64::{Time as UomTime, Volume as UomVolume, VolumeRate as UomVolumeRate};

// Public canonical unit types (SI, f64)
pub type Time = UomTime;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn as_m3(v: Volume) -> f64 {
    use uom::si::volume::cubic_meter;
    v.get::<cubic_meter>()
}

#[inline]
pub fn as_m3ps(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::cubic_meter_per_second;
    q.get::<cubic_meter_per_second>()
}

#[inline]
pub fn as_s(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _v = m3(20.0);
        let _q = m3ps(2.0);
        let _t = s(10.0);
    }

    #[test]
    fn accessors_round_trip_si_values() {
        assert_eq!(as_m3(m3(20.0)), 20.0);
        assert_eq!(as_m3ps(m3ps(2.0)), 2.0);
        assert_eq!(as_s(s(12.5)), 12.5);
    }

    #[test]
    fn litres_convert_to_cubic_metres() {
        use uom::si::volume::liter;
        let v = Volume::new::<liter>(500.0);
        assert!((as_m3(v) - 0.5).abs() < 1e-12);
    }
}
