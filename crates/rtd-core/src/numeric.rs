use crate::RtdError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RtdError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RtdError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive, otherwise an invalid configuration.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, RtdError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RtdError::invalid(format!("{what} must be > 0 (got {v})")))
    }
}

/// True when `v` is a whole number within the default tolerance.
pub fn is_whole(v: Real) -> bool {
    nearly_equal(v, v.round(), Tolerances::default())
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(v: Real, places: i32) -> Real {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(2.0, "flow").is_ok());
        let err = ensure_positive(0.0, "flow").unwrap_err();
        assert!(matches!(err, RtdError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("flow"));
        assert!(ensure_positive(-1.0, "flow").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "flow"),
            Err(RtdError::NonFinite { .. })
        ));
    }

    #[test]
    fn whole_numbers() {
        assert!(is_whole(10.0));
        assert!(is_whole(20.0 / 2.0));
        assert!(!is_whole(12.5));
        assert!(!is_whole(20.0 / 1.6 + 0.001));
    }

    #[test]
    fn rounding_to_two_places() {
        assert_eq!(round_to(12.5, 2), 12.5);
        assert_eq!(round_to(8.333_333, 2), 8.33);
        assert_eq!(round_to(16.666_666, 2), 16.67);
    }
}
