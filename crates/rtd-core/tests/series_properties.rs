//! Property tests for grid sampling and marker splicing.

use proptest::prelude::*;
use rtd_core::{ResponseCurve, TimeGrid};

proptest! {
    #[test]
    fn splice_keeps_lengths_and_order(
        dt in 0.05_f64..1.0,
        end in 1.0_f64..50.0,
        marker_t in 0.0_f64..60.0,
        marker_v in 0.0_f64..100.0,
    ) {
        let grid = TimeGrid::new(dt, end).unwrap();
        let mut curve = ResponseCurve::sample(&grid, |t| (-t).exp());
        let before = curve.len();

        let idx = curve.splice_marker(marker_t, marker_v);

        prop_assert_eq!(curve.len(), before + 1);
        prop_assert_eq!(curve.time_s().len(), curve.values().len());
        prop_assert!(curve.is_ascending());
        prop_assert_eq!(curve.time_s()[idx], marker_t);
        prop_assert_eq!(curve.values()[idx], marker_v);
    }

    #[test]
    fn grid_points_stay_below_end(dt in 0.01_f64..2.0, end in 0.5_f64..100.0) {
        let grid = TimeGrid::new(dt, end).unwrap();
        let pts = grid.points();
        prop_assert_eq!(pts.len(), grid.len());
        if let Some(last) = pts.last() {
            prop_assert!(*last < end + 1e-9 * end);
        }
    }
}
