//! Derived workout metrics.

use crate::error::WorkoutError;

/// Running pace in minutes per kilometre.
pub fn pace(distance_km: f64, duration_min: f64) -> Result<f64, WorkoutError> {
    check(distance_km, duration_min)?;
    derived(duration_min / distance_km, distance_km, duration_min)
}

/// Cycling speed in kilometres per hour.
pub fn speed(distance_km: f64, duration_min: f64) -> Result<f64, WorkoutError> {
    check(distance_km, duration_min)?;
    derived(distance_km / (duration_min / 60.0), distance_km, duration_min)
}

pub(crate) fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

pub(crate) fn is_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn check(distance_km: f64, duration_min: f64) -> Result<(), WorkoutError> {
    if is_positive(distance_km) && is_positive(duration_min) {
        Ok(())
    } else {
        Err(WorkoutError::InvalidMetric {
            distance_km,
            duration_min,
        })
    }
}

/// Extreme magnitudes can overflow to infinity or underflow to zero, neither
/// of which survives a JSON snapshot.
fn derived(value: f64, distance_km: f64, duration_min: f64) -> Result<f64, WorkoutError> {
    if is_positive(value) {
        Ok(value)
    } else {
        Err(WorkoutError::InvalidMetric {
            distance_km,
            duration_min,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pace_of_a_short_run() {
        let p = pace(5.2, 24.0).unwrap();
        assert!((p - 4.615).abs() < 1e-3, "pace={p}");
    }

    #[test]
    fn speed_of_a_long_ride() {
        let s = speed(27.0, 95.0).unwrap();
        assert!((s - 17.05).abs() < 1e-2, "speed={s}");
    }

    #[test]
    fn rejects_non_positive_inputs() {
        for (d, t) in [(0.0, 10.0), (5.0, 0.0), (-1.0, 10.0), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
            assert!(matches!(pace(d, t), Err(WorkoutError::InvalidMetric { .. })));
            assert!(matches!(speed(d, t), Err(WorkoutError::InvalidMetric { .. })));
        }
    }

    #[test]
    fn rejects_results_that_overflow_or_underflow() {
        assert!(matches!(pace(1e-320, 1e10), Err(WorkoutError::InvalidMetric { .. })));
        assert!(matches!(pace(1e300, 1e-300), Err(WorkoutError::InvalidMetric { .. })));
        assert!(matches!(speed(1e300, 1e-300), Err(WorkoutError::InvalidMetric { .. })));
        assert!(matches!(speed(1e-320, 1e10), Err(WorkoutError::InvalidMetric { .. })));
    }

    proptest! {
        #[test]
        fn pace_and_speed_are_reciprocal(d in 0.1f64..500.0, t in 0.1f64..2000.0) {
            let p = pace(d, t).unwrap();
            let s = speed(d, t).unwrap();
            prop_assert!((p * s - 60.0).abs() < 1e-9 * 60.0);
        }
    }
}
