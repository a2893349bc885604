//! Raw workout form values and their coercion to numbers.

use crate::error::WorkoutError;
use crate::types::{Workout, WorkoutKind};

/// Field values exactly as typed into the workout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Form values coerced to numbers, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission {
    pub kind: WorkoutKind,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Cadence for running, elevation gain for cycling.
    pub extra: f64,
}

impl FormValues {
    /// Prefill for editing `workout`. The field of the other kind stays empty.
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            kind: workout.kind().to_string(),
            distance: workout.distance_km().to_string(),
            duration: workout.duration_min().to_string(),
            cadence: workout
                .cadence_spm()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            elevation: workout
                .elevation_gain_m()
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    /// Coerces the raw strings.
    ///
    /// Only the kind can fail here; numbers that do not parse become NaN and
    /// are rejected later by the store together with the other bad fields.
    pub fn parse(&self) -> Result<Submission, WorkoutError> {
        let kind: WorkoutKind = self.kind.parse()?;
        let extra = match kind {
            WorkoutKind::Running => &self.cadence,
            WorkoutKind::Cycling => &self.elevation,
        };
        Ok(Submission {
            kind,
            distance_km: coerce(&self.distance),
            duration_min: coerce(&self.duration),
            extra: coerce(extra),
        })
    }
}

/// Number-input coercion: blank is 0, garbage is NaN.
fn coerce(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        0.0
    } else {
        raw.parse().unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;
    use crate::store::WorkoutStore;
    use crate::types::Coordinates;

    fn form(kind: &str, distance: &str, duration: &str, cadence: &str, elevation: &str) -> FormValues {
        FormValues {
            kind: kind.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: elevation.to_string(),
        }
    }

    #[test]
    fn coerces_numbers_like_a_number_input() {
        assert_eq!(coerce(" 5.2 "), 5.2);
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("   "), 0.0);
        assert!(coerce("five").is_nan());
    }

    #[test]
    fn picks_the_field_matching_the_kind() {
        let run = form("running", "5", "25", "170", "999").parse().unwrap();
        assert_eq!(run.kind, WorkoutKind::Running);
        assert_eq!(run.extra, 170.0);

        let ride = form("Cycling", "20", "60", "170", "300").parse().unwrap();
        assert_eq!(ride.kind, WorkoutKind::Cycling);
        assert_eq!(ride.extra, 300.0);
    }

    #[test]
    fn unknown_kind_is_a_validation_error() {
        let err = form("rowing", "5", "25", "", "").parse().unwrap_err();
        assert!(matches!(err, WorkoutError::Validation { ref fields } if fields == &[Field::Kind]));
    }

    #[test]
    fn blank_fields_fail_store_validation() {
        let s = form("running", "", "abc", "", "").parse().unwrap();
        let mut store = WorkoutStore::new();
        let err = store
            .create(
                s.kind,
                Some(Coordinates::new(0.0, 0.0).unwrap()),
                s.distance_km,
                s.duration_min,
                s.extra,
            )
            .unwrap_err();
        let WorkoutError::Validation { fields } = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields, vec![Field::Distance, Field::Duration, Field::Cadence]);
    }

    #[test]
    fn prefill_from_workout_round_trips_through_parse() {
        let mut store = WorkoutStore::new();
        let w = store
            .create(
                WorkoutKind::Cycling,
                Some(Coordinates::new(10.0, 20.0).unwrap()),
                27.5,
                95.0,
                0.0,
            )
            .unwrap();
        let values = FormValues::from_workout(&w);
        assert_eq!(values.kind, "cycling");
        assert_eq!(values.cadence, "");
        assert_eq!(values.elevation, "0");

        let s = values.parse().unwrap();
        assert_eq!(s.distance_km, 27.5);
        assert_eq!(s.duration_min, 95.0);
        assert_eq!(s.extra, 0.0);
    }
}
