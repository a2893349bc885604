//! JSON snapshot of the workout store.
//!
//! Every field is written out, derived ones included, and restored verbatim
//! on load. Loaded values are validated but never recomputed, so a snapshot
//! keeps its pace/speed even if the formulas change.

use crate::dlog;
use crate::error::WorkoutError;
use crate::metrics::{is_non_negative, is_positive};
use crate::store::WorkoutStore;
use crate::types::{Coordinates, Details, Workout, WorkoutId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record {
    Running {
        #[serde(flatten)]
        base: BaseRecord,
        cadence: f64,
        pace: f64,
    },
    Cycling {
        #[serde(flatten)]
        base: BaseRecord,
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        speed: f64,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct BaseRecord {
    id: WorkoutId,
    date: DateTime<Utc>,
    coords: Coordinates,
    distance: f64,
    duration: f64,
    clicks: u32,
    description: String,
}

impl From<&Workout> for Record {
    fn from(w: &Workout) -> Self {
        let base = BaseRecord {
            id: w.id().clone(),
            date: w.created_at(),
            coords: w.coordinates(),
            distance: w.distance_km(),
            duration: w.duration_min(),
            clicks: w.click_count(),
            description: w.description().to_string(),
        };
        match *w.details() {
            Details::Running {
                cadence_spm,
                pace_min_per_km,
            } => Self::Running {
                base,
                cadence: cadence_spm,
                pace: pace_min_per_km,
            },
            Details::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => Self::Cycling {
                base,
                elevation_gain: elevation_gain_m,
                speed: speed_km_per_h,
            },
        }
    }
}

impl TryFrom<Record> for Workout {
    type Error = WorkoutError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let (base, details) = match record {
            Record::Running {
                base,
                cadence,
                pace,
            } => {
                ensure(is_positive(cadence), &base.id, "cadence")?;
                ensure(is_positive(pace), &base.id, "pace")?;
                let details = Details::Running {
                    cadence_spm: cadence,
                    pace_min_per_km: pace,
                };
                (base, details)
            }
            Record::Cycling {
                base,
                elevation_gain,
                speed,
            } => {
                ensure(is_non_negative(elevation_gain), &base.id, "elevationGain")?;
                ensure(is_positive(speed), &base.id, "speed")?;
                let details = Details::Cycling {
                    elevation_gain_m: elevation_gain,
                    speed_km_per_h: speed,
                };
                (base, details)
            }
        };

        ensure(!base.id.as_str().is_empty(), &base.id, "id")?;
        ensure(is_positive(base.distance), &base.id, "distance")?;
        ensure(is_positive(base.duration), &base.id, "duration")?;

        Ok(Self::from_parts(
            base.id,
            base.date,
            base.coords,
            base.distance,
            base.duration,
            base.clicks,
            base.description,
            details,
        ))
    }
}

fn ensure(ok: bool, id: &WorkoutId, field: &str) -> Result<(), WorkoutError> {
    if ok {
        Ok(())
    } else {
        Err(WorkoutError::corrupt(format!(
            "workout '{id}' has an invalid {field}"
        )))
    }
}

/// Serializes the whole store, in store order.
pub fn serialize(store: &WorkoutStore) -> Result<String, WorkoutError> {
    let records: Vec<Record> = store.all().iter().map(Record::from).collect();
    serde_json::to_string(&records).map_err(|source| WorkoutError::Encode { source })
}

/// Parses a snapshot back into workouts, in snapshot order.
///
/// All-or-nothing: any unknown kind, missing or malformed field, or duplicate
/// id rejects the whole snapshot.
pub fn deserialize(text: &str) -> Result<Vec<Workout>, WorkoutError> {
    let records: Vec<Record> =
        serde_json::from_str(text).map_err(|e| WorkoutError::corrupt(e.to_string()))?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let workout = Workout::try_from(record)?;
        if !seen.insert(workout.id().clone()) {
            return Err(WorkoutError::corrupt(format!(
                "duplicate workout id '{}'",
                workout.id()
            )));
        }
        out.push(workout);
    }

    dlog!("codec_deserialize workouts={}", out.len());
    Ok(out)
}

/// Rebuilds a store from a snapshot.
pub fn load_store(text: &str) -> Result<WorkoutStore, WorkoutError> {
    deserialize(text).map(WorkoutStore::from_workouts)
}
