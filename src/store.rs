use crate::dlog;
use crate::error::{Field, WorkoutError};
use crate::metrics::{self, is_non_negative, is_positive};
use crate::types::{Coordinates, Details, SortKey, Workout, WorkoutId, WorkoutKind, describe_at};
use chrono::{DateTime, Utc};

/// Ids are the trailing digits of the creation time in milliseconds.
const ID_MODULUS: i64 = 10_000_000_000;

/// Ordered collection of workouts, newest last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps workouts already checked for unique ids (see `codec::deserialize`).
    pub(crate) const fn from_workouts(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Creation order, reflecting edits and deletes.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    fn position(&self, id: &WorkoutId) -> Result<usize, WorkoutError> {
        self.workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| WorkoutError::NotFound { id: id.clone() })
    }

    /// Records a new workout stamped with the current time.
    ///
    /// `extra` is the cadence for running and the elevation gain for cycling.
    pub fn create(
        &mut self,
        kind: WorkoutKind,
        coordinates: Option<Coordinates>,
        distance_km: f64,
        duration_min: f64,
        extra: f64,
    ) -> Result<Workout, WorkoutError> {
        self.create_at(
            Utc::now(),
            kind,
            coordinates,
            distance_km,
            duration_min,
            extra,
        )
    }

    /// Same as [`Self::create`] with an explicit creation time.
    pub fn create_at(
        &mut self,
        created_at: DateTime<Utc>,
        kind: WorkoutKind,
        coordinates: Option<Coordinates>,
        distance_km: f64,
        duration_min: f64,
        extra: f64,
    ) -> Result<Workout, WorkoutError> {
        let mut invalid = invalid_fields(kind, distance_km, duration_min, extra);
        let coordinates = match coordinates {
            Some(c) => c,
            None => {
                invalid.insert(0, Field::Coordinates);
                return Err(WorkoutError::invalid(invalid));
            }
        };
        if !invalid.is_empty() {
            return Err(WorkoutError::invalid(invalid));
        }

        let details = derive_details(kind, distance_km, duration_min, extra)?;
        let workout = Workout::from_parts(
            self.next_id(created_at),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            0,
            describe_at(kind, created_at),
            details,
        );

        dlog!("store_create id={} kind={kind}", workout.id());
        self.workouts.push(workout.clone());
        Ok(workout)
    }

    /// Swaps the workout `id` for one built from the new measurements.
    ///
    /// Id, creation time, coordinates, click count and description carry
    /// over; the derived metric is recomputed. Position in [`Self::all`] is
    /// unchanged.
    pub fn replace(
        &mut self,
        id: &WorkoutId,
        kind: WorkoutKind,
        distance_km: f64,
        duration_min: f64,
        extra: f64,
    ) -> Result<Workout, WorkoutError> {
        let idx = self.position(id)?;

        let invalid = invalid_fields(kind, distance_km, duration_min, extra);
        if !invalid.is_empty() {
            return Err(WorkoutError::invalid(invalid));
        }

        let old = &self.workouts[idx];
        let details = derive_details(kind, distance_km, duration_min, extra)?;
        let workout = Workout::from_parts(
            old.id().clone(),
            old.created_at(),
            old.coordinates(),
            distance_km,
            duration_min,
            old.click_count(),
            old.description().to_string(),
            details,
        );

        dlog!("store_replace id={id} idx={idx} kind={kind}");
        self.workouts[idx] = workout.clone();
        Ok(workout)
    }

    /// Removes and returns the workout `id`.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<Workout, WorkoutError> {
        let idx = self.position(id)?;
        dlog!("store_delete id={id} idx={idx}");
        Ok(self.workouts.remove(idx))
    }

    pub fn increment_clicks(&mut self, id: &WorkoutId) -> Result<Workout, WorkoutError> {
        let idx = self.position(id)?;
        let clicked = self.workouts[idx].clicked();
        self.workouts[idx] = clicked.clone();
        Ok(clicked)
    }

    /// Sorted view of the store. The store's own order is left untouched.
    ///
    /// The sort is stable, so ties keep creation order.
    pub fn sorted_view(&self, key: SortKey) -> Vec<&Workout> {
        let mut view: Vec<&Workout> = self.workouts.iter().collect();
        match key {
            SortKey::Date => view.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
            SortKey::Type => view.sort_by_key(|w| w.kind().rank()),
            SortKey::Duration => view.sort_by(|a, b| a.duration_min().total_cmp(&b.duration_min())),
            SortKey::Distance => view.sort_by(|a, b| a.distance_km().total_cmp(&b.distance_km())),
        }
        view
    }

    fn next_id(&self, created_at: DateTime<Utc>) -> WorkoutId {
        let mut n = created_at.timestamp_millis().rem_euclid(ID_MODULUS);
        loop {
            let id = WorkoutId::from(format!("{n:010}"));
            if self.find(&id).is_none() {
                return id;
            }
            n = (n + 1) % ID_MODULUS;
        }
    }
}

/// Fields failing validation, in form order. Cadence must be positive,
/// elevation gain may be zero.
fn invalid_fields(kind: WorkoutKind, distance_km: f64, duration_min: f64, extra: f64) -> Vec<Field> {
    let mut invalid = Vec::new();
    if !is_positive(distance_km) {
        invalid.push(Field::Distance);
    }
    if !is_positive(duration_min) {
        invalid.push(Field::Duration);
    }
    let extra_ok = match kind {
        WorkoutKind::Running => is_positive(extra),
        WorkoutKind::Cycling => is_non_negative(extra),
    };
    if !extra_ok {
        invalid.push(kind.extra_field());
    }
    invalid
}

/// Derives pace or speed. A metric that cannot be represented is reported
/// against the distance and duration that produced it.
fn derive_details(
    kind: WorkoutKind,
    distance_km: f64,
    duration_min: f64,
    extra: f64,
) -> Result<Details, WorkoutError> {
    let details = match kind {
        WorkoutKind::Running => metrics::pace(distance_km, duration_min).map(|pace_min_per_km| {
            Details::Running {
                cadence_spm: extra,
                pace_min_per_km,
            }
        }),
        WorkoutKind::Cycling => metrics::speed(distance_km, duration_min).map(|speed_km_per_h| {
            Details::Cycling {
                elevation_gain_m: extra,
                speed_km_per_h,
            }
        }),
    };
    details.map_err(|e| match e {
        WorkoutError::InvalidMetric { .. } => {
            WorkoutError::invalid(vec![Field::Distance, Field::Duration])
        }
        other => other,
    })
}
