use crate::error::{Field, WorkoutError};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// Capitalized name, as used in descriptions.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    /// Field holding the kind-specific value (cadence or elevation gain).
    pub const fn extra_field(self) -> Field {
        match self {
            Self::Running => Field::Cadence,
            Self::Cycling => Field::Elevation,
        }
    }

    /// Rank used by the `type` sort: running first.
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Running => 0,
            Self::Cycling => 1,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("running") {
            Ok(Self::Running)
        } else if s.eq_ignore_ascii_case("cycling") {
            Ok(Self::Cycling)
        } else {
            Err(WorkoutError::invalid(vec![Field::Kind]))
        }
    }
}

/// Opaque workout identifier, unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WorkoutId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Latitude/longitude in degrees. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, WorkoutError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if valid {
            Ok(Self { lat, lng })
        } else {
            Err(WorkoutError::invalid(vec![Field::Coordinates]))
        }
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

impl TryFrom<[f64; 2]> for Coordinates {
    type Error = WorkoutError;

    fn try_from([lat, lng]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lat, lng)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`.
impl FromStr for Coordinates {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || WorkoutError::invalid(vec![Field::Coordinates]);
        let (lat, lng) = s.split_once(',').ok_or_else(bad)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| bad())?;
        let lng = lng.trim().parse::<f64>().map_err(|_| bad())?;
        Self::new(lat, lng)
    }
}

/// Kind-specific measurements together with the metric derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Details {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl Details {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Cadence for running, elevation gain for cycling.
    pub const fn extra(&self) -> f64 {
        match *self {
            Self::Running { cadence_spm, .. } => cadence_spm,
            Self::Cycling {
                elevation_gain_m, ..
            } => elevation_gain_m,
        }
    }
}

/// A recorded workout.
///
/// Immutable once built: derived values are computed at construction and an
/// edit produces a new `Workout` that replaces this one in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    click_count: u32,
    description: String,
    details: Details,
}

impl Workout {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn from_parts(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        click_count: u32,
        description: String,
        details: Details,
    ) -> Self {
        Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            click_count,
            description,
            details,
        }
    }

    pub const fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub const fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn details(&self) -> &Details {
        &self.details
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub const fn cadence_spm(&self) -> Option<f64> {
        match self.details {
            Details::Running { cadence_spm, .. } => Some(cadence_spm),
            Details::Cycling { .. } => None,
        }
    }

    pub const fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            Details::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            Details::Cycling { .. } => None,
        }
    }

    pub const fn elevation_gain_m(&self) -> Option<f64> {
        match self.details {
            Details::Cycling {
                elevation_gain_m, ..
            } => Some(elevation_gain_m),
            Details::Running { .. } => None,
        }
    }

    pub const fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            Details::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            Details::Running { .. } => None,
        }
    }

    /// Copy of this workout with one more click.
    #[must_use]
    pub(crate) fn clicked(&self) -> Self {
        Self {
            click_count: self.click_count.saturating_add(1),
            ..self.clone()
        }
    }
}

/// Sort keys accepted by [`crate::store::WorkoutStore::sorted_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Most recent first.
    Date,
    /// Running before cycling.
    Type,
    Duration,
    Distance,
}

impl FromStr for SortKey {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "type" => Ok(Self::Type),
            "duration" => Ok(Self::Duration),
            "distance" => Ok(Self::Distance),
            _ => Err(WorkoutError::UnknownSortKey { key: s.to_string() }),
        }
    }
}

/// `"<Kind> on <Month> <Day>"`, e.g. `"Running on October 17"`.
pub fn describe(kind: WorkoutKind, date: NaiveDate) -> String {
    format!("{} on {}", kind.label(), date.format("%B %-d"))
}

/// Description for a workout created at `at`, using the local calendar day.
pub fn describe_at(kind: WorkoutKind, at: DateTime<Utc>) -> String {
    describe(kind, at.with_timezone(&Local).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_uses_full_month_and_unpadded_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(describe(WorkoutKind::Running, date), "Running on March 4");
        assert_eq!(describe(WorkoutKind::Cycling, date), "Cycling on March 4");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(" Running ".parse::<WorkoutKind>().unwrap(), WorkoutKind::Running);
        assert_eq!("CYCLING".parse::<WorkoutKind>().unwrap(), WorkoutKind::Cycling);
        let err = "swimming".parse::<WorkoutKind>().unwrap_err();
        assert!(matches!(err, WorkoutError::Validation { ref fields } if fields == &[Field::Kind]));
    }

    #[test]
    fn coordinates_parse_and_range_check() {
        let c: Coordinates = "51.5, -0.1".parse().unwrap();
        assert_eq!(c.lat(), 51.5);
        assert_eq!(c.lng(), -0.1);

        assert!("91,0".parse::<Coordinates>().is_err());
        assert!("0,181".parse::<Coordinates>().is_err());
        assert!("NaN,0".parse::<Coordinates>().is_err());
        assert!("51.5".parse::<Coordinates>().is_err());
    }

    #[test]
    fn sort_key_parses() {
        assert_eq!("Distance".parse::<SortKey>().unwrap(), SortKey::Distance);
        assert!(matches!(
            "pace".parse::<SortKey>(),
            Err(WorkoutError::UnknownSortKey { .. })
        ));
    }

    #[test]
    fn clicked_only_bumps_counter() {
        let w = Workout::from_parts(
            WorkoutId::from("0000000001"),
            Utc::now(),
            Coordinates::new(1.0, 2.0).unwrap(),
            5.0,
            25.0,
            3,
            "Running on May 1".to_string(),
            Details::Running {
                cadence_spm: 170.0,
                pace_min_per_km: 5.0,
            },
        );
        let c = w.clicked();
        assert_eq!(c.click_count(), 4);
        assert_eq!(c.id(), w.id());
        assert_eq!(c.details(), w.details());
        assert_eq!(w.click_count(), 3);
    }
}
