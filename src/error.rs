use crate::types::WorkoutId;
use std::fmt;
use thiserror::Error;

/// Input field rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Kind,
    Coordinates,
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kind => "type",
            Self::Coordinates => "coordinates",
            Self::Distance => "distance",
            Self::Duration => "duration",
            Self::Cadence => "cadence",
            Self::Elevation => "elevation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the workout store, codec and edit session.
///
/// None of them is fatal: every failing operation leaves the store in its
/// last valid state.
#[derive(Debug, Error)]
pub enum WorkoutError {
    /// One or more inputs are non-finite, out of range or not positive.
    #[error("invalid workout input: {}", join_fields(.fields))]
    Validation { fields: Vec<Field> },

    /// No workout with this id in the store.
    #[error("no workout with id {id}")]
    NotFound { id: WorkoutId },

    /// Persisted snapshot could not be parsed or failed validation.
    #[error("corrupt workout snapshot: {reason}")]
    CorruptData { reason: String },

    /// An edit was requested while another one is in progress.
    #[error("already editing workout {id}")]
    AlreadyEditing { id: WorkoutId },

    /// Pace or speed requested for a non-positive distance or duration.
    #[error("cannot derive a metric from distance {distance_km} km and duration {duration_min} min")]
    InvalidMetric { distance_km: f64, duration_min: f64 },

    #[error("unknown sort key '{key}' (expected date, type, duration or distance)")]
    UnknownSortKey { key: String },

    #[error("encoding workout snapshot")]
    Encode { source: serde_json::Error },

    #[error("storage backend: {0:#}")]
    Storage(anyhow::Error),
}

impl WorkoutError {
    pub(crate) fn invalid(fields: Vec<Field>) -> Self {
        Self::Validation { fields }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptData {
            reason: reason.into(),
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
