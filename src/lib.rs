pub mod cli;
pub mod codec;
pub mod error;
pub mod form;
pub mod geo;
pub mod metrics;
pub mod render;
pub mod session;
pub mod storage;
pub mod store;
pub mod tracker;
pub mod types;
pub mod utils;

pub use error::{Field, WorkoutError};
pub use form::FormValues;
pub use store::WorkoutStore;
pub use tracker::Tracker;
pub use types::{Coordinates, SortKey, Workout, WorkoutId, WorkoutKind};
