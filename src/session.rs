use crate::dlog;
use crate::error::WorkoutError;
use crate::form::FormValues;
use crate::store::WorkoutStore;
use crate::types::{Coordinates, Workout, WorkoutId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(WorkoutId),
}

/// What a form submission did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(Workout),
    Replaced(Workout),
}

impl Outcome {
    pub const fn workout(&self) -> &Workout {
        match self {
            Self::Created(w) | Self::Replaced(w) => w,
        }
    }
}

/// Decides whether a submitted form creates a workout or replaces the one
/// being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> &EditState {
        &self.state
    }

    pub const fn editing(&self) -> Option<&WorkoutId> {
        match &self.state {
            EditState::Editing(id) => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn begin_edit(&mut self, id: WorkoutId) -> Result<(), WorkoutError> {
        if let EditState::Editing(current) = &self.state {
            return Err(WorkoutError::AlreadyEditing {
                id: current.clone(),
            });
        }
        dlog!("edit_begin id={id}");
        self.state = EditState::Editing(id);
        Ok(())
    }

    pub fn cancel(&mut self) {
        if let EditState::Editing(id) = &self.state {
            dlog!("edit_cancel id={id}");
        }
        self.state = EditState::Idle;
    }

    /// Applies a submitted form to `store`.
    ///
    /// `coordinates` is the clicked point and only matters when creating.
    /// On error the session stays in its current state so the form can be
    /// corrected and resubmitted.
    pub fn submit(
        &mut self,
        store: &mut WorkoutStore,
        form: &FormValues,
        coordinates: Option<Coordinates>,
    ) -> Result<Outcome, WorkoutError> {
        let s = form.parse()?;
        match &self.state {
            EditState::Idle => store
                .create(s.kind, coordinates, s.distance_km, s.duration_min, s.extra)
                .map(Outcome::Created),
            EditState::Editing(id) => {
                let workout = store.replace(id, s.kind, s.distance_km, s.duration_min, s.extra)?;
                self.state = EditState::Idle;
                Ok(Outcome::Replaced(workout))
            }
        }
    }
}
