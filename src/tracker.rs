//! Application session: owns the store and the edit session, persists every
//! change and tells the renderer about it.
//!
//! Mutations run against a copy of the state. The copy is saved first and
//! only then committed, so a failed validation, lookup or save leaves memory,
//! storage and renderer exactly as they were.

use crate::codec;
use crate::dlog;
use crate::error::WorkoutError;
use crate::form::FormValues;
use crate::geo::Geolocation;
use crate::render::Renderer;
use crate::session::{EditSession, EditState, Outcome};
use crate::storage::Storage;
use crate::store::WorkoutStore;
use crate::types::{Coordinates, SortKey, Workout, WorkoutId};

pub struct Tracker<S: Storage, R: Renderer> {
    store: WorkoutStore,
    session: EditSession,
    position: Option<Coordinates>,
    storage: S,
    renderer: R,
}

impl<S: Storage, R: Renderer> Tracker<S, R> {
    /// Hydrates the store from `storage` and asks `geolocation` for the
    /// current position.
    ///
    /// A corrupt snapshot is discarded and the session starts empty. Only a
    /// failing storage backend is an error.
    pub fn open(
        storage: S,
        mut renderer: R,
        geolocation: &impl Geolocation,
    ) -> Result<Self, WorkoutError> {
        let position = match geolocation.locate() {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(err = %e, "could not get location");
                None
            }
        };

        let store = match storage.load().map_err(WorkoutError::Storage)? {
            None => WorkoutStore::new(),
            Some(text) => match codec::load_store(&text) {
                Ok(store) => store,
                Err(e) => {
                    tracing::warn!(err = %e, "discarding stored workouts");
                    WorkoutStore::new()
                }
            },
        };
        tracing::info!(workouts = store.len(), "workouts loaded");

        renderer.hydrated(store.all());

        Ok(Self {
            store,
            session: EditSession::new(),
            position,
            storage,
            renderer,
        })
    }

    pub const fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub const fn edit_state(&self) -> &EditState {
        self.session.state()
    }

    /// Geolocated position, if geolocation succeeded.
    pub const fn position(&self) -> Option<Coordinates> {
        self.position
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Handles a form submission.
    ///
    /// When creating, the workout is pinned at `clicked`, or at the
    /// geolocated position if no point was clicked.
    pub fn submit(
        &mut self,
        form: &FormValues,
        clicked: Option<Coordinates>,
    ) -> Result<Outcome, WorkoutError> {
        let mut store = self.store.clone();
        let mut session = self.session.clone();
        let outcome = session.submit(&mut store, form, clicked.or(self.position))?;
        self.commit(store)?;
        self.session = session;

        match &outcome {
            Outcome::Created(w) => self.renderer.workout_added(w),
            Outcome::Replaced(w) => self.renderer.workout_replaced(w),
        }
        Ok(outcome)
    }

    /// Starts editing `id` and returns its current values to prefill the form.
    pub fn begin_edit(&mut self, id: &WorkoutId) -> Result<FormValues, WorkoutError> {
        if let Some(current) = self.session.editing() {
            return Err(WorkoutError::AlreadyEditing {
                id: current.clone(),
            });
        }
        let workout = self
            .store
            .find(id)
            .ok_or_else(|| WorkoutError::NotFound { id: id.clone() })?;
        let values = FormValues::from_workout(workout);
        self.session.begin_edit(id.clone())?;
        Ok(values)
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Deletes `id`. Deleting the workout under edit ends the edit.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<Workout, WorkoutError> {
        let mut store = self.store.clone();
        let removed = store.delete(id)?;
        self.commit(store)?;

        if self.session.editing() == Some(id) {
            self.session.cancel();
        }
        self.renderer.workout_removed(id);
        Ok(removed)
    }

    /// Brings `id` into view, counting the click.
    pub fn focus(&mut self, id: &WorkoutId) -> Result<Workout, WorkoutError> {
        let mut store = self.store.clone();
        let workout = store.increment_clicks(id)?;
        self.commit(store)?;

        self.renderer.workout_focused(&workout);
        Ok(workout)
    }

    /// Shows the workouts ordered by `key`, or in creation order when `None`.
    /// Only the rendered order changes; the store keeps its own.
    pub fn sort(&mut self, key: Option<SortKey>) -> Vec<Workout> {
        let view: Vec<&Workout> = match key {
            Some(key) => self.store.sorted_view(key),
            None => self.store.all().iter().collect(),
        };
        self.renderer.workouts_ordered(&view);
        view.into_iter().cloned().collect()
    }

    /// Forgets every workout, in storage and in memory.
    pub fn reset(&mut self) -> Result<(), WorkoutError> {
        self.storage.clear().map_err(WorkoutError::Storage)?;
        self.store = WorkoutStore::new();
        self.session.cancel();
        tracing::info!("all workouts removed");
        self.renderer.cleared();
        Ok(())
    }

    fn commit(&mut self, store: WorkoutStore) -> Result<(), WorkoutError> {
        let text = codec::serialize(&store)?;
        self.storage.save(&text).map_err(WorkoutError::Storage)?;
        dlog!("committed workouts={} bytes={}", store.len(), text.len());
        self.store = store;
        Ok(())
    }
}
