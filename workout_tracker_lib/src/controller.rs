use chrono::{DateTime, Utc};

use crate::{
    constants::{DEFAULT_ZOOM, INVALID_INPUT_MESSAGE, NO_LOCATION_MESSAGE},
    error::GeolocationError,
    form::FormValues,
    map_view::{MapEvent, MapView, MarkerSpec},
    sidebar::{render_row, SidebarRow},
    storage::{KeyValueStore, WorkoutStore},
    workout::{Coords, Workout, WorkoutId, WorkoutType},
};

/// Blocking dialogs and page lifecycle provided by the platform.
pub trait Host {
    fn alert(&self, message: &str);

    /// Restart the application from its persisted state.
    fn restart(&self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryState {
    Idle,
    /// The map was clicked and the form is waiting for input.
    AwaitingInput { pending: Coords },
}

/// The application context: owns the workout collection and drives the map,
/// the sidebar rows and persistence from user events.
pub struct WorkoutController<M: MapView, S: KeyValueStore, H: Host> {
    workouts: Vec<Workout>,
    rows: Vec<SidebarRow>,
    map: Option<M>,
    store: WorkoutStore<S>,
    host: H,
    state: EntryState,
    form_type: WorkoutType,
    form_generation: u32,
    position_requested: bool,
}

impl<M: MapView, S: KeyValueStore, H: Host> WorkoutController<M, S, H> {
    /// Restores persisted workouts and their sidebar rows. Their markers are
    /// placed once a map is attached.
    pub fn new(store: S, host: H) -> Self {
        let store = WorkoutStore::new(store);

        let workouts = match store.load() {
            Ok(Some(workouts)) => workouts,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("Discarding persisted workouts: {err}");
                Vec::new()
            }
        };
        tracing::info!("Restored {} workouts", workouts.len());

        Self {
            rows: workouts.iter().map(render_row).collect(),
            workouts,
            map: None,
            store,
            host,
            state: EntryState::Idle,
            form_type: WorkoutType::default(),
            form_generation: 0,
            position_requested: false,
        }
    }

    /// Returns true exactly once, when the caller should ask the platform for a position.
    pub fn initialize(&mut self) -> bool {
        if self.position_requested {
            return false;
        }
        self.position_requested = true;
        true
    }

    /// Builds the map around the reported position and replays the restored markers.
    /// Without a position no map exists and no workouts can be created.
    pub fn handle_position<F>(&mut self, position: Result<Coords, GeolocationError>, create_map: F, on_event: Box<dyn Fn(MapEvent)>)
    where
        F: FnOnce() -> Option<M>,
    {
        let coords = match position {
            Ok(coords) => coords,
            Err(err) => {
                tracing::warn!("No map without a position: {err}");
                self.host.alert(NO_LOCATION_MESSAGE);
                return;
            }
        };

        if self.map.is_some() {
            tracing::debug!("Map already attached, ignoring position {coords:?}");
            return;
        }

        let Some(map) = create_map() else {
            tracing::error!("Map could not be created");
            return;
        };
        map.center_on(coords, DEFAULT_ZOOM, false);
        map.on_click(on_event);

        for workout in &self.workouts {
            map.place_marker(&MarkerSpec::for_workout(workout));
        }

        tracing::info!("Map centered on {:?} with {} markers", coords, self.workouts.len());
        self.map = Some(map);
    }

    pub fn handle_map_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::Clicked(coords) => self.handle_map_click(coords),
            MapEvent::MarkerSelected(id) => self.handle_marker_select(&id),
        }
    }

    pub fn handle_map_click(&mut self, coords: Coords) {
        self.state = EntryState::AwaitingInput { pending: coords };
    }

    pub fn handle_marker_select(&mut self, id: &WorkoutId) {
        if let Some(workout) = self.workouts.iter_mut().find(|workout| &workout.id == id) {
            workout.register_interaction();
        }
    }

    pub fn handle_type_toggle(&mut self) {
        self.form_type = self.form_type.toggled();
    }

    pub fn cancel_entry(&mut self) {
        self.state = EntryState::Idle;
    }

    /// Validates the form and records the workout. Invalid input is reported to the
    /// user and leaves every piece of state untouched.
    pub fn handle_submit(&mut self, values: &FormValues, now: DateTime<Utc>) -> Option<WorkoutId> {
        let EntryState::AwaitingInput { pending } = self.state else {
            tracing::debug!("Form submitted without a pending location");
            return None;
        };

        let workout = match values.to_workout(pending, self.unique_timestamp(now)) {
            Ok(workout) => workout,
            Err(err) => {
                tracing::debug!("Rejected form input: {err}");
                self.host.alert(INVALID_INPUT_MESSAGE);
                return None;
            }
        };

        tracing::info!("New {} workout {} at {:?}", workout.workout_type().as_str(), workout.id, workout.coords);

        if let Some(map) = &self.map {
            map.place_marker(&MarkerSpec::for_workout(&workout));
        }
        self.rows.push(render_row(&workout));
        let id = workout.id.clone();
        self.workouts.push(workout);

        self.state = EntryState::Idle;
        self.form_generation += 1;

        self.persist();
        Some(id)
    }

    /// Pans to the selected workout. Ids that match nothing are ignored.
    pub fn handle_workout_select(&mut self, id: Option<&WorkoutId>) {
        let Some(id) = id else {
            return;
        };

        let Some(workout) = self.workouts.iter_mut().find(|workout| &workout.id == id) else {
            tracing::debug!("No workout with id {id}");
            return;
        };

        workout.register_interaction();
        if let Some(map) = &self.map {
            map.center_on(workout.coords, DEFAULT_ZOOM, true);
        }
    }

    pub fn reset_all(&mut self) {
        tracing::info!("Resetting {} workouts", self.workouts.len());

        if let Err(err) = self.store.clear() {
            tracing::error!("Failed to clear persisted workouts: {err}");
        }
        self.workouts.clear();
        self.rows.clear();
        self.state = EntryState::Idle;

        self.host.restart();
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn form_visible(&self) -> bool {
        matches!(self.state, EntryState::AwaitingInput { .. })
    }

    pub fn form_type(&self) -> WorkoutType {
        self.form_type
    }

    /// Bumped on every recorded workout, so the form can clear its inputs.
    pub fn form_generation(&self) -> u32 {
        self.form_generation
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn storage(&self) -> &S {
        self.store.inner()
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.workouts) {
            tracing::error!("Failed to persist workouts: {err}");
        }
    }

    // Ids come from the millisecond timestamp, so move forward until nothing collides
    fn unique_timestamp(&self, mut date: DateTime<Utc>) -> DateTime<Utc> {
        while self.workouts.iter().any(|workout| workout.id == WorkoutId::from_timestamp(&date)) {
            date += chrono::Duration::milliseconds(1);
        }
        date
    }
}
