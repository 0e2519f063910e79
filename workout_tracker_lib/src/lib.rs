pub mod constants;
pub mod controller;
pub mod error;
pub mod form;
pub mod map_view;
pub mod sidebar;
pub mod storage;
pub mod workout;

pub use controller::{EntryState, Host, WorkoutController};
pub use error::{GeolocationError, PersistenceError, StorageError, WorkoutError};
pub use workout::{Coords, Workout, WorkoutId, WorkoutKind, WorkoutType};
