use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WorkoutError {
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("invalid coordinates ({lat}, {lng})")]
    InvalidCoords { lat: f64, lng: f64 },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read from storage: {0}")]
    Read(String),

    #[error("failed to write to storage: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("persisted workouts are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,

    #[error("geolocation request failed: {0}")]
    Denied(String),
}
