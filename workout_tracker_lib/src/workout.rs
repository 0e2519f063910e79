use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{CYCLING_ICON, CYCLING_LABEL, DATE_FORMAT, ID_LENGTH, RUNNING_ICON, RUNNING_LABEL},
    error::WorkoutError,
};

/// Latitude and longitude in degrees. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    /// Longitude is wrapped into [-180, 180), as leaflet reports clicks on
    /// repeated world copies with unbounded longitudes.
    pub fn wrapped(lat: f64, lng: f64) -> Self {
        let lng = if lng.is_finite() { (lng + 180.).rem_euclid(360.) - 180. } else { lng };
        Self(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }

    pub fn validate(self) -> Result<Self, WorkoutError> {
        let Coords(lat, lng) = self;
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90. ..=90.).contains(&lat)
            && (-180. ..=180.).contains(&lng);

        if valid {
            Ok(self)
        } else {
            Err(WorkoutError::InvalidCoords { lat, lng })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// The trailing digits of the creation time in milliseconds.
    pub fn from_timestamp(date: &DateTime<Utc>) -> Self {
        let millis = date.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(ID_LENGTH);
        Self(millis[start..].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::Running => RUNNING_LABEL,
            WorkoutType::Cycling => CYCLING_LABEL,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WorkoutType::Running => RUNNING_ICON,
            WorkoutType::Cycling => CYCLING_ICON,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            WorkoutType::Running => WorkoutType::Cycling,
            WorkoutType::Cycling => WorkoutType::Running,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        #[serde(alias = "temp")]
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain", alias = "climb")]
        elevation_gain: f64,
        // Labelled km/h but computed as distance / duration / 60
        speed: f64,
    },
}

impl WorkoutKind {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// A recorded workout. Everything except `click_count` is fixed at construction,
/// and derived fields are stored rather than recomputed after a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: WorkoutId,
    pub date: DateTime<Utc>,
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// min
    pub duration: f64,
    pub description: String,
    #[serde(default, alias = "clickNumber")]
    pub click_count: u32,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

impl Workout {
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64, date: DateTime<Utc>) -> Result<Self, WorkoutError> {
        let coords = coords.validate()?;
        require_finite(&[("distance", distance), ("duration", duration), ("cadence", cadence)])?;
        require_positive(&[("distance", distance), ("duration", duration), ("cadence", cadence)])?;

        let pace = duration / distance;
        Ok(Self::new(coords, distance, duration, date, WorkoutKind::Running { cadence, pace }))
    }

    /// Elevation gain only has to be finite. Zero and negative climbs are kept as given.
    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64, date: DateTime<Utc>) -> Result<Self, WorkoutError> {
        let coords = coords.validate()?;
        require_finite(&[("distance", distance), ("duration", duration), ("elevationGain", elevation_gain)])?;
        require_positive(&[("distance", distance), ("duration", duration)])?;

        let speed = distance / duration / 60.;
        Ok(Self::new(coords, distance, duration, date, WorkoutKind::Cycling { elevation_gain, speed }))
    }

    fn new(coords: Coords, distance: f64, duration: f64, date: DateTime<Utc>, kind: WorkoutKind) -> Self {
        Self {
            id: WorkoutId::from_timestamp(&date),
            description: describe(kind.workout_type(), &date),
            date,
            coords,
            distance,
            duration,
            click_count: 0,
            kind,
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    pub fn register_interaction(&mut self) {
        self.click_count = self.click_count.saturating_add(1);
    }
}

pub fn describe(workout_type: WorkoutType, date: &DateTime<Utc>) -> String {
    format!("{} {}", workout_type.label(), date.with_timezone(&Local).format(DATE_FORMAT))
}

fn require_finite(values: &[(&'static str, f64)]) -> Result<(), WorkoutError> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(WorkoutError::NotFinite { field: *field }),
        None => Ok(()),
    }
}

fn require_positive(values: &[(&'static str, f64)]) -> Result<(), WorkoutError> {
    match values.iter().find(|(_, value)| *value <= 0.) {
        Some((field, _)) => Err(WorkoutError::NotPositive { field: *field }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 22, 12, 0, 0).unwrap()
    }

    #[test]
    fn running_computes_pace() {
        let workout = Workout::running(Coords(50., 30.), 5., 25., 180., noon()).unwrap();

        assert_eq!(workout.workout_type(), WorkoutType::Running);
        assert_eq!(workout.kind, WorkoutKind::Running { cadence: 180., pace: 5. });
        assert!(workout.description.starts_with(RUNNING_LABEL));
        assert_eq!(workout.click_count, 0);
    }

    #[test]
    fn cycling_keeps_speed_formula() {
        let workout = Workout::cycling(Coords(50., 30.), 37., 80., 370., noon()).unwrap();

        let WorkoutKind::Cycling { speed, elevation_gain } = workout.kind else {
            panic!("expected cycling");
        };
        assert_eq!(speed, 37. / 80. / 60.);
        assert_eq!(elevation_gain, 370.);
        assert!(workout.description.starts_with(CYCLING_LABEL));
    }

    #[test]
    fn zero_distance_is_rejected_for_both_types() {
        assert_eq!(
            Workout::running(Coords(50., 30.), 0., 25., 180., noon()),
            Err(WorkoutError::NotPositive { field: "distance" })
        );
        assert_eq!(
            Workout::cycling(Coords(50., 30.), 0., 25., 10., noon()),
            Err(WorkoutError::NotPositive { field: "distance" })
        );
    }

    #[test]
    fn cadence_must_be_positive_but_elevation_may_be_zero_or_negative() {
        assert_eq!(
            Workout::running(Coords(50., 30.), 5., 25., 0., noon()),
            Err(WorkoutError::NotPositive { field: "cadence" })
        );
        assert!(Workout::cycling(Coords(50., 30.), 5., 25., 0., noon()).is_ok());
        assert!(Workout::cycling(Coords(50., 30.), 5., 25., -12., noon()).is_ok());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert_eq!(
            Workout::cycling(Coords(50., 30.), 5., 25., f64::NAN, noon()),
            Err(WorkoutError::NotFinite { field: "elevationGain" })
        );
        assert_eq!(
            Workout::running(Coords(50., 30.), f64::INFINITY, 25., 170., noon()),
            Err(WorkoutError::NotFinite { field: "distance" })
        );
    }

    #[test]
    fn invalid_coords_are_rejected() {
        assert!(matches!(
            Workout::running(Coords(91., 30.), 5., 25., 170., noon()),
            Err(WorkoutError::InvalidCoords { .. })
        ));
    }

    #[test]
    fn longitude_is_wrapped() {
        assert_eq!(Coords::wrapped(50., 390.), Coords(50., 30.));
        assert_eq!(Coords::wrapped(50., -190.), Coords(50., 170.));
    }

    #[test]
    fn id_is_last_ten_timestamp_digits() {
        let date = Utc.timestamp_millis_opt(1_716_379_200_123).unwrap();
        assert_eq!(WorkoutId::from_timestamp(&date).as_str(), "6379200123");
    }

    #[test]
    fn register_interaction_counts_clicks() {
        let mut workout = Workout::running(Coords(50., 30.), 5., 25., 180., noon()).unwrap();
        workout.register_interaction();
        workout.register_interaction();
        assert_eq!(workout.click_count, 2);
    }

    #[test]
    fn click_count_saturates_at_stored_maximum() {
        let json = r#"{"id":"1","date":"2025-05-22T12:00:00Z","coords":[50,30],"distance":5,"duration":25,
            "type":"running","cadence":180,"pace":5,"description":"Пробіжка 22.05.2025","clickCount":4294967295}"#;

        let mut workout: Workout = serde_json::from_str(json).unwrap();
        workout.register_interaction();
        assert_eq!(workout.click_count, u32::MAX);
    }

    #[test]
    fn serialized_layout() {
        let workout = Workout::cycling(Coords(50., 30.), 20., 60., 0., noon()).unwrap();
        let value = serde_json::to_value(&workout).unwrap();

        assert_eq!(value["type"], "cycling");
        assert_eq!(value["coords"], serde_json::json!([50., 30.]));
        assert_eq!(value["elevationGain"], 0.);
        assert_eq!(value["clickCount"], 0);
        assert_eq!(value["id"], workout.id.as_str());
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let json = r#"{
            "date": "2025-05-22T12:00:00.000Z",
            "id": "6379200123",
            "clickNumber": 3,
            "coords": [50.1, 30.2],
            "distance": 7,
            "duration": 40,
            "type": "running",
            "temp": 170,
            "pace": 5.714285714285714,
            "description": "Пробіжка 22.05.2025"
        }"#;

        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.click_count, 3);
        assert_eq!(workout.coords, Coords(50.1, 30.2));
        assert_eq!(workout.kind, WorkoutKind::Running { cadence: 170., pace: 5.714285714285714 });
    }
}
