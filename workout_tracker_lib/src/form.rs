use chrono::{DateTime, Utc};

use crate::{
    error::WorkoutError,
    workout::{Coords, Workout, WorkoutType},
};

/// Raw values of the entry form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub workout_type: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation_gain: String,
}

impl FormValues {
    /// Only the field belonging to the selected type is read.
    pub fn to_workout(&self, coords: Coords, date: DateTime<Utc>) -> Result<Workout, WorkoutError> {
        let distance = parse_number(&self.distance);
        let duration = parse_number(&self.duration);

        match self.workout_type {
            WorkoutType::Running => Workout::running(coords, distance, duration, parse_number(&self.cadence), date),
            WorkoutType::Cycling => Workout::cycling(coords, distance, duration, parse_number(&self.elevation_gain), date),
        }
    }
}

/// Numeric coercion of a text input: blank reads as 0, anything unparsable as NaN.
/// Unsigned `0x`/`0o`/`0b` integer literals are read in their radix.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix).map_or(f64::NAN, |value| value as f64);
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::WorkoutKind;

    fn values(workout_type: WorkoutType, distance: &str, duration: &str, extra: &str) -> FormValues {
        FormValues {
            workout_type,
            distance: distance.into(),
            duration: duration.into(),
            cadence: if workout_type == WorkoutType::Running { extra.into() } else { "".into() },
            elevation_gain: if workout_type == WorkoutType::Cycling { extra.into() } else { "".into() },
        }
    }

    #[test]
    fn parse_number_coercion() {
        assert_eq!(parse_number(""), 0.);
        assert_eq!(parse_number("  "), 0.);
        assert_eq!(parse_number(" 4.5 "), 4.5);
        assert!(parse_number("abc").is_nan());
    }

    #[test]
    fn parse_number_radix_literals() {
        assert_eq!(parse_number("0x1A"), 26.);
        assert_eq!(parse_number("0b101"), 5.);
        assert_eq!(parse_number("0o17"), 15.);
        assert!(parse_number("0x").is_nan());
        assert!(parse_number("-0x1A").is_nan());
    }

    #[test]
    fn running_form_builds_running_workout() {
        let workout = values(WorkoutType::Running, "5", "25", "180")
            .to_workout(Coords(50., 30.), Utc::now())
            .unwrap();

        assert_eq!(workout.kind, WorkoutKind::Running { cadence: 180., pace: 5. });
    }

    #[test]
    fn blank_cadence_is_rejected_but_blank_elevation_is_not() {
        assert_eq!(
            values(WorkoutType::Running, "5", "25", "").to_workout(Coords(50., 30.), Utc::now()),
            Err(WorkoutError::NotPositive { field: "cadence" })
        );
        assert!(values(WorkoutType::Cycling, "5", "25", "").to_workout(Coords(50., 30.), Utc::now()).is_ok());
    }

    #[test]
    fn garbage_is_not_finite() {
        assert_eq!(
            values(WorkoutType::Cycling, "5", "x", "0").to_workout(Coords(50., 30.), Utc::now()),
            Err(WorkoutError::NotFinite { field: "duration" })
        );
    }
}
