use crate::workout::{Coords, Workout, WorkoutId};

/// Something the user did on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// A click on the map itself, not on a marker.
    Clicked(Coords),
    MarkerSelected(WorkoutId),
}

/// A marker with a popup that stays open until closed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub workout_id: WorkoutId,
    pub coords: Coords,
    pub popup_content: String,
    pub style_class: String,
}

impl MarkerSpec {
    pub fn for_workout(workout: &Workout) -> Self {
        let workout_type = workout.workout_type();
        Self {
            workout_id: workout.id.clone(),
            coords: workout.coords,
            popup_content: format!("{} {}", workout_type.icon(), workout.description),
            style_class: format!("{}-popup", workout_type.as_str()),
        }
    }
}

/// The capabilities the controller needs from the map engine.
pub trait MapView {
    /// Move the viewport, optionally with a pan animation.
    fn center_on(&self, coords: Coords, zoom: f64, animate: bool);

    fn place_marker(&self, marker: &MarkerSpec);

    fn on_click(&self, handler: Box<dyn Fn(MapEvent)>);
}
