use crate::{
    constants::ROW_CLASS,
    workout::{Workout, WorkoutId, WorkoutKind, WorkoutType},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// Display fragment for one workout in the sidebar list.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarRow {
    pub id: WorkoutId,
    pub workout_type: WorkoutType,
    pub title: String,
    pub details: Vec<Detail>,
}

impl SidebarRow {
    pub fn class_name(&self) -> String {
        format!("{ROW_CLASS} {ROW_CLASS}--{}", self.workout_type.as_str())
    }
}

pub fn render_row(workout: &Workout) -> SidebarRow {
    let workout_type = workout.workout_type();

    let mut details = vec![
        Detail { icon: workout_type.icon(), value: workout.distance.to_string(), unit: "км" },
        Detail { icon: "⏱", value: workout.duration.to_string(), unit: "хв" },
    ];

    match &workout.kind {
        WorkoutKind::Running { cadence, pace } => {
            details.push(Detail { icon: "📏⏱", value: format!("{pace:.2}"), unit: "хв/км" });
            details.push(Detail { icon: "👟⏱", value: cadence.to_string(), unit: "кроків/хв" });
        }
        WorkoutKind::Cycling { elevation_gain, speed } => {
            details.push(Detail { icon: "⚡", value: format!("{speed:.2}"), unit: "км/год" });
            details.push(Detail { icon: "🏔", value: elevation_gain.to_string(), unit: "м" });
        }
    }

    SidebarRow {
        id: workout.id.clone(),
        workout_type,
        title: workout.description.clone(),
        details,
    }
}

/// A node in the rendered list that a click can land on.
pub trait RowNode: Sized {
    fn is_row(&self) -> bool;
    fn row_id(&self) -> Option<String>;
    fn parent(&self) -> Option<Self>;
}

/// Walks up from the click target to the closest enclosing row.
pub fn resolve_row_to_id<N: RowNode>(target: N) -> Option<WorkoutId> {
    let mut node = Some(target);
    while let Some(current) = node {
        if current.is_row() {
            return current.row_id().map(|id| WorkoutId::from(id.as_str()));
        }
        node = current.parent();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Coords;
    use chrono::Utc;
    use std::rc::Rc;

    #[derive(Clone)]
    struct FakeNode {
        classes: Vec<&'static str>,
        id: Option<&'static str>,
        parent: Option<Rc<FakeNode>>,
    }

    impl RowNode for Rc<FakeNode> {
        fn is_row(&self) -> bool {
            self.classes.contains(&ROW_CLASS)
        }

        fn row_id(&self) -> Option<String> {
            self.id.map(str::to_owned)
        }

        fn parent(&self) -> Option<Self> {
            self.parent.clone()
        }
    }

    fn node(classes: Vec<&'static str>, id: Option<&'static str>, parent: Option<Rc<FakeNode>>) -> Rc<FakeNode> {
        Rc::new(FakeNode { classes, id, parent })
    }

    #[test]
    fn running_row_details() {
        let workout = Workout::running(Coords(50., 30.), 5., 25., 180., Utc::now()).unwrap();
        let row = render_row(&workout);

        assert_eq!(row.title, workout.description);
        assert_eq!(row.class_name(), "workout workout--running");
        let values: Vec<&str> = row.details.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, ["5", "25", "5.00", "180"]);
    }

    #[test]
    fn cycling_row_shows_speed_and_climb() {
        let workout = Workout::cycling(Coords(50., 30.), 30., 1., 250., Utc::now()).unwrap();
        let row = render_row(&workout);

        assert_eq!(row.details[2].value, "0.50");
        assert_eq!(row.details[2].unit, "км/год");
        assert_eq!(row.details[3].value, "250");
    }

    #[test]
    fn click_inside_row_resolves_its_id() {
        let list = node(vec!["workouts"], None, None);
        let row = node(vec!["workout", "workout--running"], Some("6379200123"), Some(list));
        let value = node(vec!["workout__value"], None, Some(row));

        assert_eq!(resolve_row_to_id(value), Some(WorkoutId::from("6379200123")));
    }

    #[test]
    fn click_outside_rows_resolves_nothing() {
        let list = node(vec!["workouts"], None, None);
        let form = node(vec!["form"], None, Some(list));

        assert_eq!(resolve_row_to_id(form), None);
    }
}
