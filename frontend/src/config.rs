use workout_tracker_lib::constants::PAN_DURATION_SECS;

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    pub pan_duration: f64,
    pub popup_min_width: f64,
    pub popup_max_width: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: "https://tile.openstreetmap.de/{z}/{x}/{y}.png".into(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".into(),
            pan_duration: PAN_DURATION_SECS,
            popup_min_width: 100.,
            popup_max_width: 200.,
        }
    }
}
