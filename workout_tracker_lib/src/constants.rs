pub const STORAGE_KEY: &str = "workouts";

pub const DEFAULT_ZOOM: f64 = 15.;
pub const PAN_DURATION_SECS: f64 = 1.;

// Number of trailing timestamp digits kept in a workout id
pub const ID_LENGTH: usize = 10;

// ru-RU calendar date
pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub const RUNNING_LABEL: &str = "Пробіжка";
pub const CYCLING_LABEL: &str = "Велотренування";
pub const RUNNING_ICON: &str = "🏃";
pub const CYCLING_ICON: &str = "🚵‍♂️";

pub const ROW_CLASS: &str = "workout";
pub const ROW_ID_ATTRIBUTE: &str = "data-id";

pub const INVALID_INPUT_MESSAGE: &str = "Введіть додатнє число!";
pub const NO_LOCATION_MESSAGE: &str = "Couldn't get your location";
