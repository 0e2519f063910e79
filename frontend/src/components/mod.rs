pub mod admin_panel;
pub mod map_component;
pub mod panel;
pub mod workout_form;
