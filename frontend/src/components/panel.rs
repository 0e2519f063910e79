use wasm_bindgen::JsCast;
use web_sys::Element;
use workout_tracker_lib::{
    WorkoutId,
    sidebar::{SidebarRow, resolve_row_to_id},
};
use yew::prelude::*;

use crate::platform::DomNode;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub rows: Vec<SidebarRow>,
    pub select_workout: Callback<Option<WorkoutId>>,
    /// The entry form, rendered above the rows.
    pub children: Html,
}

/// Sidebar with the entry form followed by one row per workout, oldest first.
#[function_component]
pub fn Panel(props: &Props) -> Html {
    let onclick = {
        let select_workout = props.select_workout.clone();
        Callback::from(move |e: MouseEvent| {
            let id = e.target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| resolve_row_to_id(DomNode(element)));
            select_workout.emit(id);
        })
    };

    html! {
        <div class="sidebar">
            <ul class="workouts" {onclick}>
                {props.children.clone()}
                { for props.rows.iter().map(row) }
            </ul>
        </div>
    }
}

fn row(row: &SidebarRow) -> Html {
    html! {
        <li class={row.class_name()} data-id={row.id.to_string()}>
            <h2 class="workout__title">{row.title.clone()}</h2>
            { for row.details.iter().map(|detail| html! {
                <div class="workout__details">
                    <span class="workout__icon">{detail.icon}</span>
                    <span class="workout__value">{detail.value.clone()}</span>
                    <span class="workout__unit">{detail.unit}</span>
                </div>
            }) }
        </li>
    }
}
