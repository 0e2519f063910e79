use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AdminProps {
    pub workout_count: usize,
    pub on_reset: Callback<()>,
}

/// Maintenance actions that have no place in the tracker view.
#[function_component]
pub fn AdminPanel(props: &AdminProps) -> Html {
    let confirming = use_state(|| false);

    let on_reset_click = {
        let confirming = confirming.clone();
        let on_reset = props.on_reset.clone();
        Callback::from(move |_| {
            if *confirming {
                on_reset.emit(());
            } else {
                confirming.set(true);
            }
        })
    };

    let on_cancel = {
        let confirming = confirming.clone();
        Callback::from(move |_| confirming.set(false))
    };

    html! {
        <div class="admin-panel">
            <h1>{ "Admin Panel" }</h1>
            <label>{ format!("Stored workouts: {}", props.workout_count) }</label>
            <div class="reset">
                <button onclick={on_reset_click}>
                    { if *confirming { "Confirm reset" } else { "Reset all workouts" } }
                </button>
                if *confirming {
                    <button onclick={on_cancel}>{ "Cancel" }</button>
                }
            </div>
        </div>
    }
}
