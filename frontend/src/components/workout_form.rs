use web_sys::HtmlInputElement;
use workout_tracker_lib::{WorkoutType, form::FormValues};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub visible: bool,
    pub workout_type: WorkoutType,
    pub on_toggle_type: Callback<()>,
    pub on_submit: Callback<FormValues>,
}

/// Entry form for a new workout. The parent remounts it with a new key to clear the inputs.
#[function_component]
pub fn WorkoutForm(props: &Props) -> Html {
    let distance = use_state(String::new);
    let duration = use_state(String::new);
    let cadence = use_state(String::new);
    let elevation_gain = use_state(String::new);
    let distance_ref = use_node_ref();

    {
        let distance_ref = distance_ref.clone();
        use_effect_with(props.visible, move |visible| {
            if *visible {
                if let Some(input) = distance_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
        });
    }

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        let workout_type = props.workout_type;
        let (distance, duration, cadence, elevation_gain) = (distance.clone(), duration.clone(), cadence.clone(), elevation_gain.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(FormValues {
                workout_type,
                distance: (*distance).clone(),
                duration: (*duration).clone(),
                cadence: (*cadence).clone(),
                elevation_gain: (*elevation_gain).clone(),
            });
        })
    };

    let on_type_change = {
        let on_toggle_type = props.on_toggle_type.clone();
        Callback::from(move |_: Event| on_toggle_type.emit(()))
    };

    let running = props.workout_type == WorkoutType::Running;
    let form_class = if props.visible { "form" } else { "form hidden" };
    let cadence_row = if running { "form__row" } else { "form__row form__row--hidden" };
    let climb_row = if running { "form__row form__row--hidden" } else { "form__row" };

    html! {
        <form class={form_class} hidden={!props.visible} {onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Тип"}</label>
                <select class="form__input form__input--type" onchange={on_type_change}>
                    <option value="running" selected={running}>{"Пробіжка"}</option>
                    <option value="cycling" selected={!running}>{"Велосипед"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Відстань"}</label>
                <input class="form__input form__input--distance" placeholder="км"
                    ref={distance_ref}
                    value={(*distance).clone()}
                    oninput={bind_input(&distance)} />
            </div>
            <div class="form__row">
                <label class="form__label">{"Тривалість"}</label>
                <input class="form__input form__input--duration" placeholder="хв"
                    value={(*duration).clone()}
                    oninput={bind_input(&duration)} />
            </div>
            <div class={cadence_row}>
                <label class="form__label">{"Темп"}</label>
                <input class="form__input form__input--temp" placeholder="кроків/хв"
                    value={(*cadence).clone()}
                    oninput={bind_input(&cadence)} />
            </div>
            <div class={climb_row}>
                <label class="form__label">{"Підйом"}</label>
                <input class="form__input form__input--climb" placeholder="метрів"
                    value={(*elevation_gain).clone()}
                    oninput={bind_input(&elevation_gain)} />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}

fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}
