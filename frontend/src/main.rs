use crate::components::{
    admin_panel::AdminPanel,
    map_component::{LeafletMap, MapComponent},
    panel::Panel,
    workout_form::WorkoutForm,
};
use chrono::Utc;
use config::MapConfig;
use platform::{BrowserHost, BrowserStorage};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use workout_tracker_lib::{
    Coords, GeolocationError, WorkoutController, WorkoutId, form::FormValues, map_view::MapEvent,
};
use yew::prelude::*;
use yew_router::{
    BrowserRouter, Routable, Switch,
    history::{BrowserHistory, History},
};

mod components;
mod config;
mod logging;
mod platform;

#[derive(Clone, Debug, PartialEq, Routable)]
enum Route {
    #[at("/")]
    Tracker,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    Invalid,
}

impl Route {
    fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Tracker,
            "/admin" => Self::Admin,
            _ => Self::Invalid,
        }
    }
}

enum MainMsg {
    PositionResolved(Result<Coords, GeolocationError>),
    Map(MapEvent),
    ToggleType,
    Submit(FormValues),
    SelectWorkout(Option<WorkoutId>),
    Reset,
}

struct Model {
    controller: WorkoutController<LeafletMap, BrowserStorage, BrowserHost>,
    map_ref: NodeRef,
    config: MapConfig,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut controller = WorkoutController::new(BrowserStorage::local(), BrowserHost);

        let history = BrowserHistory::new();
        let route = Route::parse(history.location().path());

        // Only the tracker view needs a map
        if route == Route::Tracker && controller.initialize() {
            let cb = ctx.link().callback(MainMsg::PositionResolved);
            spawn_local(async move {
                cb.emit(platform::current_position().await);
            });
        }

        Self {
            controller,
            map_ref: NodeRef::default(),
            config: MapConfig::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::PositionResolved(position) => {
                let container = self.map_ref.cast::<HtmlElement>();
                let config = self.config.clone();
                let on_event = ctx.link().callback(MainMsg::Map);

                self.controller.handle_position(
                    position,
                    move || container.map(|container| LeafletMap::new(&container, config)),
                    Box::new(move |event| on_event.emit(event)),
                );
                false
            }
            MainMsg::Map(event) => {
                self.controller.handle_map_event(event);
                true
            }
            MainMsg::ToggleType => {
                self.controller.handle_type_toggle();
                true
            }
            MainMsg::Submit(values) => {
                self.controller.handle_submit(&values, Utc::now());
                true
            }
            MainMsg::SelectWorkout(id) => {
                self.controller.handle_workout_select(id.as_ref());
                false
            }
            MainMsg::Reset => {
                self.controller.reset_all();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let controller = &self.controller;

        let tracker = html! {<>
            <Panel rows={controller.rows().to_vec()} select_workout={link.callback(MainMsg::SelectWorkout)}>
                <WorkoutForm
                    key={controller.form_generation().to_string()}
                    visible={controller.form_visible()}
                    workout_type={controller.form_type()}
                    on_toggle_type={link.callback(|()| MainMsg::ToggleType)}
                    on_submit={link.callback(MainMsg::Submit)} />
            </Panel>
            <MapComponent node_ref={self.map_ref.clone()} />
        </>};

        let admin = html! {
            <AdminPanel workout_count={controller.workouts().len()} on_reset={link.callback(|()| MainMsg::Reset)} />
        };

        html! {
            <BrowserRouter>
                <Switch<Route> render={move |r| match r {
                    Route::Tracker => tracker.clone(),
                    Route::Admin => admin.clone(),
                    Route::Invalid => html! { <h1>{"Page not found"}</h1> },
                }} />
            </BrowserRouter>
        }
    }
}

fn main() {
    logging::init();
    tracing::info!("Starting workout tracker");
    yew::Renderer::<Model>::new().render();
}
