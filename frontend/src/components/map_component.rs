use std::{cell::RefCell, rc::Rc};

use leaflet::{LatLng, Map, MapOptions, Marker, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use web_sys::{HtmlElement, js_sys::{Object, Reflect}};
use workout_tracker_lib::{
    Coords,
    map_view::{MapEvent, MapView, MarkerSpec},
};
use yew::prelude::*;

use crate::config::MapConfig;

// Leaflet calls the `leaflet` bindings don't expose with the options we need
#[wasm_bindgen]
extern "C" {
    type LeafletObject;

    #[wasm_bindgen(method)]
    fn on(this: &LeafletObject, event: &str, handler: &JsValue);

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view_with_options(this: &LeafletObject, center: &LatLng, zoom: f64, options: &JsValue);

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &LeafletObject);

    type LeafletMouseEvent;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &LeafletMouseEvent) -> LatLng;
}

pub struct LeafletMap {
    map: Map,
    config: MapConfig,
    handler: RefCell<Option<Rc<dyn Fn(MapEvent)>>>,
    // Dropping a closure detaches it from leaflet
    listeners: RefCell<Vec<Closure<dyn Fn(JsValue)>>>,
}

impl LeafletMap {
    pub fn new(container: &HtmlElement, config: MapConfig) -> Self {
        let map = Map::new_with_element(container, &MapOptions::default());
        add_tile_layer(&map, &config);

        Self {
            map,
            config,
            handler: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    fn listen(&self, target: &LeafletObject, event: &str, callback: impl Fn(JsValue) + 'static) {
        let closure = Closure::<dyn Fn(JsValue)>::new(callback);
        target.on(event, closure.as_ref());
        self.listeners.borrow_mut().push(closure);
    }
}

impl MapView for LeafletMap {
    fn center_on(&self, coords: Coords, zoom: f64, animate: bool) {
        let center = LatLng::new(coords.lat(), coords.lng());

        if !animate {
            self.map.set_view(&center, zoom);
            return;
        }

        let pan = Object::new();
        set_option(&pan, "duration", self.config.pan_duration.into());
        let options = Object::new();
        set_option(&options, "animate", JsValue::TRUE);
        set_option(&options, "pan", pan.into());

        self.map.unchecked_ref::<LeafletObject>().set_view_with_options(&center, zoom, &options);
    }

    fn place_marker(&self, spec: &MarkerSpec) {
        let options = PopupOptions::default();
        set_option(&options, "maxWidth", self.config.popup_max_width.into());
        set_option(&options, "minWidth", self.config.popup_min_width.into());
        set_option(&options, "autoClose", JsValue::FALSE);
        set_option(&options, "closeOnClick", JsValue::FALSE);
        set_option(&options, "className", spec.style_class.as_str().into());

        let popup = Popup::new(&options, None);
        popup.set_content(&spec.popup_content.as_str().into());

        let marker = Marker::new(&LatLng::new(spec.coords.lat(), spec.coords.lng()));
        marker.add_to(&self.map);
        marker.bind_popup(&popup);

        let target = marker.unchecked_ref::<LeafletObject>();
        target.open_popup();

        if let Some(handler) = self.handler.borrow().clone() {
            let id = spec.workout_id.clone();
            self.listen(target, "click", move |_| handler(MapEvent::MarkerSelected(id.clone())));
        }
    }

    fn on_click(&self, handler: Box<dyn Fn(MapEvent)>) {
        let handler: Rc<dyn Fn(MapEvent)> = Rc::from(handler);
        *self.handler.borrow_mut() = Some(handler.clone());

        self.listen(self.map.unchecked_ref(), "click", move |event: JsValue| {
            let latlng = event.unchecked_into::<LeafletMouseEvent>().latlng();
            handler(MapEvent::Clicked(Coords::wrapped(latlng.lat(), latlng.lng())));
        });
    }
}

fn set_option(target: &JsValue, key: &str, value: JsValue) {
    if let Err(err) = Reflect::set(target, &key.into(), &value) {
        tracing::warn!("Failed to set leaflet option {key}: {err:?}");
    }
}

fn add_tile_layer(map: &Map, config: &MapConfig) {
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    set_option(&opts, "attribution", config.attribution.as_str().into());
    TileLayer::new_options(&config.tile_url, &opts).add_to(map);
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub node_ref: NodeRef,
}

/// Mount point for the leaflet map, which is created once a position is known.
#[function_component]
pub fn MapComponent(props: &Props) -> Html {
    html! {
        <div id="map" class="map" ref={props.node_ref.clone()}></div>
    }
}
