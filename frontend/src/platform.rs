use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use gloo_utils::window;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Element, GeolocationPosition, GeolocationPositionError, Storage};
use workout_tracker_lib::{
    Coords, GeolocationError, Host, StorageError,
    constants::{ROW_CLASS, ROW_ID_ATTRIBUTE},
    sidebar::RowNode,
    storage::KeyValueStore,
};

/// The browser's local storage. Missing storage (e.g. disabled by the user)
/// turns every access into an error instead of failing startup.
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = match window().local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::error!("Local storage unavailable: {err:?}");
                None
            }
        };

        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable("no local storage".into()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Read(format!("{err:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }
}

pub struct BrowserHost;

impl Host for BrowserHost {
    fn alert(&self, message: &str) {
        if let Err(err) = window().alert_with_message(message) {
            tracing::error!("Failed to show alert: {err:?}");
        }
    }

    fn restart(&self) {
        if let Err(err) = window().location().set_href("/") {
            tracing::error!("Failed to reload: {err:?}");
        }
    }
}

/// A DOM element inside the sidebar list.
pub struct DomNode(pub Element);

impl RowNode for DomNode {
    fn is_row(&self) -> bool {
        self.0.class_list().contains(ROW_CLASS)
    }

    fn row_id(&self) -> Option<String> {
        self.0.get_attribute(ROW_ID_ATTRIBUTE)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(DomNode)
    }
}

/// Asks the browser for the current position once. Resolves when the user
/// grants or denies the permission prompt.
pub async fn current_position() -> Result<Coords, GeolocationError> {
    let navigator = window().navigator();
    let geolocation = match navigator.geolocation() {
        Ok(geolocation) if !geolocation.is_undefined() => geolocation,
        _ => return Err(GeolocationError::Unsupported),
    };

    let (tx, rx) = oneshot::channel();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let success_tx = tx.clone();
    let on_success = Closure::once_into_js(move |position: GeolocationPosition| {
        let coords = position.coords();
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(Coords::wrapped(coords.latitude(), coords.longitude())));
        }
    });

    let error_tx = tx;
    let on_error = Closure::once_into_js(move |error: GeolocationPositionError| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(GeolocationError::Denied(error.message())));
        }
    });

    geolocation
        .get_current_position_with_error_callback(on_success.unchecked_ref(), Some(on_error.unchecked_ref()))
        .map_err(|err| GeolocationError::Denied(format!("{err:?}")))?;

    rx.await
        .unwrap_or_else(|_| Err(GeolocationError::Denied("position request dropped".into())))
}
