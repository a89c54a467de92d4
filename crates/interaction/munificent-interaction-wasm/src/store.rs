//! Shared page-chrome state for JS: contact modal and theme.

use js_sys::Function;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use munificent_interaction::{ContactModalState, Store, Subscription, ThemeState};

fn to_js<S: Serialize>(state: &S) -> Result<JsValue, JsError> {
    swb::to_value(state).map_err(|e| JsError::new(&format!("store state error: {e}")))
}

fn set_from_js<S>(store: &Store<S>, partial: JsValue) -> Result<bool, JsError>
where
    S: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    let patch: serde_json::Value =
        swb::from_value(partial).map_err(|e| JsError::new(&format!("store patch error: {e}")))?;
    store
        .set_partial(patch)
        .map_err(|e| JsError::new(&format!("store error: {e}")))
}

fn subscribe_js<S>(store: &Store<S>, callback: Function) -> StoreSubscription
where
    S: Clone + PartialEq + Serialize + 'static,
{
    let subscription = store.subscribe(move |state: &S| {
        let value = match swb::to_value(state) {
            Ok(value) => value,
            Err(err) => {
                warn!("store: cannot convert state for subscriber: {err}");
                return;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &value) {
            warn!("store: subscriber threw: {err:?}");
        }
    });
    StoreSubscription {
        inner: Some(subscription),
    }
}

/// Live subscription; call `unsubscribe()` (or `free()`) to stop.
#[wasm_bindgen]
pub struct StoreSubscription {
    inner: Option<Subscription>,
}

#[wasm_bindgen]
impl StoreSubscription {
    pub fn unsubscribe(&mut self) {
        if let Some(sub) = self.inner.take() {
            sub.unsubscribe();
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }
}

#[wasm_bindgen]
pub struct ContactModalStore {
    store: Store<ContactModalState>,
}

#[wasm_bindgen]
impl ContactModalStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ContactModalStore {
        ContactModalStore {
            store: Store::new(ContactModalState::default()),
        }
    }

    /// `{ isOpen }`.
    pub fn get(&self) -> Result<JsValue, JsError> {
        to_js(&self.store.get())
    }

    /// Merge `partial` into the state. Returns whether anything changed.
    pub fn set(&self, partial: JsValue) -> Result<bool, JsError> {
        set_from_js(&self.store, partial)
    }

    pub fn subscribe(&self, callback: Function) -> StoreSubscription {
        subscribe_js(&self.store, callback)
    }

    pub fn open(&self) -> bool {
        self.store.open()
    }

    pub fn close(&self) -> bool {
        self.store.close()
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.store.get().is_open
    }
}

impl Default for ContactModalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub struct ThemeStore {
    store: Store<ThemeState>,
}

#[wasm_bindgen]
impl ThemeStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ThemeStore {
        ThemeStore {
            store: Store::new(ThemeState::default()),
        }
    }

    /// `{ theme: "light" | "dark" }`.
    pub fn get(&self) -> Result<JsValue, JsError> {
        to_js(&self.store.get())
    }

    pub fn set(&self, partial: JsValue) -> Result<bool, JsError> {
        set_from_js(&self.store, partial)
    }

    pub fn subscribe(&self, callback: Function) -> StoreSubscription {
        subscribe_js(&self.store, callback)
    }

    /// Flip the theme and return the new one's name.
    pub fn toggle(&self) -> String {
        match self.store.toggle() {
            t if t.is_dark() => "dark".into(),
            _ => "light".into(),
        }
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}
