use log::warn;
use serde::de::DeserializeOwned;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, MouseEvent, TouchEvent, TouchList, Window};

use munificent_interaction::{InteractionError, Point, Rect};

pub(crate) fn window() -> Result<Window, JsError> {
    web_sys::window().ok_or_else(|| JsError::new("no global window"))
}

pub(crate) fn document() -> Result<Document, JsError> {
    window()?
        .document()
        .ok_or_else(|| JsError::new("window has no document"))
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Deserialize a widget config object, defaulting on `undefined`/`null`.
pub(crate) fn parse_config<T>(config: JsValue, what: &str) -> Result<T, JsError>
where
    T: DeserializeOwned + Default,
{
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(T::default());
    }
    swb::from_value(config).map_err(|e| JsError::new(&format!("{what} config error: {e}")))
}

pub(crate) fn core_error(what: &str, err: InteractionError) -> JsError {
    JsError::new(&format!("{what} error: {err}"))
}

pub(crate) fn bounding_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

pub(crate) fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f32, event.client_y() as f32)
}

fn first_of(list: TouchList) -> Option<Point> {
    list.get(0)
        .map(|t| Point::new(t.client_x() as f32, t.client_y() as f32))
}

/// First active touch anywhere on the page.
pub(crate) fn first_touch(event: &TouchEvent) -> Option<Point> {
    first_of(event.touches())
}

/// First touch that started on the listening element.
pub(crate) fn first_target_touch(event: &TouchEvent) -> Option<Point> {
    first_of(event.target_touches())
}

pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        warn!("style {property}={value} rejected: {err:?}");
    }
}

pub(crate) fn clear_style(el: &HtmlElement, property: &str) {
    if let Err(err) = el.style().remove_property(property) {
        warn!("style {property} removal rejected: {err:?}");
    }
}

pub(crate) fn toggle_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        warn!("class {class} toggle rejected: {err:?}");
    }
}
