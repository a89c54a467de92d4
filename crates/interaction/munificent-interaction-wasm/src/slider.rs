//! Before/after comparison slider bound to a container and its handle.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, TouchEvent};

use munificent_interaction::{
    ComparisonSlider, InputPhase, RawPointerEvent, SliderConfig, POSITION_VAR,
};

use crate::dom::{
    bounding_rect, core_error, document, first_touch, mouse_point, parse_config, set_style,
};

type Feed = Rc<dyn Fn(RawPointerEvent)>;

#[wasm_bindgen]
pub struct BeforeAfterSlider {
    core: Rc<RefCell<ComparisonSlider>>,
    container: HtmlElement,
    listeners: Vec<EventListener>,
}

/// Run one event through the slider and publish the divider when it moved.
fn apply(
    core: &RefCell<ComparisonSlider>,
    container: &HtmlElement,
    event: RawPointerEvent,
) -> Option<f32> {
    let mut slider = core.borrow_mut();
    // Layout can shift between events; measure on every signal.
    slider.set_bounds(bounding_rect(container));
    let moved = slider.handle_raw(event);
    if moved.is_some() {
        set_style(container, POSITION_VAR, &slider.style_value());
    }
    moved
}

fn mouse(phase: InputPhase, event: &Event) -> RawPointerEvent {
    let at = event
        .dyn_ref::<MouseEvent>()
        .map(mouse_point)
        .unwrap_or_default();
    RawPointerEvent::Mouse { phase, at }
}

fn touch(phase: InputPhase, event: &Event) -> RawPointerEvent {
    let first_touch = event.dyn_ref::<TouchEvent>().and_then(first_touch);
    RawPointerEvent::Touch { phase, first_touch }
}

#[wasm_bindgen]
impl BeforeAfterSlider {
    /// Wire the slider: presses on `handle`, mouse moves over `container`,
    /// touch moves and releases anywhere on the document. The position is
    /// published on `container` as the `--slider-position` custom property.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        handle: HtmlElement,
        config: JsValue,
    ) -> Result<BeforeAfterSlider, JsError> {
        console_error_panic_hook::set_once();
        let cfg: SliderConfig = parse_config(config, "slider")?;
        let mut slider = ComparisonSlider::new(cfg).map_err(|e| core_error("slider", e))?;
        slider.mount(bounding_rect(&container));
        set_style(&container, POSITION_VAR, &slider.style_value());
        let core = Rc::new(RefCell::new(slider));

        let feed: Feed = {
            let core = Rc::clone(&core);
            let container = container.clone();
            Rc::new(move |event| {
                apply(&core, &container, event);
            })
        };

        let document = document()?;
        let active = EventListenerOptions::enable_prevent_default();
        let mut listeners = Vec::with_capacity(7);

        let f = Rc::clone(&feed);
        listeners.push(EventListener::new_with_options(
            &handle,
            "mousedown",
            active,
            move |e| {
                e.prevent_default();
                f(mouse(InputPhase::Start, e));
            },
        ));
        let f = Rc::clone(&feed);
        listeners.push(EventListener::new_with_options(
            &handle,
            "touchstart",
            active,
            move |e| {
                e.prevent_default();
                f(touch(InputPhase::Start, e));
            },
        ));
        let f = Rc::clone(&feed);
        listeners.push(EventListener::new(&container, "mousemove", move |e| {
            f(mouse(InputPhase::Move, e))
        }));
        let f = Rc::clone(&feed);
        listeners.push(EventListener::new(&document, "touchmove", move |e| {
            f(touch(InputPhase::Move, e))
        }));
        let f = Rc::clone(&feed);
        listeners.push(EventListener::new(&document, "mouseup", move |e| {
            f(mouse(InputPhase::End, e))
        }));
        for name in ["touchend", "touchcancel"] {
            let f = Rc::clone(&feed);
            listeners.push(EventListener::new(&document, name, move |_| {
                f(RawPointerEvent::Touch {
                    phase: InputPhase::End,
                    first_touch: None,
                })
            }));
        }

        debug!("slider: mounted with {} listeners", listeners.len());
        Ok(BeforeAfterSlider {
            core,
            container,
            listeners,
        })
    }

    /// Current position in percent.
    pub fn position(&self) -> f32 {
        self.core.borrow().position()
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.core.borrow().is_dragging()
    }

    /// Feed a pointer event by hand, in the `{ device, phase, at | first_touch }`
    /// shape. It takes the same path as DOM events, so the divider follows.
    /// Returns the new position when it moved.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&self, event: JsValue) -> Result<Option<f32>, JsError> {
        let event: RawPointerEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsError::new(&format!("slider event error: {e}")))?;
        Ok(apply(&self.core, &self.container, event))
    }

    /// Detach every listener. Later events are ignored.
    pub fn unmount(&mut self) {
        self.listeners.clear();
        self.core.borrow_mut().unmount();
        debug!("slider: unmounted");
    }
}

impl Drop for BeforeAfterSlider {
    fn drop(&mut self) {
        self.unmount();
    }
}
