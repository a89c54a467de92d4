//! Swipeable carousel bound to a sliding track element.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Function;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, TouchEvent};

use munificent_interaction::{CarouselConfig, SwipeCarousel, SwipeOutcome};

use crate::dom::{core_error, first_target_touch, parse_config, set_style};

type ChangeHook = Rc<RefCell<Option<Function>>>;

#[wasm_bindgen]
pub struct Carousel {
    core: Rc<RefCell<SwipeCarousel>>,
    /// `None` once unmounted; every control is a no-op from then on.
    track: Option<HtmlElement>,
    on_change: ChangeHook,
    listeners: Vec<EventListener>,
}

fn render(track: &HtmlElement, carousel: &SwipeCarousel) {
    let t = carousel.transform();
    set_style(track, "transition", &t.css_transition());
    set_style(track, "transform", &t.css_transform());
}

fn notify(hook: &ChangeHook, index: usize) {
    // Clone out so the callback may replace the hook.
    let callback = hook.borrow().clone();
    if let Some(callback) = callback {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from(index as u32)) {
            warn!("carousel: change callback threw: {err:?}");
        }
    }
}

#[wasm_bindgen]
impl Carousel {
    /// Bind `slide_count` slides laid out side by side inside `track`.
    #[wasm_bindgen(constructor)]
    pub fn new(track: HtmlElement, slide_count: u32, config: JsValue) -> Result<Carousel, JsError> {
        console_error_panic_hook::set_once();
        let cfg: CarouselConfig = parse_config(config, "carousel")?;
        let carousel =
            SwipeCarousel::new(slide_count as usize, cfg).map_err(|e| core_error("carousel", e))?;
        render(&track, &carousel);
        let core = Rc::new(RefCell::new(carousel));
        let on_change: ChangeHook = Rc::new(RefCell::new(None));

        let mut listeners = Vec::with_capacity(4);
        {
            let core = Rc::clone(&core);
            listeners.push(EventListener::new(&track, "touchstart", move |e| {
                if let Some(at) = e.dyn_ref::<TouchEvent>().and_then(first_target_touch) {
                    core.borrow_mut().touch_start(at.x);
                }
            }));
        }
        {
            let core = Rc::clone(&core);
            listeners.push(EventListener::new(&track, "touchmove", move |e| {
                if let Some(at) = e.dyn_ref::<TouchEvent>().and_then(first_target_touch) {
                    core.borrow_mut().touch_move(at.x);
                }
            }));
        }
        for name in ["touchend", "touchcancel"] {
            let core = Rc::clone(&core);
            let track_el = track.clone();
            let hook = Rc::clone(&on_change);
            listeners.push(EventListener::new(&track, name, move |_| {
                let outcome = core.borrow_mut().touch_end();
                if let SwipeOutcome::Committed { index, .. } = outcome {
                    render(&track_el, &core.borrow());
                    notify(&hook, index);
                }
            }));
        }

        debug!("carousel: bound {slide_count} slides");
        Ok(Carousel {
            core,
            track: Some(track),
            on_change,
            listeners,
        })
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> u32 {
        self.core.borrow().active_index() as u32
    }

    #[wasm_bindgen(js_name = slideCount)]
    pub fn slide_count(&self) -> u32 {
        self.core.borrow().slide_count() as u32
    }

    pub fn next(&self) -> u32 {
        self.step(SwipeCarousel::next)
    }

    pub fn prev(&self) -> u32 {
        self.step(SwipeCarousel::prev)
    }

    /// Jump to `index`; out-of-range indices are ignored and return false.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, index: u32) -> bool {
        let Some(track) = &self.track else {
            return false;
        };
        let moved = self.core.borrow_mut().go_to(index as usize);
        if moved {
            render(track, &self.core.borrow());
            notify(&self.on_change, index as usize);
        }
        moved
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.track.is_some()
    }

    /// Called with the new index after every slide change.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Option<Function>) {
        if self.track.is_some() {
            *self.on_change.borrow_mut() = callback;
        }
    }

    /// Detach listeners and drop the track. The index freezes.
    pub fn unmount(&mut self) {
        self.listeners.clear();
        self.on_change.borrow_mut().take();
        if self.track.take().is_some() {
            debug!("carousel: unmounted");
        }
    }
}

impl Carousel {
    fn step(&self, f: impl FnOnce(&mut SwipeCarousel) -> usize) -> u32 {
        let Some(track) = &self.track else {
            return self.active_index();
        };
        let (before, after) = {
            let mut carousel = self.core.borrow_mut();
            let before = carousel.active_index();
            (before, f(&mut carousel))
        };
        if before != after {
            render(track, &self.core.borrow());
            notify(&self.on_change, after);
        }
        after as u32
    }
}
