//! Custom cursor overlay: a dot that follows the pointer and an outline
//! that trails it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::{Object, Reflect};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, FillMode, HtmlElement, KeyframeAnimationOptions, MouseEvent, Window};

use munificent_interaction::{
    CursorConfig, CursorFrame, CursorOverlay, Scope, TouchCapabilities, INTERACTIVE_SELECTOR,
};

use crate::dom::{clear_style, document, mouse_point, parse_config, set_style, toggle_class, window};

thread_local! {
    /// Set while an active overlay owns the page pointer.
    static OVERLAY_CLAIMED: Cell<bool> = const { Cell::new(false) };
}

/// Whether an active overlay currently owns the page pointer.
#[wasm_bindgen(js_name = cursorOverlayClaimed)]
pub fn cursor_overlay_claimed() -> bool {
    OVERLAY_CLAIMED.with(Cell::get)
}

#[wasm_bindgen]
pub struct CustomCursor {
    core: Rc<RefCell<CursorOverlay>>,
    scope: Scope,
}

fn touch_capabilities(window: &Window) -> TouchCapabilities {
    let has_touch_events = Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    TouchCapabilities {
        has_touch_events,
        max_touch_points: window.navigator().max_touch_points().max(0) as u32,
    }
}

/// Whether `node` is, or sits inside, an interactive element.
fn within_interactive(node: Option<Element>) -> bool {
    node.and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
        .is_some()
}

fn event_target(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn related_target(event: &Event) -> Option<Element> {
    event
        .dyn_ref::<MouseEvent>()
        .and_then(MouseEvent::related_target)
        .and_then(|t| t.dyn_into::<Element>().ok())
}

fn px(v: f32) -> String {
    format!("{v}px")
}

fn keyframe(left: &str, top: &str) -> Result<Object, JsValue> {
    let frame = Object::new();
    Reflect::set(&frame, &JsValue::from_str("left"), &JsValue::from_str(left))?;
    Reflect::set(&frame, &JsValue::from_str("top"), &JsValue::from_str(top))?;
    Ok(frame)
}

fn draw(dot: &HtmlElement, outline: &HtmlElement, frame: &CursorFrame) {
    set_style(dot, "left", &px(frame.dot.x));
    set_style(dot, "top", &px(frame.dot.y));

    let target = match keyframe(&px(frame.outline_target.x), &px(frame.outline_target.y)) {
        Ok(target) => target,
        Err(err) => {
            warn!("cursor: keyframe build failed: {err:?}");
            return;
        }
    };
    let options = KeyframeAnimationOptions::new();
    options.set_duration(f64::from(frame.transition.duration_ms));
    options.set_easing(&frame.transition.easing.css());
    options.set_fill(FillMode::Forwards);
    outline.animate_with_keyframe_animation_options(Some(&target), &options);
}

#[wasm_bindgen]
impl CustomCursor {
    /// Take over the pointer with `dot` and `outline`. On touch-capable hosts
    /// both nodes are hidden and nothing is installed. Only one active overlay
    /// may exist at a time; a second is an error until the first unmounts.
    #[wasm_bindgen(constructor)]
    pub fn new(dot: HtmlElement, outline: HtmlElement, config: JsValue) -> Result<CustomCursor, JsError> {
        console_error_panic_hook::set_once();
        let cfg: CursorConfig = parse_config(config, "cursor")?;
        let hover_class = cfg.hover_class.clone();
        let window = window()?;
        let mut overlay = CursorOverlay::new(touch_capabilities(&window), cfg);
        let mut scope = Scope::new();

        if !overlay.activate() {
            set_style(&dot, "display", "none");
            set_style(&outline, "display", "none");
            debug!("cursor: touch host, overlay disabled");
            return Ok(CustomCursor {
                core: Rc::new(RefCell::new(overlay)),
                scope,
            });
        }

        let document = document()?;
        if OVERLAY_CLAIMED.with(|claimed| claimed.replace(true)) {
            return Err(JsError::new("cursor error: an overlay is already active"));
        }
        // Released last: the scope runs newest first.
        scope.defer("overlay claim", || OVERLAY_CLAIMED.with(|claimed| claimed.set(false)));
        let core = Rc::new(RefCell::new(overlay));

        if let Some(root) = document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            set_style(&root, "cursor", "none");
            scope.defer("native cursor", move || clear_style(&root, "cursor"));
        }
        {
            let outline = outline.clone();
            let class = hover_class.clone();
            scope.defer("hover class", move || toggle_class(&outline, &class, false));
        }
        {
            let core = Rc::clone(&core);
            scope.defer("overlay", move || core.borrow_mut().deactivate());
        }

        let apply_hover = {
            let outline = outline.clone();
            Rc::new(move |change: Option<bool>| {
                if let Some(show) = change {
                    toggle_class(&outline, &hover_class, show);
                }
            })
        };

        let mut listeners = Vec::with_capacity(5);
        {
            let core = Rc::clone(&core);
            let (dot, outline) = (dot.clone(), outline.clone());
            listeners.push(EventListener::new(&document, "mousemove", move |e| {
                let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let frame = core
                    .borrow_mut()
                    .pointer_move(mouse_point(mouse), js_sys::Date::now());
                if let Some(frame) = frame {
                    draw(&dot, &outline, &frame);
                }
            }));
        }
        {
            let (core, hover) = (Rc::clone(&core), Rc::clone(&apply_hover));
            listeners.push(EventListener::new(&document, "mousedown", move |_| {
                let change = core.borrow_mut().pointer_down();
                hover(change);
            }));
        }
        {
            let (core, hover) = (Rc::clone(&core), Rc::clone(&apply_hover));
            listeners.push(EventListener::new(&document, "mouseup", move |_| {
                let change = core.borrow_mut().pointer_up();
                hover(change);
            }));
        }
        {
            let (core, hover) = (Rc::clone(&core), Rc::clone(&apply_hover));
            listeners.push(EventListener::new(&document, "mouseover", move |e| {
                let interactive = within_interactive(event_target(e));
                let change = core.borrow_mut().pointer_over(interactive);
                hover(change);
            }));
        }
        {
            let (core, hover) = (Rc::clone(&core), Rc::clone(&apply_hover));
            listeners.push(EventListener::new(&document, "mouseout", move |e| {
                let interactive = within_interactive(related_target(e));
                let change = core.borrow_mut().pointer_out(interactive);
                hover(change);
            }));
        }
        // Listeners detach first on teardown.
        scope.defer("document listeners", move || drop(listeners));

        debug!("cursor: overlay active");
        Ok(CustomCursor { core, scope })
    }

    /// False on touch-capable hosts.
    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.core.borrow().is_enabled()
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.core.borrow().is_active()
    }

    #[wasm_bindgen(js_name = showsHover)]
    pub fn shows_hover(&self) -> bool {
        self.core.borrow().shows_hover()
    }

    /// Remove listeners, restore the native cursor and clear hover state.
    pub fn unmount(&mut self) {
        self.scope.dispose();
    }
}
