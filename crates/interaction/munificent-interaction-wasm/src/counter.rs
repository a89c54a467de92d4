//! Count-up statistic started when its element scrolls into view.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use js_sys::Array;
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, IntersectionObserver};

use munificent_interaction::{meets_threshold, CounterConfig, CounterTween, TICK_INTERVAL_MS};

use crate::dom::{core_error, parse_config};
use crate::reveal::{entries_of, observer_init};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;
type TimerSlot = Rc<RefCell<Option<Interval>>>;

#[wasm_bindgen]
pub struct RevealCounter {
    core: Rc<RefCell<CounterTween>>,
    timer: TimerSlot,
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

fn start_ticking(core: &Rc<RefCell<CounterTween>>, timer: &TimerSlot, element: &HtmlElement) {
    let interval = {
        let core = Rc::clone(core);
        let slot = Rc::clone(timer);
        let element = element.clone();
        Interval::new(TICK_INTERVAL_MS, move || {
            let finished = {
                let mut tween = core.borrow_mut();
                if tween.tick().is_some() {
                    element.set_text_content(Some(&tween.display()));
                }
                !tween.is_running()
            };
            if finished {
                // Clearing from inside the tick is fine: the closure is freed
                // once this call returns.
                let stale = slot.borrow_mut().take();
                drop(stale);
            }
        })
    };
    *timer.borrow_mut() = Some(interval);
}

#[wasm_bindgen]
impl RevealCounter {
    /// Count `element`'s text from 0 to `end` once it becomes visible.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, end: u32, config: JsValue) -> Result<RevealCounter, JsError> {
        console_error_panic_hook::set_once();
        let cfg: CounterConfig = parse_config(config, "counter")?;
        cfg.validate().map_err(|e| core_error("counter", e))?;
        let init = observer_init(cfg.threshold, None);
        let threshold = cfg.threshold;
        let tween = CounterTween::new(u64::from(end), cfg);
        element.set_text_content(Some(&tween.display()));
        let core = Rc::new(RefCell::new(tween));
        let timer: TimerSlot = Rc::new(RefCell::new(None));

        let callback: ObserverCallback = {
            let core = Rc::clone(&core);
            let timer = Rc::clone(&timer);
            let element = element.clone();
            Closure::new(move |batch: Array, observer: IntersectionObserver| {
                let visible = entries_of(&batch).iter().any(|e| {
                    meets_threshold(e.is_intersecting(), e.intersection_ratio(), threshold)
                });
                let started = core.borrow_mut().on_visibility(visible);
                if started {
                    observer.unobserve(&element);
                    start_ticking(&core, &timer, &element);
                }
            })
        };
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| JsError::new(&format!("counter observer error: {e:?}")))?;
        observer.observe(&element);

        Ok(RevealCounter {
            core,
            timer,
            observer,
            _callback: callback,
        })
    }

    /// Value currently shown.
    pub fn current(&self) -> f64 {
        self.core.borrow().current() as f64
    }

    #[wasm_bindgen(js_name = hasStarted)]
    pub fn has_started(&self) -> bool {
        self.core.borrow().has_started()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.core.borrow().is_running()
    }

    /// Change target or duration. A running count stops where it is.
    pub fn reconfigure(&self, end: u32, duration_ms: f64) {
        let running = {
            let mut tween = self.core.borrow_mut();
            tween.reconfigure(u64::from(end), duration_ms);
            tween.is_running()
        };
        if !running {
            self.timer.borrow_mut().take();
        }
    }

    pub fn unmount(&self) {
        self.core.borrow_mut().cancel();
        self.timer.borrow_mut().take();
        self.observer.disconnect();
        debug!("counter: unmounted");
    }
}

impl Drop for RevealCounter {
    fn drop(&mut self) {
        self.unmount();
    }
}
