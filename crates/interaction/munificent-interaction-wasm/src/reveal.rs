//! Scroll-reveal sections over `IntersectionObserver`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use munificent_interaction::{IntersectionEntry, RevealConfig, RevealCoordinator};

use crate::dom::{core_error, parse_config};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Tracked {
    coordinator: RevealCoordinator<u32>,
    elements: Vec<(u32, Element)>,
    next_key: u32,
}

impl Tracked {
    fn key_of(&self, target: &Element) -> Option<u32> {
        let target: &JsValue = target.as_ref();
        self.elements
            .iter()
            .find(|(_, el)| {
                let el: &JsValue = el.as_ref();
                el == target
            })
            .map(|(k, _)| *k)
    }

    fn element(&self, key: u32) -> Option<&Element> {
        self.elements.iter().find(|(k, _)| *k == key).map(|(_, el)| el)
    }
}

/// Adds the active class to each observed element the first time it
/// becomes visible, then stops watching it.
#[wasm_bindgen]
pub struct RevealSection {
    tracked: Rc<RefCell<Tracked>>,
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

pub(crate) fn observer_init(threshold: f64, root_margin: Option<&str>) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    init
}

/// Collect the typed entries of an observer batch.
pub(crate) fn entries_of(batch: &Array) -> Vec<IntersectionObserverEntry> {
    batch
        .iter()
        .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
        .collect()
}

#[wasm_bindgen]
impl RevealSection {
    #[wasm_bindgen(constructor)]
    pub fn new(element: Element, config: JsValue) -> Result<RevealSection, JsError> {
        console_error_panic_hook::set_once();
        let cfg: RevealConfig = parse_config(config, "reveal")?;
        let init = observer_init(cfg.threshold, cfg.root_margin.as_deref());
        let active_class = cfg.active_class.clone();
        let coordinator = RevealCoordinator::new(cfg).map_err(|e| core_error("reveal", e))?;
        let tracked = Rc::new(RefCell::new(Tracked {
            coordinator,
            elements: Vec::new(),
            next_key: 0,
        }));

        let callback: ObserverCallback = {
            let tracked = Rc::clone(&tracked);
            Closure::new(move |batch: Array, observer: IntersectionObserver| {
                let mut tracked = tracked.borrow_mut();
                let entries: Vec<IntersectionEntry<u32>> = entries_of(&batch)
                    .iter()
                    .filter_map(|entry| {
                        let key = tracked.key_of(&entry.target())?;
                        Some(IntersectionEntry::new(
                            key,
                            entry.is_intersecting(),
                            entry.intersection_ratio(),
                        ))
                    })
                    .collect();
                for key in tracked.coordinator.handle_entries(entries) {
                    if let Some(el) = tracked.element(key) {
                        if let Err(err) = el.class_list().add_1(&active_class) {
                            warn!("reveal: cannot add {active_class}: {err:?}");
                        }
                        observer.unobserve(el);
                    }
                }
            })
        };
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| JsError::new(&format!("reveal observer error: {e:?}")))?;

        let section = RevealSection {
            tracked,
            observer,
            _callback: callback,
        };
        section.observe(element);
        Ok(section)
    }

    /// Watch another element with the same settings.
    pub fn observe(&self, element: Element) {
        let mut tracked = self.tracked.borrow_mut();
        if tracked.key_of(&element).is_some() {
            return;
        }
        let key = tracked.next_key;
        tracked.next_key += 1;
        tracked.coordinator.observe(key);
        self.observer.observe(&element);
        tracked.elements.push((key, element));
        debug!("reveal: observing element #{key}");
    }

    /// Whether `element` has been revealed.
    #[wasm_bindgen(js_name = isActivated)]
    pub fn is_activated(&self, element: &Element) -> bool {
        let tracked = self.tracked.borrow();
        tracked
            .key_of(element)
            .is_some_and(|key| tracked.coordinator.is_activated(&key))
    }

    /// Number of elements still waiting to be revealed.
    #[wasm_bindgen(js_name = pendingCount)]
    pub fn pending_count(&self) -> u32 {
        self.tracked.borrow().coordinator.pending().count() as u32
    }

    pub fn unmount(&self) {
        self.observer.disconnect();
        let mut tracked = self.tracked.borrow_mut();
        tracked.coordinator.dispose();
        tracked.elements.clear();
    }
}

impl Drop for RevealSection {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
