//! Minimal in-process store: `get`, `set`, `subscribe`.
//!
//! Page chrome (header, footer, contact modal) shares the contact-modal and
//! theme state through this contract. Single-threaded; handles are cheap
//! `Rc` clones of the same state. Every effective write bumps an epoch and
//! notifies subscribers with the new state; writes that change nothing are
//! silent.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::InteractionError;
use crate::Result;

type Listener<S> = Rc<dyn Fn(&S)>;

struct StoreInner<S> {
    state: S,
    epoch: u64,
    next_id: u64,
    listeners: Vec<(u64, Listener<S>)>,
}

pub struct Store<S> {
    inner: Rc<RefCell<StoreInner<S>>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("epoch", &inner.epoch)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}

impl<S> Store<S>
where
    S: Clone + PartialEq + 'static,
{
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state: initial,
                epoch: 0,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> S {
        self.inner.borrow().state.clone()
    }

    /// Number of effective writes so far.
    pub fn epoch(&self) -> u64 {
        self.inner.borrow().epoch
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Replace the state. Returns whether it changed.
    pub fn set(&self, next: S) -> bool {
        self.update(|state| *state = next)
    }

    /// Mutate part of the state in place. Returns whether it changed.
    pub fn update(&self, f: impl FnOnce(&mut S)) -> bool {
        let (snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let mut next = inner.state.clone();
            f(&mut next);
            if next == inner.state {
                return false;
            }
            inner.state = next;
            inner.epoch = inner.epoch.wrapping_add(1);
            let listeners: Vec<Listener<S>> =
                inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (inner.state.clone(), listeners)
        };
        // Borrow released: listeners may read, write or subscribe.
        for listener in listeners {
            listener(&snapshot);
        }
        true
    }

    /// Register `listener`; it runs after every effective write until the
    /// returned [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&S) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id = inner.next_id.wrapping_add(1);
            inner.listeners.push((id, Rc::new(listener)));
            id
        };
        let weak: Weak<RefCell<StoreInner<S>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}

impl<S> Store<S>
where
    S: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    /// Merge a partial JSON object into the state (`set(partial)`).
    /// Non-object patches and values the state cannot hold are errors.
    pub fn set_partial(&self, patch: serde_json::Value) -> Result<bool> {
        let serde_json::Value::Object(patch) = patch else {
            return Err(InteractionError::Serialization {
                reason: "store patch must be an object".into(),
            });
        };
        let mut merged = serde_json::to_value(self.get())?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(patch);
        }
        let next: S = serde_json::from_value(merged)?;
        Ok(self.set(next))
    }
}

/// Handle for a store subscription; releases it on drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Contact modal visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactModalState {
    pub is_open: bool,
}

impl Store<ContactModalState> {
    pub fn open(&self) -> bool {
        debug!("contact modal: open");
        self.update(|s| s.is_open = true)
    }

    pub fn close(&self) -> bool {
        debug!("contact modal: close");
        self.update(|s| s.is_open = false)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeState {
    pub theme: Theme,
}

impl Store<ThemeState> {
    pub fn toggle(&self) -> Theme {
        self.update(|s| s.theme = s.theme.toggled());
        let theme = self.get().theme;
        debug!("theme: now {theme:?}");
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_set_and_epoch() {
        let store = Store::new(ContactModalState::default());
        assert!(!store.get().is_open);
        assert!(store.open());
        assert!(!store.open());
        assert_eq!(store.epoch(), 1);
        assert!(store.close());
        assert_eq!(store.epoch(), 2);
    }

    #[test]
    fn subscribers_see_changes_until_dropped() {
        let store = Store::new(ThemeState::default());
        let seen = Rc::new(Cell::new(0));
        let sub = {
            let seen = Rc::clone(&seen);
            store.subscribe(move |_| seen.set(seen.get() + 1))
        };
        assert_eq!(store.toggle(), Theme::Dark);
        store.set(ThemeState { theme: Theme::Dark });
        assert_eq!(seen.get(), 1);
        drop(sub);
        assert_eq!(store.subscriber_count(), 0);
        store.toggle();
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn listener_may_write_back() {
        let store = Store::new(ContactModalState::default());
        let handle = store.clone();
        let _sub = store.subscribe(move |s| {
            if s.is_open {
                handle.close();
            }
        });
        store.open();
        assert!(!store.get().is_open);
        assert_eq!(store.epoch(), 2);
    }

    #[test]
    fn unsubscribe_after_store_dropped_is_harmless() {
        let store = Store::new(ThemeState::default());
        let sub = store.subscribe(|_| {});
        drop(store);
        sub.unsubscribe();
    }

    #[test]
    fn partial_json_set() {
        let store = Store::new(ContactModalState::default());
        assert!(store
            .set_partial(serde_json::json!({ "isOpen": true }))
            .unwrap());
        assert!(store.get().is_open);
        assert!(store.set_partial(serde_json::json!(true)).is_err());

        let theme = Store::new(ThemeState::default());
        theme
            .set_partial(serde_json::json!({ "theme": "dark" }))
            .unwrap();
        assert_eq!(theme.get().theme, Theme::Dark);
        assert!(theme
            .set_partial(serde_json::json!({ "theme": "sepia" }))
            .is_err());
    }
}
