//! Scoped teardown.
//!
//! Widgets register the undo action for every side effect as they perform it.
//! Disposing the scope (explicitly or by dropping it) runs the actions once,
//! newest first, so setup and teardown stay symmetric on every exit path.

use std::fmt;

use log::trace;

#[derive(Default)]
pub struct Scope {
    actions: Vec<(&'static str, Box<dyn FnOnce()>)>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` to run at disposal. `label` is only used for logging.
    pub fn defer(&mut self, label: &'static str, action: impl FnOnce() + 'static) {
        self.actions.push((label, Box::new(action)));
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run every registered action in reverse order. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        while let Some((label, action)) = self.actions.pop() {
            trace!("scope: release {label}");
            action();
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.actions.iter().map(|(label, _)| *label).collect();
        f.debug_struct("Scope").field("pending", &labels).finish()
    }
}
