//! Viewport reveal.
//!
//! One-shot activation per observed element: the first intersection callback
//! at or above the threshold activates it, and nothing deactivates it again
//! for the lifetime of the coordinator.

use std::collections::HashMap;
use std::hash::Hash;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::RevealConfig;
use crate::Result;

/// Visibility rule shared by every observer-driven widget: intersecting, with
/// a ratio at or above `threshold`.
#[inline]
pub fn meets_threshold(is_intersecting: bool, intersection_ratio: f64, threshold: f64) -> bool {
    is_intersecting && intersection_ratio >= threshold
}

/// One record from a batched intersection callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry<K> {
    pub target: K,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

impl<K> IntersectionEntry<K> {
    pub fn new(target: K, is_intersecting: bool, intersection_ratio: f64) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    has_activated: bool,
}

impl RevealState {
    #[inline]
    pub fn has_activated(&self) -> bool {
        self.has_activated
    }

    /// Feed one visibility observation; returns true only on the activating one.
    pub fn observe(&mut self, visible: bool) -> bool {
        if visible && !self.has_activated {
            self.has_activated = true;
            return true;
        }
        false
    }
}

/// Tracks reveal state for every element registered with one observer.
#[derive(Debug)]
pub struct RevealCoordinator<K> {
    cfg: RevealConfig,
    states: HashMap<K, RevealState>,
}

impl<K> RevealCoordinator<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new(cfg: RevealConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            states: HashMap::new(),
        })
    }

    pub fn config(&self) -> &RevealConfig {
        &self.cfg
    }

    /// Start tracking `key`. Re-registering keeps its existing state.
    pub fn observe(&mut self, key: K) {
        self.states.entry(key).or_default();
    }

    /// Stop tracking `key`; returns whether it was tracked.
    pub fn unobserve(&mut self, key: &K) -> bool {
        self.states.remove(key).is_some()
    }

    pub fn is_activated(&self, key: &K) -> bool {
        self.states.get(key).is_some_and(RevealState::has_activated)
    }

    /// Tracked keys that have not activated yet.
    pub fn pending(&self) -> impl Iterator<Item = &K> {
        self.states
            .iter()
            .filter(|(_, s)| !s.has_activated())
            .map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether an entry counts as visible under the configured threshold.
    pub fn qualifies(&self, entry: &IntersectionEntry<K>) -> bool {
        meets_threshold(
            entry.is_intersecting,
            entry.intersection_ratio,
            self.cfg.threshold,
        )
    }

    /// Apply a batch of observer entries. Returns the keys that activated in
    /// this batch; entries for untracked keys are ignored.
    pub fn handle_entries<I>(&mut self, entries: I) -> Vec<K>
    where
        I: IntoIterator<Item = IntersectionEntry<K>>,
    {
        let mut activated = Vec::new();
        for entry in entries {
            let visible = self.qualifies(&entry);
            let Some(state) = self.states.get_mut(&entry.target) else {
                trace!("reveal: entry for untracked {:?}", entry.target);
                continue;
            };
            if state.observe(visible) {
                debug!(
                    "reveal: {:?} activated at ratio {:.3}",
                    entry.target, entry.intersection_ratio
                );
                activated.push(entry.target);
            }
        }
        activated
    }

    /// Forget every element (unmount).
    pub fn dispose(&mut self) {
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator() -> RevealCoordinator<&'static str> {
        RevealCoordinator::new(RevealConfig::default()).unwrap()
    }

    #[test]
    fn state_flips_once() {
        let mut s = RevealState::default();
        assert!(!s.observe(false));
        assert!(s.observe(true));
        assert!(!s.observe(false));
        assert!(!s.observe(true));
        assert!(s.has_activated());
    }

    #[test]
    fn activation_requires_threshold() {
        let mut c = coordinator();
        c.observe("hero");
        assert!(c
            .handle_entries([IntersectionEntry::new("hero", true, 0.1)])
            .is_empty());
        assert!(!c.is_activated(&"hero"));
        assert_eq!(
            c.handle_entries([IntersectionEntry::new("hero", true, 0.2)]),
            vec!["hero"]
        );
        assert!(c.is_activated(&"hero"));
    }

    #[test]
    fn leaving_the_viewport_never_reverts() {
        let mut c = coordinator();
        c.observe("section");
        c.handle_entries([IntersectionEntry::new("section", true, 0.5)]);
        c.handle_entries([IntersectionEntry::new("section", false, 0.0)]);
        assert!(c.is_activated(&"section"));
        assert!(c
            .handle_entries([IntersectionEntry::new("section", true, 0.9)])
            .is_empty());
    }

    #[test]
    fn batches_activate_each_element_independently() {
        let mut c = coordinator();
        c.observe("a");
        c.observe("b");
        c.observe("c");
        let activated = c.handle_entries([
            IntersectionEntry::new("a", true, 0.3),
            IntersectionEntry::new("b", false, 0.0),
            IntersectionEntry::new("c", true, 1.0),
        ]);
        assert_eq!(activated, vec!["a", "c"]);
        assert_eq!(c.pending().collect::<Vec<_>>(), vec![&"b"]);
    }

    #[test]
    fn untracked_entries_are_ignored() {
        let mut c = coordinator();
        c.observe("a");
        assert!(c.unobserve(&"a"));
        assert!(!c.unobserve(&"a"));
        assert!(c
            .handle_entries([IntersectionEntry::new("a", true, 1.0)])
            .is_empty());
        assert!(!c.is_activated(&"a"));
    }

    #[test]
    fn reobserving_keeps_activation() {
        let mut c = coordinator();
        c.observe("a");
        c.handle_entries([IntersectionEntry::new("a", true, 1.0)]);
        c.observe("a");
        assert!(c.is_activated(&"a"));
    }

    #[test]
    fn dispose_forgets_everything() {
        let mut c = coordinator();
        c.observe("a");
        c.dispose();
        assert!(c.is_empty());
    }
}
