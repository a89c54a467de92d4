//! Ambient cursor overlay.
//!
//! A dot that follows the pointer 1:1 and an outline that trails it with an
//! eased transition. The outline shows hover styling while the pointer is
//! pressed *or* over an interactive element; the two causes are tracked
//! separately so a release never clears a hover (and vice versa).
//!
//! Touch capability is decided once at construction. Touch-capable sessions
//! get a permanently inert overlay.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::CursorConfig;
use crate::easing::TransitionSpec;
use crate::geometry::Point;

/// Elements that count as interactive for hover styling.
pub const INTERACTIVE_SELECTOR: &str = "a, button, input, textarea, select";

const INTERACTIVE_TAGS: [&str; 5] = ["a", "button", "input", "textarea", "select"];

pub fn is_interactive_tag(tag: &str) -> bool {
    INTERACTIVE_TAGS
        .iter()
        .any(|candidate| tag.eq_ignore_ascii_case(candidate))
}

/// True when the target or any ancestor (target first) is interactive.
pub fn is_interactive_path<'a, I>(tags: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter().any(is_interactive_tag)
}

/// Host touch support, probed once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchCapabilities {
    /// `ontouchstart` exists on the window.
    pub has_touch_events: bool,
    /// `navigator.maxTouchPoints`.
    pub max_touch_points: u32,
}

impl TouchCapabilities {
    #[inline]
    pub fn is_touch_capable(&self) -> bool {
        self.has_touch_events || self.max_touch_points > 0
    }
}

/// Outline movement toward the latest pointer position.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlineTrail {
    pub from: Point,
    pub to: Point,
    pub started_at_ms: f64,
    pub transition: TransitionSpec,
}

impl OutlineTrail {
    pub fn sample(&self, now_ms: f64) -> Point {
        self.transition
            .interpolate(self.from, self.to, now_ms - self.started_at_ms)
    }
}

/// Visual update produced by a pointer move.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CursorFrame {
    /// Where the dot goes, immediately.
    pub dot: Point,
    /// Where the outline animates to.
    pub outline_target: Point,
    pub transition: TransitionSpec,
}

#[derive(Debug)]
pub struct CursorOverlay {
    cfg: CursorConfig,
    enabled: bool,
    active: bool,
    position: Point,
    press_active: bool,
    hover_active: bool,
    trail: Option<OutlineTrail>,
}

impl CursorOverlay {
    pub fn new(caps: TouchCapabilities, cfg: CursorConfig) -> Self {
        let enabled = !caps.is_touch_capable();
        debug!("cursor overlay: touch={caps:?} enabled={enabled}");
        Self {
            cfg,
            enabled,
            active: false,
            position: Point::default(),
            press_active: false,
            hover_active: false,
            trail: None,
        }
    }

    pub fn config(&self) -> &CursorConfig {
        &self.cfg
    }

    /// False on touch-capable hosts, for the life of the overlay.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Listeners installed and native cursor hidden.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin tracking. Returns false (and stays inert) on touch hosts; the
    /// host must then install nothing.
    pub fn activate(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.active = true;
        true
    }

    /// Stop tracking and clear hover state; the host restores the native
    /// cursor.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.press_active = false;
        self.hover_active = false;
        self.trail = None;
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.press_active
    }

    #[inline]
    pub fn is_over_interactive(&self) -> bool {
        self.hover_active
    }

    /// Whether the outline carries the hover class.
    #[inline]
    pub fn shows_hover(&self) -> bool {
        self.press_active || self.hover_active
    }

    pub fn pointer_move(&mut self, at: Point, now_ms: f64) -> Option<CursorFrame> {
        if !self.active || !at.is_finite() {
            return None;
        }
        let from = self.outline_position(now_ms);
        self.position = at;
        self.trail = Some(OutlineTrail {
            from,
            to: at,
            started_at_ms: now_ms,
            transition: self.cfg.trail,
        });
        trace!("cursor: move to ({}, {})", at.x, at.y);
        Some(CursorFrame {
            dot: at,
            outline_target: at,
            transition: self.cfg.trail,
        })
    }

    /// Outline position at `now_ms`, following the current trail.
    pub fn outline_position(&self, now_ms: f64) -> Point {
        match &self.trail {
            Some(trail) => trail.sample(now_ms),
            None => self.position,
        }
    }

    /// Returns the new hover visibility when it changed.
    pub fn pointer_down(&mut self) -> Option<bool> {
        self.update(|s| s.press_active = true)
    }

    pub fn pointer_up(&mut self) -> Option<bool> {
        self.update(|s| s.press_active = false)
    }

    /// Pointer entered `target`; `target_interactive` covers its ancestors.
    pub fn pointer_over(&mut self, target_interactive: bool) -> Option<bool> {
        self.update(|s| s.hover_active = target_interactive)
    }

    /// Pointer left an element for `related_interactive` (false when it left
    /// the document).
    pub fn pointer_out(&mut self, related_interactive: bool) -> Option<bool> {
        self.update(|s| s.hover_active = related_interactive)
    }

    fn update(&mut self, f: impl FnOnce(&mut Self)) -> Option<bool> {
        if !self.active {
            return None;
        }
        let before = self.shows_hover();
        f(self);
        let after = self.shows_hover();
        (before != after).then_some(after)
    }
}
