//! Swipe carousel.
//!
//! `Idle → Dragging → Idle`. A touch gesture records where it started and the
//! last position it moved to; on release the horizontal distance decides
//! whether the slide changes. Only the last recorded move counts: a finger
//! that slides off the track still resolves on wherever it was last seen.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::CarouselConfig;
use crate::easing::TransitionSpec;
use crate::error::InteractionError;
use crate::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarouselPhase {
    Idle,
    Dragging,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    /// Finger moved left; advance.
    Next,
    /// Finger moved right; go back.
    Previous,
}

/// How a completed touch gesture resolved.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SwipeOutcome {
    Committed {
        direction: SwipeDirection,
        index: usize,
    },
    /// Travel at or below the threshold.
    BelowThreshold { distance: f32 },
    /// Start or end was never recorded (a tap, or state reset mid-gesture).
    Incomplete,
}

/// Track position for the active slide.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideTransform {
    pub index: usize,
    pub transition: TransitionSpec,
}

impl SlideTransform {
    /// Horizontal offset of the track in percent of one slide.
    pub fn offset_percent(&self) -> f32 {
        -(self.index as f32 * 100.0)
    }

    /// `transform` value, e.g. `translateX(-200%)`.
    pub fn css_transform(&self) -> String {
        format!("translateX(-{}%)", self.index * 100)
    }

    /// `transition` value, e.g. `transform 500ms ease-out`.
    pub fn css_transition(&self) -> String {
        self.transition.css("transform")
    }
}

#[derive(Debug, Clone)]
pub struct SwipeCarousel {
    cfg: CarouselConfig,
    slide_count: usize,
    active_index: usize,
    touch_start: Option<f32>,
    touch_end: Option<f32>,
    phase: CarouselPhase,
}

impl SwipeCarousel {
    pub fn new(slide_count: usize, cfg: CarouselConfig) -> Result<Self> {
        if slide_count == 0 {
            return Err(InteractionError::EmptyCarousel);
        }
        cfg.validate()?;
        Ok(Self {
            cfg,
            slide_count,
            active_index: 0,
            touch_start: None,
            touch_end: None,
            phase: CarouselPhase::Idle,
        })
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[inline]
    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    /// Recorded `(touch_start, touch_end)` of the gesture in flight.
    #[inline]
    pub fn touch_points(&self) -> (Option<f32>, Option<f32>) {
        (self.touch_start, self.touch_end)
    }

    pub fn touch_start(&mut self, client_x: f32) {
        if !client_x.is_finite() {
            return;
        }
        self.touch_start = Some(client_x);
        self.touch_end = None;
        self.phase = CarouselPhase::Dragging;
    }

    pub fn touch_move(&mut self, client_x: f32) {
        if self.phase != CarouselPhase::Dragging || !client_x.is_finite() {
            return;
        }
        self.touch_end = Some(client_x);
    }

    /// Resolve the gesture. Touch state is cleared whatever the outcome.
    pub fn touch_end(&mut self) -> SwipeOutcome {
        let outcome = match (self.touch_start, self.touch_end) {
            (Some(start), Some(end)) => {
                let distance = start - end;
                if distance.abs() > self.cfg.swipe_threshold_px {
                    let direction = if distance > 0.0 {
                        SwipeDirection::Next
                    } else {
                        SwipeDirection::Previous
                    };
                    let index = match direction {
                        SwipeDirection::Next => self.next(),
                        SwipeDirection::Previous => self.prev(),
                    };
                    debug!("carousel: swipe {direction:?} ({distance:.1}px) -> {index}");
                    SwipeOutcome::Committed { direction, index }
                } else {
                    SwipeOutcome::BelowThreshold { distance }
                }
            }
            _ => SwipeOutcome::Incomplete,
        };
        self.reset_touch();
        outcome
    }

    /// Advance one slide, wrapping to the first.
    pub fn next(&mut self) -> usize {
        let index = (self.active_index + 1) % self.slide_count;
        self.set_index(index);
        index
    }

    /// Go back one slide, wrapping to the last.
    pub fn prev(&mut self) -> usize {
        let index = (self.active_index + self.slide_count - 1) % self.slide_count;
        self.set_index(index);
        index
    }

    /// Jump straight to `index` (dot indicators). Out-of-range indices are
    /// ignored. Returns whether the active slide changed.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.slide_count {
            debug!(
                "carousel: ignoring jump to {index} (slide count {})",
                self.slide_count
            );
            return false;
        }
        let changed = index != self.active_index;
        if changed {
            self.set_index(index);
        }
        changed
    }

    pub fn transform(&self) -> SlideTransform {
        SlideTransform {
            index: self.active_index,
            transition: self.cfg.transition,
        }
    }

    fn set_index(&mut self, index: usize) {
        if index != self.active_index {
            self.active_index = index;
            self.reset_touch();
        }
    }

    fn reset_touch(&mut self) {
        self.touch_start = None;
        self.touch_end = None;
        self.phase = CarouselPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> SwipeCarousel {
        SwipeCarousel::new(n, CarouselConfig::default()).unwrap()
    }

    fn swipe(c: &mut SwipeCarousel, start: f32, end: f32) -> SwipeOutcome {
        c.touch_start(start);
        c.touch_move(end);
        c.touch_end()
    }

    #[test]
    fn empty_carousel_is_rejected() {
        assert_eq!(
            SwipeCarousel::new(0, CarouselConfig::default()).unwrap_err(),
            InteractionError::EmptyCarousel
        );
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut c = carousel(3);
        assert_eq!(c.prev(), 2);
        assert_eq!(c.next(), 0);
        c.go_to(2);
        assert_eq!(c.next(), 0);
    }

    #[test]
    fn single_slide_stays_put() {
        let mut c = carousel(1);
        assert_eq!(c.next(), 0);
        assert_eq!(c.prev(), 0);
        assert_eq!(swipe(&mut c, 300.0, 100.0), SwipeOutcome::Committed {
            direction: SwipeDirection::Next,
            index: 0
        });
    }

    #[test]
    fn seventy_px_left_advances() {
        let mut c = carousel(3);
        let outcome = swipe(&mut c, 300.0, 230.0);
        assert_eq!(
            outcome,
            SwipeOutcome::Committed {
                direction: SwipeDirection::Next,
                index: 1
            }
        );
        assert_eq!(c.active_index(), 1);
        assert_eq!(c.touch_points(), (None, None));
        assert_eq!(c.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn right_swipe_goes_back() {
        let mut c = carousel(3);
        swipe(&mut c, 100.0, 160.0);
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn short_swipes_are_discarded() {
        let mut c = carousel(3);
        assert_eq!(
            swipe(&mut c, 300.0, 260.0),
            SwipeOutcome::BelowThreshold { distance: 40.0 }
        );
        // Exactly at the threshold still does not count.
        assert!(matches!(
            swipe(&mut c, 300.0, 250.0),
            SwipeOutcome::BelowThreshold { .. }
        ));
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.touch_points(), (None, None));
    }

    #[test]
    fn tap_without_move_is_incomplete() {
        let mut c = carousel(3);
        c.touch_start(300.0);
        assert_eq!(c.touch_end(), SwipeOutcome::Incomplete);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn start_at_zero_is_still_a_recorded_start() {
        let mut c = carousel(3);
        assert!(matches!(
            swipe(&mut c, 0.0, 80.0),
            SwipeOutcome::Committed {
                direction: SwipeDirection::Previous,
                ..
            }
        ));
    }

    #[test]
    fn index_change_mid_gesture_resets_touch() {
        let mut c = carousel(3);
        c.touch_start(300.0);
        c.touch_move(200.0);
        c.next();
        assert_eq!(c.touch_points(), (None, None));
        c.touch_move(100.0);
        assert_eq!(c.touch_end(), SwipeOutcome::Incomplete);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn go_to_is_idempotent_and_bounded() {
        let mut c = carousel(3);
        assert!(c.go_to(2));
        assert!(!c.go_to(2));
        assert!(!c.go_to(3));
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn transform_follows_index() {
        let mut c = carousel(4);
        assert_eq!(c.transform().css_transform(), "translateX(-0%)");
        c.go_to(3);
        let t = c.transform();
        assert_eq!(t.css_transform(), "translateX(-300%)");
        assert_eq!(t.offset_percent(), -300.0);
        assert_eq!(t.css_transition(), "transform 500ms ease-out");
    }

    #[test]
    fn non_finite_touch_positions_are_ignored() {
        let mut c = carousel(3);
        c.touch_start(f32::NAN);
        assert_eq!(c.phase(), CarouselPhase::Idle);
        c.touch_start(300.0);
        c.touch_move(f32::INFINITY);
        assert_eq!(c.touch_points(), (Some(300.0), None));
    }
}
