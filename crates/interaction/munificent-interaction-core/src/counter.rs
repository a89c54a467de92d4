//! Reveal counter tween.
//!
//! Counts a displayed integer from 0 up to `end` on a fixed 16 ms cadence,
//! starting the first time the element is seen. The step is
//! `end / (duration / 16)`; the display shows the floor of the accumulated
//! value and snaps to exactly `end` on the tick that reaches it.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::CounterConfig;

/// Tween cadence in milliseconds.
pub const TICK_INTERVAL_MS: u32 = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenPhase {
    /// Waiting for the first visibility trigger.
    Pending,
    Running,
    Finished,
    /// Stopped before reaching `end` (unmount or reconfiguration).
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct CounterTween {
    cfg: CounterConfig,
    end: u64,
    step: f64,
    accumulated: f64,
    current: u64,
    has_started: bool,
    phase: TweenPhase,
}

fn step_for(end: u64, duration_ms: f64) -> f64 {
    end as f64 / (duration_ms / TICK_INTERVAL_MS as f64)
}

impl CounterTween {
    pub fn new(end: u64, cfg: CounterConfig) -> Self {
        Self {
            step: step_for(end, cfg.duration_ms),
            cfg,
            end,
            accumulated: 0.0,
            current: 0,
            has_started: false,
            phase: TweenPhase::Pending,
        }
    }

    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.current
    }

    #[inline]
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    #[inline]
    pub fn phase(&self) -> TweenPhase {
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == TweenPhase::Running
    }

    pub fn config(&self) -> &CounterConfig {
        &self.cfg
    }

    /// Visibility trigger. Starts the tween on the first intersecting call
    /// and returns true exactly then; the host should begin ticking.
    pub fn on_visibility(&mut self, is_intersecting: bool) -> bool {
        if !is_intersecting || self.has_started {
            return false;
        }
        self.has_started = true;
        self.phase = TweenPhase::Running;
        debug!(
            "counter: start 0 -> {} over {}ms (step {:.4})",
            self.end, self.cfg.duration_ms, self.step
        );
        true
    }

    /// Advance one tick. Returns the displayed value while running, `None`
    /// otherwise; after the final tick the phase is `Finished`.
    pub fn tick(&mut self) -> Option<u64> {
        if self.phase != TweenPhase::Running {
            return None;
        }
        // A zero, negative or undefined step could never reach `end`.
        if !(self.step.is_finite() && self.step > 0.0) {
            return Some(self.finish());
        }
        self.accumulated += self.step;
        if self.accumulated >= self.end as f64 {
            return Some(self.finish());
        }
        let shown = (self.accumulated.floor() as u64).min(self.end);
        self.current = self.current.max(shown);
        Some(self.current)
    }

    /// Change target or duration. A running tween is cancelled; since the
    /// trigger is one-shot it does not start again.
    pub fn reconfigure(&mut self, end: u64, duration_ms: f64) {
        if end == self.end && duration_ms == self.cfg.duration_ms {
            return;
        }
        self.end = end;
        self.cfg.duration_ms = duration_ms;
        self.step = step_for(end, duration_ms);
        self.current = self.current.min(end);
        if self.phase == TweenPhase::Running {
            self.cancel();
        }
    }

    /// Stop ticking (unmount).
    pub fn cancel(&mut self) {
        if self.phase == TweenPhase::Running {
            debug!("counter: cancelled at {} of {}", self.current, self.end);
            self.phase = TweenPhase::Cancelled;
        }
    }

    /// Displayed text with prefix and suffix, e.g. `200+`.
    pub fn display(&self) -> String {
        format!("{}{}{}", self.cfg.prefix, self.current, self.cfg.suffix)
    }

    fn finish(&mut self) -> u64 {
        self.current = self.end;
        self.accumulated = self.end as f64;
        self.phase = TweenPhase::Finished;
        debug!("counter: finished at {}", self.end);
        self.end
    }
}
