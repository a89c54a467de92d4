//! Widget configuration.
//!
//! Every struct deserializes with `#[serde(default)]`, so hosts may pass a
//! partial object (or nothing) and get the site's stock behavior.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::easing::{Easing, TransitionSpec};
use crate::error::InteractionError;
use crate::Result;

fn rejected(err: InteractionError) -> InteractionError {
    warn!("config rejected: {err}");
    err
}

/// Before/after comparison slider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Divider position before the first drag, in percent of the width.
    pub initial_position: f32,
    pub before_label: String,
    pub after_label: String,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            initial_position: 50.0,
            before_label: "До".into(),
            after_label: "После".into(),
        }
    }
}

impl SliderConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_position.is_finite() {
            return Err(rejected(InteractionError::invalid_config(
                "slider.initial_position",
                "must be a finite number",
            )));
        }
        Ok(())
    }
}

/// Swipe carousel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Minimum horizontal travel (exclusive) for a swipe to change slides.
    pub swipe_threshold_px: f32,
    /// Transition applied to the track's transform on every index change.
    pub transition: TransitionSpec,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
            transition: TransitionSpec::new(500, Easing::EaseOut),
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.swipe_threshold_px.is_finite() || self.swipe_threshold_px < 0.0 {
            return Err(rejected(InteractionError::invalid_config(
                "carousel.swipe_threshold_px",
                "must be a finite, non-negative distance",
            )));
        }
        Ok(())
    }
}

/// Viewport reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible area ratio at which an element activates.
    pub threshold: f64,
    /// Optional `rootMargin` for the observer, e.g. `"-100px"`.
    pub root_margin: Option<String>,
    /// Class added to an element once it activates.
    pub active_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            root_margin: None,
            active_class: "active".into(),
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(rejected(InteractionError::InvalidThreshold {
                threshold: self.threshold,
            }));
        }
        Ok(())
    }
}

/// Reveal counter. The target value is per instance and passed separately.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: f64,
    pub prefix: String,
    pub suffix: String,
    /// Visibility threshold for the one-shot trigger.
    pub threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            prefix: String::new(),
            suffix: String::new(),
            threshold: 0.0,
        }
    }
}

impl CounterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(rejected(InteractionError::InvalidThreshold {
                threshold: self.threshold,
            }));
        }
        Ok(())
    }
}

/// Ambient cursor overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Timing of the outline's trail toward the pointer.
    pub trail: TransitionSpec,
    /// Class toggled on the outline while pressed or over an interactive element.
    pub hover_class: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            trail: TransitionSpec::new(200, Easing::Ease),
            hover_class: "cursor-hover".into(),
        }
    }
}
