//! Before/after comparison slider.
//!
//! Drag state for the divider between two stacked images. Presses start on
//! the handle; moves and releases arrive from wherever the host listens
//! (the widget for mouse moves, the document for touch moves and releases).
//! Every move writes the position immediately, with no throttling.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::SliderConfig;
use crate::geometry::Rect;
use crate::pointer::{normalize, relative_position, PointerSignal, RawPointerEvent};
use crate::Result;

/// CSS custom property carrying the divider position.
pub const POSITION_VAR: &str = "--slider-position";

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    /// Divider position in percent, always within [0,100].
    pub position: f32,
    pub is_dragging: bool,
}

#[derive(Debug)]
pub struct ComparisonSlider {
    cfg: SliderConfig,
    state: DragState,
    bounds: Option<Rect>,
    mounted: bool,
}

impl ComparisonSlider {
    pub fn new(cfg: SliderConfig) -> Result<Self> {
        cfg.validate()?;
        let state = DragState {
            position: cfg.initial_position.clamp(0.0, 100.0),
            is_dragging: false,
        };
        Ok(Self {
            cfg,
            state,
            bounds: None,
            mounted: false,
        })
    }

    pub fn config(&self) -> &SliderConfig {
        &self.cfg
    }

    /// Attach to a laid-out container.
    pub fn mount(&mut self, bounds: Rect) {
        self.mounted = true;
        self.bounds = Some(bounds);
    }

    /// Detach; any drag in progress is dropped.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.bounds = None;
        self.state.is_dragging = false;
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Refresh the container geometry (hosts re-query it per move).
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.mounted {
            self.bounds = Some(bounds);
        }
    }

    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.state.position
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Apply one pointer signal. Returns the new position when a move wrote it.
    pub fn handle(&mut self, signal: PointerSignal) -> Option<f32> {
        if !self.mounted {
            return None;
        }
        match signal {
            PointerSignal::Down { kind, .. } => {
                if !self.state.is_dragging {
                    debug!("comparison slider: drag start ({kind:?})");
                }
                self.state.is_dragging = true;
                None
            }
            PointerSignal::Move { at, .. } => {
                if !self.state.is_dragging {
                    return None;
                }
                let bounds = self.bounds?;
                let position = relative_position(at.x, bounds)?;
                trace!("comparison slider: position {position:.2}%");
                self.state.position = position;
                Some(position)
            }
            PointerSignal::Up { kind } => {
                if self.state.is_dragging {
                    debug!(
                        "comparison slider: drag end ({kind:?}) at {:.2}%",
                        self.state.position
                    );
                }
                self.state.is_dragging = false;
                None
            }
        }
    }

    /// Normalize and apply a raw mouse/touch event.
    pub fn handle_raw(&mut self, event: RawPointerEvent) -> Option<f32> {
        normalize(event).and_then(|signal| self.handle(signal))
    }

    /// Value for [`POSITION_VAR`], e.g. `"25%"`.
    pub fn style_value(&self) -> String {
        format!("{}%", self.state.position)
    }
}
