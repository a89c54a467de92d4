//! Pointer/touch normalization.
//!
//! Mouse and touch input reach drag-driven widgets through one
//! [`PointerSignal`] stream, so a single handler set owns the drag state
//! regardless of device. Touch input only contributes its first touch point.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPhase {
    Start,
    Move,
    End,
}

/// Device event as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "device", rename_all = "snake_case")]
pub enum RawPointerEvent {
    Mouse {
        phase: InputPhase,
        #[serde(default)]
        at: Point,
    },
    Touch {
        phase: InputPhase,
        #[serde(default)]
        first_touch: Option<Point>,
    },
}

/// Device-independent pointer signal.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerSignal {
    Down { kind: PointerKind, at: Option<Point> },
    Move { kind: PointerKind, at: Point },
    Up { kind: PointerKind },
}

impl PointerSignal {
    pub fn kind(&self) -> PointerKind {
        match self {
            PointerSignal::Down { kind, .. }
            | PointerSignal::Move { kind, .. }
            | PointerSignal::Up { kind } => *kind,
        }
    }
}

/// Fold a raw mouse/touch event into a [`PointerSignal`].
///
/// A touch move without any active touch carries no position and yields
/// `None`; releases never need a position.
pub fn normalize(event: RawPointerEvent) -> Option<PointerSignal> {
    match event {
        RawPointerEvent::Mouse { phase, at } => Some(match phase {
            InputPhase::Start => PointerSignal::Down {
                kind: PointerKind::Mouse,
                at: Some(at),
            },
            InputPhase::Move => PointerSignal::Move {
                kind: PointerKind::Mouse,
                at,
            },
            InputPhase::End => PointerSignal::Up {
                kind: PointerKind::Mouse,
            },
        }),
        RawPointerEvent::Touch { phase, first_touch } => match phase {
            InputPhase::Start => Some(PointerSignal::Down {
                kind: PointerKind::Touch,
                at: first_touch,
            }),
            InputPhase::Move => first_touch.map(|at| PointerSignal::Move {
                kind: PointerKind::Touch,
                at,
            }),
            InputPhase::End => Some(PointerSignal::Up {
                kind: PointerKind::Touch,
            }),
        },
    }
}

/// Horizontal position of `client_x` inside `bounds`, in percent, clamped to
/// [0,100].
///
/// Returns `None` when the ratio is undefined: a zero-width (not yet laid out)
/// container or non-finite input. Callers keep their previous value.
pub fn relative_position(client_x: f32, bounds: Rect) -> Option<f32> {
    if !client_x.is_finite() || !bounds.has_usable_width() {
        return None;
    }
    let raw = (client_x - bounds.left) / bounds.width * 100.0;
    if !raw.is_finite() {
        return None;
    }
    Some(raw.clamp(0.0, 100.0))
}
