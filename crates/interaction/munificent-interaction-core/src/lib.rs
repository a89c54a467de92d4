//! Munificent interaction core (engine-agnostic)
//!
//! State machines behind the site's interactive widgets: the before/after
//! comparison slider, the swipe carousel, viewport reveal, the reveal counter
//! and the ambient cursor overlay. Nothing here touches the DOM; adapters
//! (see `munificent-interaction-wasm`) feed platform events in and apply the
//! resulting visual state.

pub mod carousel;
pub mod compare;
pub mod config;
pub mod counter;
pub mod cursor;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod pointer;
pub mod reveal;
pub mod scope;
pub mod store;

// Re-exports for consumers (adapters)
pub use carousel::{CarouselPhase, SlideTransform, SwipeCarousel, SwipeDirection, SwipeOutcome};
pub use compare::{ComparisonSlider, DragState, POSITION_VAR};
pub use config::{CarouselConfig, CounterConfig, CursorConfig, RevealConfig, SliderConfig};
pub use counter::{CounterTween, TweenPhase, TICK_INTERVAL_MS};
pub use cursor::{
    is_interactive_path, is_interactive_tag, CursorFrame, CursorOverlay, OutlineTrail,
    TouchCapabilities, INTERACTIVE_SELECTOR,
};
pub use easing::{Easing, TransitionSpec};
pub use error::InteractionError;
pub use geometry::{Point, Rect};
pub use pointer::{
    normalize, relative_position, InputPhase, PointerKind, PointerSignal, RawPointerEvent,
};
pub use reveal::{meets_threshold, IntersectionEntry, RevealCoordinator, RevealState};
pub use scope::Scope;
pub use store::{ContactModalState, Store, Subscription, Theme, ThemeState};

/// Interaction core result type
pub type Result<T> = core::result::Result<T, InteractionError>;
