//! munificent-interaction-wasm: binds the interaction core to live DOM nodes.
//!
//! Each exported widget owns its listeners, timers and observers. Dropping
//! the widget (JS `free()`) or calling `unmount()` releases all of them.
//! Constructors take an optional plain-object config; `undefined`/`null`
//! selects the defaults.

mod carousel;
mod counter;
mod cursor;
mod dom;
mod logger;
mod reveal;
mod slider;
mod store;

use wasm_bindgen::prelude::*;

pub use carousel::Carousel;
pub use counter::RevealCounter;
pub use cursor::{cursor_overlay_claimed, CustomCursor};
pub use logger::init_logging;
pub use reveal::RevealSection;
pub use slider::BeforeAfterSlider;
pub use store::{ContactModalStore, StoreSubscription, ThemeStore};

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
