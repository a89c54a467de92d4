//! `log` backend writing to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Route core logging to the console. `level` is one of
/// `off|error|warn|info|debug|trace` (default `info`); calling again only
/// changes the level.
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    let filter = match level.as_deref() {
        None => LevelFilter::Info,
        Some(name) => name
            .parse::<LevelFilter>()
            .map_err(|_| JsError::new(&format!("unknown log level '{name}'")))?,
    };
    // Already installed on repeat calls.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
    Ok(())
}
