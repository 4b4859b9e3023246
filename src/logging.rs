//! `log` backend for the browser build.
//!
//! Native hosts install whatever `log` implementation they like. On wasm32,
//! [`init`] routes records to the devtools console at the matching level.

#[cfg(target_arch = "wasm32")]
use log::{Level, Log, Metadata, Record};

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger {
    level: Level,
}

#[cfg(target_arch = "wasm32")]
impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("emoji-clicker [{}] {}", record.target(), record.args());
        let value = wasm_value(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Info => web_sys::console::info_1(&value),
            Level::Debug | Level::Trace => web_sys::console::log_1(&value),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn wasm_value(s: &str) -> js_sys::JsString {
    js_sys::JsString::from(s)
}

/// Install the console logger. Safe to call more than once; later calls are
/// ignored.
#[cfg(target_arch = "wasm32")]
pub fn init(level: Level) {
    static INSTALLED: std::sync::Once = std::sync::Once::new();
    INSTALLED.call_once(|| {
        let logger: &'static ConsoleLogger = Box::leak(Box::new(ConsoleLogger { level }));
        // Another backend may already be installed by the host page
        if log::set_logger(logger).is_ok() {
            log::set_max_level(level.to_level_filter());
        }
    });
}
