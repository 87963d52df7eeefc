//! `log` sink for the browser. Records go to the JS console, errors and
//! warnings through `console.error`/`console.warn` so devtools can filter
//! them. The worker shim calls `init_logging` once after the module loads;
//! until then every `log::` call is dropped.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

// Native builds (unit tests) have no console to bind to.
#[cfg(not(target_arch = "wasm32"))]
fn console_log(s: &str) {
    eprintln!("{s}");
}

#[cfg(not(target_arch = "wasm32"))]
fn console_warn(s: &str) {
    eprintln!("{s}");
}

#[cfg(not(target_arch = "wasm32"))]
fn console_error(s: &str) {
    eprintln!("{s}");
}

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
        let line = format_record(record);
        match record.level() {
            Level::Error => console_error(&line),
            Level::Warn => console_warn(&line),
            _ => console_log(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[huutopussi] {} {}", record.level(), record.args())
}

/// `"debug"`, `"warn"`, `"off"`, ... in any case. Unknown input means info.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the console logger and set the level. Calling again only
/// changes the level.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(parse_level(level));
}
