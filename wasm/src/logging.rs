//! Routes `tracing` output to the browser console

use std::io::{self, Write};
use std::sync::OnceLock;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};
use wasm_bindgen::JsValue;

/// Hands out one [`ConsoleWriter`] per formatted event
pub struct ConsoleMakeWriter;

/// Buffers a formatted event and logs it at the matching console level
/// when dropped
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(line.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

static FILTER: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Install the console subscriber, or swap the filter of the one already
/// installed. An unparseable directive falls back to `info` on first
/// install. Returns false when another subscriber owns the process.
pub fn install(directive: &str) -> bool {
    if FILTER.get().is_some() {
        return set_level(directive);
    }

    let initial = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(initial);
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                // no wall clock on wasm32-unknown-unknown
                .without_time()
                .with_ansi(false)
                .with_writer(ConsoleMakeWriter),
        )
        .try_init()
        .is_ok();
    if installed {
        let _ = FILTER.set(handle);
    }
    installed
}

/// Replace the active filter. Returns false for an invalid directive or
/// when the console subscriber is not installed.
pub fn set_level(directive: &str) -> bool {
    let Some(handle) = FILTER.get() else {
        return false;
    };
    match EnvFilter::try_new(directive) {
        Ok(filter) => handle.reload(filter).is_ok(),
        Err(_) => false,
    }
}

