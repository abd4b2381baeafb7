//! Browser-backed implementations of the domain and application seams.

use futures::future::LocalBoxFuture;
use gloo_timers::future::sleep;
use std::time::Duration;
use wasm_bindgen::JsValue;

use crate::application::Sleeper;
use crate::domain::{
    logging::{LogEntry, LogLevel, Logger, TimeProvider},
    market_data::JitterSource,
};

/// Console logger implementation for WASM environment
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if !self.accepts(entry.level) {
            return;
        }
        let formatted = entry.format_line(&BrowserTimeProvider.format_timestamp(entry.timestamp));
        let message = JsValue::from(formatted);
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&message),
            LogLevel::Info => web_sys::console::info_1(&message),
            LogLevel::Warn => web_sys::console::warn_1(&message),
            LogLevel::Error => web_sys::console::error_1(&message),
        }
    }
}

/// Wall-clock time from `js_sys::Date`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

/// Longest delay browsers honour for a single `setTimeout`
pub const MAX_TIMER_DELAY: Duration = Duration::from_millis(i32::MAX as u64);

/// `setTimeout`-backed delay. Longer delays are capped at [`MAX_TIMER_DELAY`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTimer;

impl Sleeper for BrowserTimer {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(sleep(delay.min(MAX_TIMER_DELAY)))
    }
}

/// Draws from `Math.random()`
#[derive(Debug, Default, Clone, Copy)]
pub struct MathRandomJitter;

impl JitterSource for MathRandomJitter {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}
