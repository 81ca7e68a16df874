//! Log callback system.
//!
//! The crate never writes to stdout or stderr on its own. Table loading and
//! serialization report through a process-wide callback that the host
//! application installs with [`set_log_callback`].

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            _ => Self::Error,
        }
    }
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

static MIN_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Set the minimum level forwarded to the callback (default: `Info`).
pub fn set_log_level(level: LogLevel) {
    MIN_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Get the minimum level forwarded to the callback.
#[must_use]
pub fn log_level() -> LogLevel {
    LogLevel::from_u8(MIN_LEVEL.load(Ordering::Relaxed))
}

/// Whether a message at `level` would reach the callback.
///
/// Lets callers skip formatting for filtered messages.
#[must_use]
pub fn log_enabled(level: LogLevel) -> bool {
    level >= log_level()
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if !log_enabled(level) {
        return;
    }
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
