#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Each test binary uses a different subset

use std::sync::Once;

use tracing::Level;
use unibidi::{LogLevel, set_log_callback, set_log_level};

/// Install a test subscriber and forward crate log messages into tracing.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .try_init();
        set_log_level(LogLevel::Debug);
        set_log_callback(|level, message| match level {
            LogLevel::Debug => tracing::debug!(target: "unibidi", "{message}"),
            LogLevel::Info => tracing::info!(target: "unibidi", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "unibidi", "{message}"),
            LogLevel::Error => tracing::error!(target: "unibidi", "{message}"),
        });
    });
}

pub const ALEF: char = '\u{5D0}';
pub const BET: char = '\u{5D1}';
pub const GIMEL: char = '\u{5D2}';
pub const ARABIC_ALEF: char = '\u{627}';

pub const LRE: char = '\u{202A}';
pub const RLE: char = '\u{202B}';
pub const PDF: char = '\u{202C}';
pub const LRO: char = '\u{202D}';
pub const RLO: char = '\u{202E}';
pub const LRI: char = '\u{2066}';
pub const RLI: char = '\u{2067}';
pub const FSI: char = '\u{2068}';
pub const PDI: char = '\u{2069}';

/// Characters covering every bidi class, for building random mixed text.
pub const BIDI_ALPHABET: &[char] = &[
    'a', 'b', ALEF, BET, ARABIC_ALEF, '1', '2', '\u{661}', '+', '-', '$', '%', ',', '.', ':',
    '\u{300}', '\u{AD}', '\n', '\t', ' ', '!', '(', ')', '[', ']', '\u{2329}', '\u{3009}', LRE, RLE,
    PDF, LRO, RLO, LRI, RLI, FSI, PDI,
];
