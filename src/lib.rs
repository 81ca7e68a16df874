//! `unibidi` - Unicode classification tables and bidirectional level resolution
//!
//! Provides a compact two-level code point trie, UTF-16 scalar decoding,
//! property classification backed by frozen tries, and a UAX #9 resolver
//! that turns prepared paragraph data into embedding levels and visual order.

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Level and index narrowing is range checked
#![allow(clippy::cast_sign_loss)] // Levels are i8 with -1 as the removed marker
#![allow(clippy::cast_possible_wrap)] // Levels never exceed 127
#![allow(clippy::module_name_repetitions)] // Allow BidiData in bidi etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod bidi;
pub mod error;
pub mod event;
pub mod trie;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback, set_log_level};
pub use trie::{CodePointTrie, TrieBuilder};
pub use unicode::{
    BidiCharacterType, BidiClass, BidiPairedBracketType, CodePoint, GeneralCategory,
    GraphemeClusterClass, LineBreakClass, TableConfig, TableKind, UnicodeTables,
};

// Re-export bidi types
pub use bidi::{
    BidiData, BidiFlags, BidiResolver, BidiRun, Direction, Paragraph, ResolvedLevels,
    reorder_line, resolve_levels, visual_runs,
};
