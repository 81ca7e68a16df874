//! Bidirectional (BiDi) text resolution.
//!
//! [`BidiData`] classifies a text once per code point; [`BidiResolver`]
//! runs the Unicode Bidirectional Algorithm (UAX #9) over it, producing
//! [`ResolvedLevels`]. Visual order is derived from the levels with
//! [`reorder_line`] or [`visual_runs`].
//!
//! Levels are indexed by code point, not by UTF-8 byte or UTF-16 unit.

mod brackets;
mod data;
mod explicit;
mod implicit;
mod levels;
mod resolver;
mod sequence;
mod weak;

pub use brackets::MAX_BRACKET_DEPTH;
pub use data::{BidiData, BidiFlags, canonical_bracket};
pub use explicit::MAX_DEPTH;
pub use levels::{
    BidiRun, Direction, Paragraph, REMOVED_LEVEL, ResolvedLevels, reorder_line, visual_runs,
};
pub use resolver::BidiResolver;

/// Resolve embedding levels for `text` with a fresh preparer and resolver.
///
/// # Example
///
/// ```
/// use unibidi::bidi::{Direction, resolve_levels};
///
/// let resolved = resolve_levels("\u{5E9}\u{5DC}\u{5D5}\u{5DD}", None);
/// assert_eq!(resolved.base_direction(), Direction::Rtl);
/// assert_eq!(resolved.visual_order(), vec![3, 2, 1, 0]);
/// ```
#[must_use]
pub fn resolve_levels(text: &str, base_level: Option<u8>) -> ResolvedLevels {
    let mut data = BidiData::new();
    data.init(text);
    BidiResolver::new().resolve(&data, base_level)
}
