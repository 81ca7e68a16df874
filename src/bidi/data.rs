//! Per-paragraph bidi classification buffers.

use std::ops::Range;

use bitflags::bitflags;

use crate::unicode::{
    BidiCharacterType, BidiPairedBracketType, CodePoint, UnicodeTables, Utf16CodePoints,
};

bitflags! {
    /// Summary of which optional resolver phases the text needs.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BidiFlags: u8 {
        /// At least one Open or Close paired bracket.
        const HAS_BRACKETS = 1 << 0;
        /// At least one LRE, LRO, RLE, RLO or PDF.
        const HAS_EMBEDDINGS = 1 << 1;
        /// At least one LRI, RLI, FSI or PDI.
        const HAS_ISOLATES = 1 << 2;
    }
}

/// Map a bracket to the form used for pair matching.
///
/// U+3008/U+3009 are canonically equivalent to U+2329/U+232A and must pair
/// with them.
#[must_use]
pub const fn canonical_bracket(cp: u32) -> u32 {
    match cp {
        0x3008 => 0x2329,
        0x3009 => 0x232A,
        _ => cp,
    }
}

/// Bidi classification of one unit of text, indexed by code point position.
///
/// Buffers are cleared and refilled by each `init*` call, so a single
/// instance can be reused across paragraphs without reallocating.
///
/// # Example
///
/// ```
/// use unibidi::{BidiCharacterType, BidiData};
///
/// let mut data = BidiData::new();
/// data.init("a(\u{5D0})");
/// assert_eq!(data.len(), 4);
/// assert_eq!(data.types()[2], BidiCharacterType::R);
/// assert!(data.has_brackets());
/// ```
#[derive(Clone, Debug, Default)]
pub struct BidiData {
    types: Vec<BidiCharacterType>,
    bracket_types: Vec<BidiPairedBracketType>,
    bracket_values: Vec<u32>,
    saved_types: Vec<BidiCharacterType>,
    saved_bracket_types: Vec<BidiPairedBracketType>,
    temp_levels: Vec<i8>,
    flags: BidiFlags,
}

impl BidiData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare data for a UTF-8 string.
    pub fn init(&mut self, text: &str) {
        self.init_code_points(text.chars().map(CodePoint::from));
    }

    /// Prepare data for a UTF-16 buffer. Unpaired surrogates count as one
    /// U+FFFD each.
    pub fn init_utf16(&mut self, text: &[u16]) {
        self.init_code_points(Utf16CodePoints::new(text));
    }

    /// Prepare data for a code point sequence using the global tables.
    pub fn init_code_points<I>(&mut self, code_points: I)
    where
        I: IntoIterator<Item = CodePoint>,
    {
        self.init_with(UnicodeTables::global(), code_points);
    }

    /// Prepare data using an explicit set of tables.
    pub fn init_with<I>(&mut self, tables: &UnicodeTables, code_points: I)
    where
        I: IntoIterator<Item = CodePoint>,
    {
        self.clear();
        let code_points = code_points.into_iter();
        let (lower, _) = code_points.size_hint();
        self.types.reserve(lower);
        self.bracket_types.reserve(lower);
        self.bracket_values.reserve(lower);

        for cp in code_points {
            let class = tables.bidi_class(cp);
            let ty = class.character_type();
            let bracket_type = class.paired_bracket_type();

            if ty.is_embedding_or_override() {
                self.flags |= BidiFlags::HAS_EMBEDDINGS;
            } else if ty.is_isolate_control() {
                self.flags |= BidiFlags::HAS_ISOLATES;
            }

            let bracket_value = match bracket_type {
                BidiPairedBracketType::Open => canonical_bracket(class.paired_bracket()),
                BidiPairedBracketType::Close => canonical_bracket(cp.value()),
                BidiPairedBracketType::None => 0,
            };
            if bracket_type != BidiPairedBracketType::None {
                self.flags |= BidiFlags::HAS_BRACKETS;
            }

            self.types.push(ty);
            self.bracket_types.push(bracket_type);
            self.bracket_values.push(bracket_value);
        }
    }

    /// Drop all content, keeping allocations.
    pub fn clear(&mut self) {
        self.types.clear();
        self.bracket_types.clear();
        self.bracket_values.clear();
        self.saved_types.clear();
        self.saved_bracket_types.clear();
        self.flags = BidiFlags::empty();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[must_use]
    pub fn types(&self) -> &[BidiCharacterType] {
        &self.types
    }

    #[must_use]
    pub fn bracket_types(&self) -> &[BidiPairedBracketType] {
        &self.bracket_types
    }

    /// Canonical paired bracket values. Only meaningful where the bracket
    /// type is not None.
    #[must_use]
    pub fn bracket_values(&self) -> &[u32] {
        &self.bracket_values
    }

    #[must_use]
    pub fn flags(&self) -> BidiFlags {
        self.flags
    }

    #[must_use]
    pub fn has_brackets(&self) -> bool {
        self.flags.contains(BidiFlags::HAS_BRACKETS)
    }

    #[must_use]
    pub fn has_embeddings(&self) -> bool {
        self.flags.contains(BidiFlags::HAS_EMBEDDINGS)
    }

    #[must_use]
    pub fn has_isolates(&self) -> bool {
        self.flags.contains(BidiFlags::HAS_ISOLATES)
    }

    /// Override the types of a range, as a directional style run does.
    ///
    /// Bracket pairing is disabled inside the range; bracket values are kept
    /// so [`restore_types`](Self::restore_types) re-enables it. Flags only ever grow, so
    /// an override that introduces explicit codes still routes resolution
    /// through the full algorithm.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn set_types(&mut self, range: Range<usize>, ty: BidiCharacterType) {
        self.types[range.clone()].fill(ty);
        self.bracket_types[range].fill(BidiPairedBracketType::None);
        if ty.is_embedding_or_override() {
            self.flags |= BidiFlags::HAS_EMBEDDINGS;
        } else if ty.is_isolate_control() {
            self.flags |= BidiFlags::HAS_ISOLATES;
        }
    }

    /// Snapshot the type and bracket-type arrays.
    pub fn save_types(&mut self) {
        self.saved_types.clear();
        self.saved_types.extend_from_slice(&self.types);
        self.saved_bracket_types.clear();
        self.saved_bracket_types.extend_from_slice(&self.bracket_types);
    }

    /// Restore the arrays captured by [`save_types`](Self::save_types).
    ///
    /// Returns `false`, leaving the data untouched, if the snapshot length
    /// differs from the current text. Only the length is checked; every
    /// `init*` call and [`clear`](Self::clear) drop the snapshot.
    pub fn restore_types(&mut self) -> bool {
        if self.saved_types.len() != self.types.len() {
            return false;
        }
        self.types.copy_from_slice(&self.saved_types);
        self.bracket_types.copy_from_slice(&self.saved_bracket_types);
        true
    }

    /// Reusable level scratch of exactly `len` entries.
    ///
    /// Contents are whatever the previous user left; callers overwrite
    /// before reading.
    pub fn temp_level_buffer(&mut self, len: usize) -> &mut [i8] {
        if self.temp_levels.len() < len {
            self.temp_levels.resize(len, 0);
        }
        &mut self.temp_levels[..len]
    }

    /// Types plus the scratch buffer, borrowed together.
    pub(crate) fn types_and_scratch(
        &mut self,
        len: usize,
    ) -> (&[BidiCharacterType], &mut [i8]) {
        if self.temp_levels.len() < len {
            self.temp_levels.resize(len, 0);
        }
        (&self.types, &mut self.temp_levels[..len])
    }
}
