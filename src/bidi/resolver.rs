//! Paragraph-by-paragraph UAX #9 level resolution.

use std::ops::Range;

use super::brackets::{BracketContext, BracketPairs};
use super::data::BidiData;
use super::explicit::{MAX_DEPTH, match_isolates, paragraph_level, resolve_explicit_levels};
use super::implicit::{implicit_level, resolve_neutral_types};
use super::levels::{
    Paragraph, REMOVED_LEVEL, ResolvedLevels, reset_line_end, reset_whitespace_levels,
};
use super::sequence::{IsolatingRunSequences, sequence_boundaries};
use super::weak::resolve_weak_types;
use crate::unicode::BidiCharacterType::{self, AL, AN, B, R};

/// Reusable UAX #9 resolver.
///
/// Holds the working buffers of the rule phases so resolving many
/// paragraphs does not reallocate. Resolution reads [`BidiData`] and never
/// modifies it, so resolving the same data twice gives the same result.
///
/// # Example
///
/// ```
/// use unibidi::{BidiData, BidiResolver};
///
/// let mut data = BidiData::new();
/// data.init("abc \u{5D0}\u{5D1}\u{5D2}");
/// let resolved = BidiResolver::new().resolve(&data, None);
/// assert_eq!(resolved.paragraph_level(), 0);
/// assert_eq!(resolved.levels(), &[0, 0, 0, 0, 1, 1, 1]);
/// assert_eq!(resolved.visual_order(), vec![0, 1, 2, 3, 6, 5, 4]);
/// ```
#[derive(Debug, Default)]
pub struct BidiResolver {
    types: Vec<BidiCharacterType>,
    explicit_levels: Vec<i8>,
    levels: Vec<i8>,
    matching_pdi: Vec<Option<usize>>,
    matching_initiator: Vec<Option<usize>>,
    isolate_stack: Vec<usize>,
    sequences: IsolatingRunSequences,
    sequence_indices: Vec<usize>,
    sequence_types: Vec<BidiCharacterType>,
    brackets: BracketPairs,
}

impl BidiResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve embedding levels for every paragraph of `data`.
    ///
    /// `base_level` overrides the paragraph level (P2-P3) of every
    /// paragraph; values above 125 are clamped.
    #[must_use]
    pub fn resolve(&mut self, data: &BidiData, base_level: Option<u8>) -> ResolvedLevels {
        let mut resolved = ResolvedLevels::default();
        self.resolve_into(data, base_level, &mut resolved);
        resolved
    }

    /// Like [`resolve`](Self::resolve), reusing the storage of `out`.
    pub fn resolve_into(
        &mut self,
        data: &BidiData,
        base_level: Option<u8>,
        out: &mut ResolvedLevels,
    ) {
        out.levels.clear();
        out.paragraphs.clear();
        let base_level = base_level.map(|level| level.min(MAX_DEPTH));

        // P1
        let types = data.types();
        let mut start = 0;
        while start < types.len() {
            let end = types[start..]
                .iter()
                .position(|&ty| ty == B)
                .map_or(types.len(), |at| start + at + 1);
            let level = self.resolve_paragraph(data, start..end, base_level);
            out.levels.extend_from_slice(&self.levels);
            out.paragraphs.push(Paragraph {
                range: start..end,
                level,
            });
            start = end;
        }

        out.paragraph_level = out
            .paragraphs
            .first()
            .map_or(base_level.unwrap_or(0), |paragraph| paragraph.level);
    }

    /// Resolve one paragraph into `self.levels`, returning its level.
    fn resolve_paragraph(
        &mut self,
        data: &BidiData,
        range: Range<usize>,
        base_level: Option<u8>,
    ) -> u8 {
        let original = &data.types()[range.clone()];
        match_isolates(
            original,
            &mut self.matching_pdi,
            &mut self.matching_initiator,
            &mut self.isolate_stack,
        );
        let level = base_level.unwrap_or_else(|| paragraph_level(original, &self.matching_pdi));

        self.levels.clear();
        if level == 0 && is_left_to_right_only(original) {
            self.levels.extend(original.iter().map(|ty| {
                if ty.is_removed_by_x9() {
                    REMOVED_LEVEL
                } else {
                    0
                }
            }));
            return level;
        }

        // X1-X8
        self.types.clear();
        self.types.extend_from_slice(original);
        self.explicit_levels.clear();
        self.explicit_levels.resize(original.len(), level as i8);
        resolve_explicit_levels(
            &mut self.types,
            &mut self.explicit_levels,
            &self.matching_pdi,
            level,
        );
        self.levels.extend_from_slice(&self.explicit_levels);

        // X10
        self.sequences.build(
            original,
            &self.explicit_levels,
            &self.matching_pdi,
            &self.matching_initiator,
        );

        let bracket_context = BracketContext {
            pre_weak_types: &self.types,
            bracket_types: &data.bracket_types()[range.clone()],
            bracket_values: &data.bracket_values()[range],
        };
        for sequence in 0..self.sequences.len() {
            self.sequences
                .indices_into(sequence, &mut self.sequence_indices);
            let indices = &self.sequence_indices;
            let Some(&first) = indices.first() else {
                continue;
            };
            let sequence_level = self.explicit_levels[first] as u8;
            let (sos, eos) = sequence_boundaries(indices, original, &self.explicit_levels, level);

            self.sequence_types.clear();
            self.sequence_types
                .extend(indices.iter().map(|&i| self.types[i]));

            resolve_weak_types(&mut self.sequence_types, sos);
            if data.has_brackets() {
                self.brackets.resolve(
                    &mut self.sequence_types,
                    indices,
                    &bracket_context,
                    sos,
                    sequence_level,
                );
            }
            resolve_neutral_types(&mut self.sequence_types, sos, eos, sequence_level);

            // I1-I2
            for (&i, &ty) in indices.iter().zip(&self.sequence_types) {
                self.levels[i] = implicit_level(sequence_level, ty) as i8;
            }
        }

        // X9
        for (slot, ty) in self.levels.iter_mut().zip(original) {
            if ty.is_removed_by_x9() {
                *slot = REMOVED_LEVEL;
            }
        }

        reset_whitespace_levels(original, &mut self.levels, level);
        level
    }

    /// Levels of one line of resolved text, with whitespace at the end of
    /// the line reset to the paragraph level (L1).
    ///
    /// Written into the scratch buffer of `data`. A line range past the end
    /// of the text is clamped. When the line spans several paragraphs, the
    /// trailing whitespace takes the level of the last one.
    pub fn line_levels<'a>(
        data: &'a mut BidiData,
        resolved: &ResolvedLevels,
        line: Range<usize>,
    ) -> &'a [i8] {
        let len = data.len().min(resolved.len());
        let end = line.end.min(len);
        let start = line.start.min(end);
        // The trailing whitespace belongs to the paragraph holding the line end.
        let paragraph_level = resolved
            .paragraph_at(end.saturating_sub(1).max(start))
            .map_or(resolved.paragraph_level(), |paragraph| paragraph.level);

        let (types, scratch) = data.types_and_scratch(end - start);
        scratch.copy_from_slice(&resolved.levels()[start..end]);
        reset_line_end(&types[start..end], scratch, paragraph_level);
        scratch
    }
}

/// No character can raise a level above zero.
fn is_left_to_right_only(types: &[BidiCharacterType]) -> bool {
    types.iter().all(|&ty| {
        !matches!(ty, R | AL | AN) && !ty.is_embedding_or_override() && !ty.is_isolate_control()
    })
}
