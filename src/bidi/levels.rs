//! Resolved embedding levels, whitespace reset (L1) and reordering (L2).

use std::ops::Range;

use crate::unicode::BidiCharacterType::{self, *};

/// Level stored for characters removed by X9.
pub const REMOVED_LEVEL: i8 = -1;

/// Text direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Direction of an embedding level: even is left-to-right.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        if level % 2 == 0 { Self::Ltr } else { Self::Rtl }
    }

    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// One paragraph of the resolved text (P1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paragraph {
    /// Code point range, including the trailing paragraph separator.
    pub range: Range<usize>,
    /// Paragraph embedding level.
    pub level: u8,
}

impl Paragraph {
    #[must_use]
    pub const fn direction(&self) -> Direction {
        Direction::from_level(self.level)
    }
}

/// Output of [`BidiResolver::resolve`](super::BidiResolver::resolve).
///
/// `levels` holds one entry per code point; characters removed by X9 (BN
/// and explicit embedding codes) are [`REMOVED_LEVEL`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedLevels {
    pub(crate) levels: Vec<i8>,
    pub(crate) paragraph_level: u8,
    pub(crate) paragraphs: Vec<Paragraph>,
}

impl ResolvedLevels {
    #[must_use]
    pub fn levels(&self) -> &[i8] {
        &self.levels
    }

    /// Base level of the first paragraph, or of the override.
    #[must_use]
    pub fn paragraph_level(&self) -> u8 {
        self.paragraph_level
    }

    #[must_use]
    pub fn base_direction(&self) -> Direction {
        Direction::from_level(self.paragraph_level)
    }

    #[must_use]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Paragraph containing code point `index`.
    #[must_use]
    pub fn paragraph_at(&self, index: usize) -> Option<&Paragraph> {
        let at = self.paragraphs.partition_point(|p| p.range.end <= index);
        self.paragraphs.get(at).filter(|p| p.range.contains(&index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels with each removed character taking the level of the character
    /// before it, or the paragraph level at the start of a paragraph.
    #[must_use]
    pub fn filled_levels(&self) -> Vec<i8> {
        let mut filled = self.levels.clone();
        for paragraph in &self.paragraphs {
            fill_removed(&mut filled[paragraph.range.clone()], paragraph.level);
        }
        filled
    }

    /// Visual-to-logical index map for the whole text, each paragraph
    /// reordered on its own.
    #[must_use]
    pub fn visual_order(&self) -> Vec<usize> {
        let filled = self.filled_levels();
        let mut order = Vec::with_capacity(filled.len());
        for paragraph in &self.paragraphs {
            let start = paragraph.range.start;
            order.extend(
                reorder_line(&filled[paragraph.range.clone()])
                    .into_iter()
                    .map(|i| i + start),
            );
        }
        order
    }

    /// Directional runs in visual order, paragraph by paragraph.
    #[must_use]
    pub fn visual_runs(&self) -> Vec<BidiRun> {
        let filled = self.filled_levels();
        let mut runs = Vec::new();
        for paragraph in &self.paragraphs {
            let start = paragraph.range.start;
            runs.extend(
                visual_runs(&filled[paragraph.range.clone()])
                    .into_iter()
                    .map(|run| BidiRun {
                        range: run.range.start + start..run.range.end + start,
                        level: run.level,
                    }),
            );
        }
        runs
    }
}

/// Replace removed levels in place.
pub(crate) fn fill_removed(levels: &mut [i8], paragraph_level: u8) {
    let mut previous = paragraph_level as i8;
    for level in levels.iter_mut() {
        if *level == REMOVED_LEVEL {
            *level = previous;
        } else {
            previous = *level;
        }
    }
}

/// Whether L1 resets `ty` when it trails a line or precedes a separator.
const fn is_trailing_whitespace(ty: BidiCharacterType) -> bool {
    ty.is_isolate_control() || ty.is_removed_by_x9() || matches!(ty, WS)
}

/// Reset separators and trailing whitespace to the paragraph level (L1).
///
/// `types` are original types. Removed characters keep [`REMOVED_LEVEL`].
pub(crate) fn reset_whitespace_levels(
    types: &[BidiCharacterType],
    levels: &mut [i8],
    paragraph_level: u8,
) {
    let paragraph_level = paragraph_level as i8;
    let reset = |levels: &mut [i8]| {
        for level in levels {
            if *level != REMOVED_LEVEL {
                *level = paragraph_level;
            }
        }
    };

    let mut trailing_start = None;
    for (i, &ty) in types.iter().enumerate() {
        if matches!(ty, S | B) {
            levels[i] = paragraph_level;
            if let Some(start) = trailing_start.take() {
                reset(&mut levels[start..i]);
            }
        } else if is_trailing_whitespace(ty) {
            trailing_start.get_or_insert(i);
        } else {
            trailing_start = None;
        }
    }
    if let Some(start) = trailing_start {
        reset(&mut levels[start..]);
    }
}

/// Reset the whitespace at the end of a line to the paragraph level.
pub(crate) fn reset_line_end(types: &[BidiCharacterType], levels: &mut [i8], paragraph_level: u8) {
    for (level, &ty) in levels.iter_mut().zip(types).rev() {
        if !is_trailing_whitespace(ty) {
            break;
        }
        if *level != REMOVED_LEVEL {
            *level = paragraph_level as i8;
        }
    }
}

/// Lowest odd level and highest level of a line, `None` if nothing needs
/// reversing.
fn reorder_bounds(levels: impl Iterator<Item = u8>) -> Option<(u8, u8)> {
    let (lowest, highest) = levels.fold((u8::MAX, 0), |(lo, hi), level| {
        (lo.min(level), hi.max(level))
    });
    let lowest_odd = lowest | 1;
    (highest >= lowest_odd).then_some((lowest_odd, highest))
}

fn line_level(level: i8) -> u8 {
    level.max(0) as u8
}

/// Visual order of one line (L2).
///
/// Returns the logical index of each character in visual order. `levels`
/// should have removed characters filled, see
/// [`ResolvedLevels::filled_levels`]; any left negative count as level 0.
#[must_use]
pub fn reorder_line(levels: &[i8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();
    let Some((lowest_odd, highest)) = reorder_bounds(levels.iter().map(|&l| line_level(l))) else {
        return order;
    };

    let mut visual_levels: Vec<u8> = levels.iter().map(|&l| line_level(l)).collect();
    for level in (lowest_odd..=highest).rev() {
        let mut i = 0;
        while i < visual_levels.len() {
            if visual_levels[i] < level {
                i += 1;
                continue;
            }
            let start = i;
            while i < visual_levels.len() && visual_levels[i] >= level {
                i += 1;
            }
            order[start..i].reverse();
            visual_levels[start..i].reverse();
        }
    }
    order
}

/// A maximal run of characters at one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiRun {
    /// Logical code point range.
    pub range: Range<usize>,
    pub level: u8,
}

impl BidiRun {
    #[must_use]
    pub const fn direction(&self) -> Direction {
        Direction::from_level(self.level)
    }

    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        self.level % 2 == 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Level runs of one line, in visual order (L2).
///
/// Characters inside an RTL run are displayed in reverse logical order.
#[must_use]
pub fn visual_runs(levels: &[i8]) -> Vec<BidiRun> {
    let mut runs: Vec<BidiRun> = Vec::new();
    for (i, &level) in levels.iter().enumerate() {
        let level = line_level(level);
        match runs.last_mut() {
            Some(run) if run.level == level => run.range.end = i + 1,
            _ => runs.push(BidiRun {
                range: i..i + 1,
                level,
            }),
        }
    }

    let Some((lowest_odd, highest)) = reorder_bounds(runs.iter().map(|run| run.level)) else {
        return runs;
    };
    for level in (lowest_odd..=highest).rev() {
        let mut i = 0;
        while i < runs.len() {
            if runs[i].level < level {
                i += 1;
                continue;
            }
            let start = i;
            while i < runs.len() && runs[i].level >= level {
                i += 1;
            }
            runs[start..i].reverse();
        }
    }
    runs
}
