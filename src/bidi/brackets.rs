//! Paired bracket matching (BD16) and bracket pair resolution (N0).

use crate::unicode::BidiCharacterType::{self, *};
use crate::unicode::BidiPairedBracketType;

/// Opening brackets tracked at once before pairing stops (BD16).
pub const MAX_BRACKET_DEPTH: usize = 63;

/// Strong direction for N0, with numbers counting as R.
const fn strong_direction(ty: BidiCharacterType) -> Option<BidiCharacterType> {
    match ty {
        L => Some(L),
        R | AL | EN | AN => Some(R),
        _ => None,
    }
}

/// Reusable bracket pairing state.
#[derive(Debug, Default)]
pub(crate) struct BracketPairs {
    openers: Vec<(u32, usize)>,
    pairs: Vec<(usize, usize)>,
}

/// Paragraph-wide inputs to N0.
pub(crate) struct BracketContext<'a> {
    /// Types before weak resolution, used to find NSMs following a bracket.
    pub(crate) pre_weak_types: &'a [BidiCharacterType],
    pub(crate) bracket_types: &'a [BidiPairedBracketType],
    pub(crate) bracket_values: &'a [u32],
}

impl BracketPairs {
    /// Locate bracket pairs in one sequence (BD16).
    ///
    /// Pairs are sequence positions sorted by opening bracket. When more
    /// than [`MAX_BRACKET_DEPTH`] openers are pending, pairing stops and the
    /// pairs found so far are kept.
    pub(crate) fn locate(
        &mut self,
        types: &[BidiCharacterType],
        indices: &[usize],
        context: &BracketContext<'_>,
    ) -> &[(usize, usize)] {
        self.openers.clear();
        self.pairs.clear();

        for (pos, &index) in indices.iter().enumerate() {
            if types[pos] != ON {
                continue;
            }
            let value = context.bracket_values[index];
            match context.bracket_types[index] {
                BidiPairedBracketType::Open => {
                    if self.openers.len() == MAX_BRACKET_DEPTH {
                        break;
                    }
                    self.openers.push((value, pos));
                }
                BidiPairedBracketType::Close => {
                    if let Some(depth) = self.openers.iter().rposition(|&(open, _)| open == value) {
                        self.pairs.push((self.openers[depth].1, pos));
                        self.openers.truncate(depth);
                    }
                }
                BidiPairedBracketType::None => {}
            }
        }

        self.pairs.sort_unstable_by_key(|&(open, _)| open);
        &self.pairs
    }

    /// Resolve bracket pairs to the embedding direction or the direction
    /// established by their context (N0).
    pub(crate) fn resolve(
        &mut self,
        types: &mut [BidiCharacterType],
        indices: &[usize],
        context: &BracketContext<'_>,
        sos: BidiCharacterType,
        level: u8,
    ) {
        self.locate(types, indices, context);
        let embedding = if level % 2 == 0 { L } else { R };

        for &(open, close) in &self.pairs {
            let mut found_embedding = false;
            let mut found_opposite = false;
            for &ty in &types[open + 1..close] {
                match strong_direction(ty) {
                    Some(direction) if direction == embedding => {
                        found_embedding = true;
                        break;
                    }
                    Some(_) => found_opposite = true,
                    None => {}
                }
            }

            let direction = if found_embedding {
                embedding
            } else if found_opposite {
                let preceding = types[..open]
                    .iter()
                    .rev()
                    .find_map(|&ty| strong_direction(ty))
                    .unwrap_or(sos);
                if preceding == embedding {
                    embedding
                } else {
                    preceding
                }
            } else {
                continue;
            };

            for bracket in [open, close] {
                types[bracket] = direction;
                for pos in bracket + 1..indices.len() {
                    if context.pre_weak_types[indices[pos]] != NSM {
                        break;
                    }
                    types[pos] = direction;
                }
            }
        }
    }
}
