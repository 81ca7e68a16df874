//! Paragraph level (P2-P3), isolate matching (BD9) and explicit levels (X1-X8).

use crate::unicode::BidiCharacterType::{self, *};

/// Deepest explicit embedding level.
pub const MAX_DEPTH: u8 = 125;

const STACK_CAPACITY: usize = MAX_DEPTH as usize + 2;

/// Least odd level greater than `level`.
pub(crate) const fn next_rtl_level(level: u8) -> u8 {
    (level + 1) | 1
}

/// Least even level greater than `level`.
pub(crate) const fn next_ltr_level(level: u8) -> u8 {
    (level + 2) & !1
}

/// For each isolate initiator, the index of its matching PDI (BD9), and the
/// reverse mapping for each matched PDI.
pub(crate) fn match_isolates(
    types: &[BidiCharacterType],
    matching_pdi: &mut Vec<Option<usize>>,
    matching_initiator: &mut Vec<Option<usize>>,
    open: &mut Vec<usize>,
) {
    matching_pdi.clear();
    matching_pdi.resize(types.len(), None);
    matching_initiator.clear();
    matching_initiator.resize(types.len(), None);
    open.clear();

    for (i, &ty) in types.iter().enumerate() {
        match ty {
            LRI | RLI | FSI => open.push(i),
            PDI => {
                if let Some(initiator) = open.pop() {
                    matching_pdi[initiator] = Some(i);
                    matching_initiator[i] = Some(initiator);
                }
            }
            // Paragraph separators end every open isolate.
            B => open.clear(),
            _ => {}
        }
    }
}

/// First strong direction in `types[start..end]`, skipping isolated content
/// (P2). AL counts as R.
pub(crate) fn first_strong(
    types: &[BidiCharacterType],
    matching_pdi: &[Option<usize>],
    start: usize,
    end: usize,
) -> Option<BidiCharacterType> {
    let mut i = start;
    while i < end {
        match types[i] {
            L => return Some(L),
            R | AL => return Some(R),
            LRI | RLI | FSI => match matching_pdi[i] {
                Some(pdi) => i = pdi,
                None => return None,
            },
            B => return None,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Paragraph embedding level (P3): 1 if the first strong type is R or AL.
pub(crate) fn paragraph_level(
    types: &[BidiCharacterType],
    matching_pdi: &[Option<usize>],
) -> u8 {
    match first_strong(types, matching_pdi, 0, types.len()) {
        Some(R) => 1,
        _ => 0,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Override {
    #[default]
    Neutral,
    Ltr,
    Rtl,
}

impl Override {
    const fn forced_type(self) -> Option<BidiCharacterType> {
        match self {
            Self::Neutral => None,
            Self::Ltr => Some(L),
            Self::Rtl => Some(R),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct DirectionalStatus {
    level: u8,
    override_status: Override,
    isolate: bool,
}

/// Array-backed directional status stack (X1).
struct DirectionalStatusStack {
    entries: [DirectionalStatus; STACK_CAPACITY],
    len: usize,
}

impl DirectionalStatusStack {
    fn new(paragraph_level: u8) -> Self {
        let mut entries = [DirectionalStatus::default(); STACK_CAPACITY];
        entries[0].level = paragraph_level;
        Self { entries, len: 1 }
    }

    fn last(&self) -> DirectionalStatus {
        self.entries[self.len - 1]
    }

    fn push(&mut self, status: DirectionalStatus) {
        debug_assert!(self.len < STACK_CAPACITY);
        if self.len < STACK_CAPACITY {
            self.entries[self.len] = status;
            self.len += 1;
        }
    }

    fn pop(&mut self) {
        if self.len > 1 {
            self.len -= 1;
        }
    }
}

/// Assign explicit levels (X1-X8).
///
/// `types` holds the original types of one paragraph and is rewritten in
/// place where a directional override applies. Characters X9 removes keep
/// the level current at their position; the caller discards it.
pub(crate) fn resolve_explicit_levels(
    types: &mut [BidiCharacterType],
    levels: &mut [i8],
    matching_pdi: &[Option<usize>],
    paragraph_level: u8,
) {
    let mut stack = DirectionalStatusStack::new(paragraph_level);
    let mut overflow_isolates = 0usize;
    let mut overflow_embeddings = 0usize;
    let mut valid_isolates = 0usize;

    for i in 0..types.len() {
        let ty = types[i];
        match ty {
            // X2-X5
            RLE | LRE | RLO | LRO => {
                let current = stack.last();
                levels[i] = current.level as i8;
                let level = if matches!(ty, RLE | RLO) {
                    next_rtl_level(current.level)
                } else {
                    next_ltr_level(current.level)
                };
                if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    let override_status = match ty {
                        RLO => Override::Rtl,
                        LRO => Override::Ltr,
                        _ => Override::Neutral,
                    };
                    stack.push(DirectionalStatus {
                        level,
                        override_status,
                        isolate: false,
                    });
                } else if overflow_isolates == 0 {
                    overflow_embeddings += 1;
                }
            }
            // X5a-X5c
            RLI | LRI | FSI => {
                let current = stack.last();
                levels[i] = current.level as i8;
                if let Some(forced) = current.override_status.forced_type() {
                    types[i] = forced;
                }
                let rtl = match ty {
                    RLI => true,
                    LRI => false,
                    _ => {
                        let end = matching_pdi[i].unwrap_or(types.len());
                        first_strong(types, matching_pdi, i + 1, end) == Some(R)
                    }
                };
                let level = if rtl {
                    next_rtl_level(current.level)
                } else {
                    next_ltr_level(current.level)
                };
                if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    valid_isolates += 1;
                    stack.push(DirectionalStatus {
                        level,
                        override_status: Override::Neutral,
                        isolate: true,
                    });
                } else {
                    overflow_isolates += 1;
                }
            }
            // X6a
            PDI => {
                if overflow_isolates > 0 {
                    overflow_isolates -= 1;
                } else if valid_isolates > 0 {
                    overflow_embeddings = 0;
                    while !stack.last().isolate {
                        stack.pop();
                    }
                    stack.pop();
                    valid_isolates -= 1;
                }
                let current = stack.last();
                levels[i] = current.level as i8;
                if let Some(forced) = current.override_status.forced_type() {
                    types[i] = forced;
                }
            }
            // X7
            PDF => {
                if overflow_isolates == 0 {
                    if overflow_embeddings > 0 {
                        overflow_embeddings -= 1;
                    } else if !stack.last().isolate && stack.len >= 2 {
                        stack.pop();
                    }
                }
                levels[i] = stack.last().level as i8;
            }
            // X8
            B => levels[i] = paragraph_level as i8,
            BN => levels[i] = stack.last().level as i8,
            // X6
            _ => {
                let current = stack.last();
                levels[i] = current.level as i8;
                if let Some(forced) = current.override_status.forced_type() {
                    types[i] = forced;
                }
            }
        }
    }
}
