//! Level runs (BD7) and isolating run sequences (BD13, X10).

use std::ops::Range;

use crate::unicode::BidiCharacterType::{self, L, R};

/// Isolating run sequences of one paragraph, stored flat so the buffers can
/// be reused across paragraphs.
#[derive(Debug, Default)]
pub(crate) struct IsolatingRunSequences {
    run_indices: Vec<usize>,
    run_bounds: Vec<Range<usize>>,
    run_of: Vec<usize>,
    sequence_runs: Vec<usize>,
    sequence_bounds: Vec<Range<usize>>,
}

impl IsolatingRunSequences {
    /// Rebuild from the original `types` and explicit `levels` of one
    /// paragraph. X9-removed characters belong to no run.
    pub(crate) fn build(
        &mut self,
        types: &[BidiCharacterType],
        levels: &[i8],
        matching_pdi: &[Option<usize>],
        matching_initiator: &[Option<usize>],
    ) {
        self.build_level_runs(types, levels);

        self.sequence_runs.clear();
        self.sequence_bounds.clear();
        for run in 0..self.run_bounds.len() {
            let first = self.run_indices[self.run_bounds[run].start];
            if self.continues_isolate(types, first, matching_initiator) {
                continue;
            }
            let start = self.sequence_runs.len();
            let mut current = run;
            loop {
                self.sequence_runs.push(current);
                let last = self.run_indices[self.run_bounds[current].end - 1];
                if !types[last].is_isolate_initiator() {
                    break;
                }
                match matching_pdi[last].map(|pdi| self.run_of[pdi]) {
                    Some(next) if next != usize::MAX && next != current => current = next,
                    _ => break,
                }
            }
            self.sequence_bounds.push(start..self.sequence_runs.len());
        }
    }

    fn build_level_runs(&mut self, types: &[BidiCharacterType], levels: &[i8]) {
        self.run_indices.clear();
        self.run_bounds.clear();
        self.run_of.clear();
        self.run_of.resize(types.len(), usize::MAX);

        let mut current_level = None;
        let mut run_start = 0;
        for (i, &ty) in types.iter().enumerate() {
            if ty.is_removed_by_x9() {
                continue;
            }
            if current_level != Some(levels[i]) {
                if current_level.is_some() {
                    self.run_bounds.push(run_start..self.run_indices.len());
                }
                run_start = self.run_indices.len();
                current_level = Some(levels[i]);
            }
            self.run_of[i] = self.run_bounds.len();
            self.run_indices.push(i);
        }
        if current_level.is_some() {
            self.run_bounds.push(run_start..self.run_indices.len());
        }
    }

    /// Whether a run starting at `first` is the tail of an isolate whose
    /// initiator ends an earlier run.
    fn continues_isolate(
        &self,
        types: &[BidiCharacterType],
        first: usize,
        matching_initiator: &[Option<usize>],
    ) -> bool {
        let Some(initiator) = matching_initiator[first] else {
            return false;
        };
        let run = self.run_of[initiator];
        run != usize::MAX
            && run != self.run_of[first]
            && types[initiator].is_isolate_initiator()
            && self.run_indices[self.run_bounds[run].end - 1] == initiator
    }

    pub(crate) fn len(&self) -> usize {
        self.sequence_bounds.len()
    }

    /// Paragraph indices of sequence `sequence`, in logical order.
    pub(crate) fn indices_into(&self, sequence: usize, out: &mut Vec<usize>) {
        out.clear();
        for &run in &self.sequence_runs[self.sequence_bounds[sequence].clone()] {
            out.extend_from_slice(&self.run_indices[self.run_bounds[run].clone()]);
        }
    }

    #[cfg(test)]
    fn sequences(&self) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut indices = Vec::new();
        for sequence in 0..self.len() {
            self.indices_into(sequence, &mut indices);
            out.push(indices.clone());
        }
        out
    }
}

/// Direction of a level: even is L, odd is R.
pub(crate) const fn level_direction(level: u8) -> BidiCharacterType {
    if level % 2 == 0 { L } else { R }
}

/// The sos and eos types of a sequence (X10).
///
/// Neighbouring levels skip X9-removed characters. A sequence ending in an
/// unmatched isolate initiator compares against the paragraph level.
pub(crate) fn sequence_boundaries(
    indices: &[usize],
    types: &[BidiCharacterType],
    levels: &[i8],
    paragraph_level: u8,
) -> (BidiCharacterType, BidiCharacterType) {
    let (Some(&first), Some(&last)) = (indices.first(), indices.last()) else {
        let direction = level_direction(paragraph_level);
        return (direction, direction);
    };
    let level = levels[first] as u8;

    let before = (0..first)
        .rev()
        .find(|&i| !types[i].is_removed_by_x9())
        .map_or(paragraph_level, |i| levels[i] as u8);
    let after = if types[last].is_isolate_initiator() {
        paragraph_level
    } else {
        (last + 1..types.len())
            .find(|&i| !types[i].is_removed_by_x9())
            .map_or(paragraph_level, |i| levels[i] as u8)
    };

    (
        level_direction(level.max(before)),
        level_direction(level.max(after)),
    )
}
