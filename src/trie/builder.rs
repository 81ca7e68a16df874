//! Mutable trie builder.

use std::collections::HashMap;

use super::{CodePointTrie, DEFAULT_BLOCK_SHIFT, index_len_for_shift, is_valid_block_shift};
use crate::unicode::CodePoint;

/// Contents of one block while building.
#[derive(Clone, Debug)]
enum Block {
    /// Every code point in the block has this value.
    Uniform(u32),
    /// Per-code-point values.
    Dense(Box<[u32]>),
}

impl Block {
    fn get(&self, offset: usize) -> u32 {
        match self {
            Self::Uniform(value) => *value,
            Self::Dense(values) => values[offset],
        }
    }

    fn make_dense(&mut self, len: usize) -> &mut [u32] {
        if let Self::Uniform(value) = *self {
            *self = Self::Dense(vec![value; len].into_boxed_slice());
        }
        match self {
            Self::Dense(values) => values,
            Self::Uniform(_) => unreachable!("block was just made dense"),
        }
    }
}

/// Incremental builder for a [`CodePointTrie`].
///
/// Every code point starts out with the builder's default value. Values are
/// assigned with [`set`](Self::set) and [`set_range`](Self::set_range); when
/// several data sources are layered, `overwrite = false` keeps the first
/// explicit assignment of each code point.
#[derive(Clone, Debug)]
pub struct TrieBuilder {
    default_value: u32,
    block_shift: u32,
    blocks: Vec<Block>,
}

impl TrieBuilder {
    /// Create a builder with the default block size.
    #[must_use]
    pub fn new(default_value: u32) -> Self {
        Self::with_block_shift(default_value, DEFAULT_BLOCK_SHIFT)
    }

    /// Create a builder whose blocks hold `1 << block_shift` code points.
    ///
    /// # Panics
    ///
    /// Panics if `block_shift` is outside
    /// [`MIN_BLOCK_SHIFT`](super::MIN_BLOCK_SHIFT)..=[`MAX_BLOCK_SHIFT`](super::MAX_BLOCK_SHIFT).
    #[must_use]
    pub fn with_block_shift(default_value: u32, block_shift: u32) -> Self {
        assert!(
            is_valid_block_shift(block_shift),
            "unsupported trie block shift {block_shift}"
        );
        Self {
            default_value,
            block_shift,
            blocks: vec![Block::Uniform(default_value); index_len_for_shift(block_shift)],
        }
    }

    /// Value every code point holds until it is assigned.
    #[must_use]
    pub fn default_value(&self) -> u32 {
        self.default_value
    }

    #[must_use]
    pub fn block_shift(&self) -> u32 {
        self.block_shift
    }

    fn block_len(&self) -> usize {
        1 << self.block_shift
    }

    /// Current value of `code_point`.
    #[must_use]
    pub fn get(&self, code_point: CodePoint) -> u32 {
        let cp = code_point.value();
        let mask = (self.block_len() - 1) as u32;
        self.blocks[(cp >> self.block_shift) as usize].get((cp & mask) as usize)
    }

    /// Assign `value` to a single code point, replacing whatever it held.
    pub fn set(&mut self, code_point: CodePoint, value: u32) {
        self.set_range(code_point, code_point, value, true);
    }

    /// Assign `value` to every code point in `start..=end`.
    ///
    /// With `overwrite = false` only code points still holding the default
    /// value are changed. An empty range (`start > end`) is a no-op.
    pub fn set_range(&mut self, start: CodePoint, end: CodePoint, value: u32, overwrite: bool) {
        let (start, end) = (start.value(), end.value());
        if start > end {
            return;
        }

        let block_len = self.block_len();
        let mask = (block_len - 1) as u32;
        let default_value = self.default_value;
        let mut cp = start;

        loop {
            let block_start = cp & !mask;
            let block_end = block_start | mask;
            let hi = end.min(block_end);
            let whole = cp == block_start && hi == block_end;
            let block = &mut self.blocks[(cp >> self.block_shift) as usize];

            match block {
                Block::Uniform(current) if whole => {
                    if overwrite || *current == default_value {
                        *current = value;
                    }
                }
                _ => {
                    let values = block.make_dense(block_len);
                    let lo = (cp - block_start) as usize;
                    let hi = (hi - block_start) as usize;
                    for slot in &mut values[lo..=hi] {
                        if overwrite || *slot == default_value {
                            *slot = value;
                        }
                    }
                }
            }

            if hi >= end {
                break;
            }
            cp = hi + 1;
        }
    }

    /// Produce the immutable, block-deduplicated form of this builder.
    ///
    /// The builder is left untouched and can keep accepting assignments.
    #[must_use]
    pub fn freeze(&self) -> CodePointTrie {
        let block_len = self.block_len();
        let default_block = vec![self.default_value; block_len];

        let mut data = default_block.clone();
        let mut index = Vec::with_capacity(self.blocks.len());
        let mut offsets: HashMap<Box<[u32]>, u32> = HashMap::new();
        offsets.insert(default_block.into_boxed_slice(), 0);

        let mut scratch = vec![0u32; block_len];
        for block in &self.blocks {
            let contents: &[u32] = match block {
                Block::Uniform(value) => {
                    scratch.fill(*value);
                    &scratch
                }
                Block::Dense(values) => values,
            };

            let offset = match offsets.get(contents) {
                Some(&offset) => offset,
                None => {
                    let offset = append_block(&mut data, contents);
                    offsets.insert(contents.into(), offset);
                    offset
                }
            };
            index.push(offset);
        }

        CodePointTrie::from_parts(
            self.block_shift,
            self.default_value,
            index.into_boxed_slice(),
            data.into_boxed_slice(),
        )
    }
}

/// Append `block` to `data`, sharing any prefix of it that matches the
/// current tail of `data`. Returns the block's offset.
fn append_block(data: &mut Vec<u32>, block: &[u32]) -> u32 {
    let overlap = (1..block.len())
        .rev()
        .find(|&n| n <= data.len() && data[data.len() - n..] == block[..n])
        .unwrap_or(0);
    let offset = data.len() - overlap;
    data.extend_from_slice(&block[overlap..]);
    offset as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::MIN_BLOCK_SHIFT;

    fn cp(value: u32) -> CodePoint {
        CodePoint::new(value).unwrap()
    }

    #[test]
    fn test_unset_builder_returns_default() {
        let builder = TrieBuilder::new(7);
        assert_eq!(builder.get(cp(0)), 7);
        assert_eq!(builder.get(cp(0x10_FFFF)), 7);
    }

    #[test]
    fn test_set_single_code_point() {
        let mut builder = TrieBuilder::new(0);
        builder.set(cp(0x41), 5);
        assert_eq!(builder.get(cp(0x41)), 5);
        assert_eq!(builder.get(cp(0x40)), 0);
        assert_eq!(builder.get(cp(0x42)), 0);
    }

    #[test]
    fn test_set_range_spanning_blocks() {
        let mut builder = TrieBuilder::new(0);
        builder.set_range(cp(0x30), cp(0x1234), 3, true);
        assert_eq!(builder.get(cp(0x2F)), 0);
        assert_eq!(builder.get(cp(0x30)), 3);
        assert_eq!(builder.get(cp(0x800)), 3);
        assert_eq!(builder.get(cp(0x1234)), 3);
        assert_eq!(builder.get(cp(0x1235)), 0);
    }

    #[test]
    fn test_overwrite_false_keeps_first_assignment() {
        let mut builder = TrieBuilder::new(0);
        builder.set_range(cp(0x100), cp(0x1FF), 1, true);
        builder.set_range(cp(0x80), cp(0x2FF), 2, false);

        assert_eq!(builder.get(cp(0x7F)), 0);
        assert_eq!(builder.get(cp(0x80)), 2);
        assert_eq!(builder.get(cp(0x100)), 1);
        assert_eq!(builder.get(cp(0x1FF)), 1);
        assert_eq!(builder.get(cp(0x200)), 2);
    }

    #[test]
    fn test_overwrite_true_replaces() {
        let mut builder = TrieBuilder::new(0);
        builder.set_range(cp(0x100), cp(0x1FF), 1, true);
        builder.set_range(cp(0x180), cp(0x27F), 2, true);
        assert_eq!(builder.get(cp(0x17F)), 1);
        assert_eq!(builder.get(cp(0x180)), 2);
        assert_eq!(builder.get(cp(0x27F)), 2);
    }

    #[test]
    fn test_empty_range_is_noop() {
        let mut builder = TrieBuilder::new(0);
        builder.set_range(cp(0x200), cp(0x100), 9, true);
        assert_eq!(builder.get(cp(0x180)), 0);
    }

    #[test]
    fn test_freeze_deduplicates_uniform_blocks() {
        let mut builder = TrieBuilder::new(0);
        builder.set_range(cp(0x2_0000), cp(0x2_FFFF), 4, true);
        let trie = builder.freeze();
        // Default block plus a single block of 4s.
        assert_eq!(trie.data_len(), 2 << DEFAULT_BLOCK_SHIFT);
        assert_eq!(trie.get(cp(0x2_1234)), 4);
        assert_eq!(trie.get(cp(0x3_0000)), 0);
    }

    #[test]
    fn test_freeze_overlaps_block_tails() {
        let mut builder = TrieBuilder::with_block_shift(0, MIN_BLOCK_SHIFT);
        // First block ends with eight 1s, second block starts with eight 1s.
        builder.set_range(cp(0x18), cp(0x1F), 1, true);
        builder.set_range(cp(0x20), cp(0x27), 1, true);
        builder.set_range(cp(0x28), cp(0x2F), 2, true);
        let trie = builder.freeze();

        assert_eq!(trie.data_len(), 16 + 8 + 8);
        for value in 0x18..=0x27 {
            assert_eq!(trie.get(cp(value)), 1);
        }
        assert_eq!(trie.get(cp(0x2A)), 2);
        assert_eq!(trie.get(cp(0x17)), 0);
    }

    #[test]
    fn test_freeze_matches_builder_everywhere() {
        let mut builder = TrieBuilder::new(0xFFFF);
        builder.set_range(cp(0), cp(0x7F), 1, true);
        builder.set_range(cp(0x3000), cp(0x30FF), 2, true);
        builder.set(cp(0x3005), 3);
        builder.set_range(cp(0xE000), cp(0xF8FF), 4, true);
        builder.set_range(cp(0x1_F300), cp(0x1_F5FF), 5, false);
        builder.set_range(cp(0x10_0000), cp(0x10_FFFF), 6, true);

        let trie = builder.freeze();
        for value in 0..=0x10_FFFF {
            let code_point = cp(value);
            assert_eq!(trie.get(code_point), builder.get(code_point), "at {value:#X}");
        }
    }

    #[test]
    #[should_panic(expected = "unsupported trie block shift")]
    fn test_rejects_bad_block_shift() {
        let _ = TrieBuilder::with_block_shift(0, 2);
    }
}
