//! Compact two-stage code point tries.
//!
//! A trie maps every code point in `[0, 0x10FFFF]` to a `u32`. The code space
//! is split into fixed-size blocks; an index array holds, for each block, the
//! offset of its contents in a shared data array. Identical blocks are stored
//! once, so the large uniform regions of the code space (unassigned planes,
//! private use areas) collapse into a single block.
//!
//! Tries are assembled with a mutable [`TrieBuilder`] and then frozen into an
//! immutable [`CodePointTrie`], which can be saved to and loaded from a
//! compact binary blob.
//!
//! ```
//! use unibidi::trie::TrieBuilder;
//! use unibidi::CodePoint;
//!
//! let mut builder = TrieBuilder::new(0);
//! builder.set_range(CodePoint::from('a'), CodePoint::from('z'), 1, true);
//! let trie = builder.freeze();
//!
//! assert_eq!(trie.get(CodePoint::from('q')), 1);
//! assert_eq!(trie.get(CodePoint::from('Q')), 0);
//! ```

mod builder;
mod frozen;

pub use builder::TrieBuilder;
pub use frozen::CodePointTrie;

/// Number of code points covered by every trie.
pub const CODE_POINT_COUNT: u32 = 0x11_0000;

/// Default block shift: 64 code points per block.
pub const DEFAULT_BLOCK_SHIFT: u32 = 6;

/// Smallest supported block shift (16 code points per block).
pub const MIN_BLOCK_SHIFT: u32 = 4;

/// Largest supported block shift (4096 code points per block).
pub const MAX_BLOCK_SHIFT: u32 = 12;

/// Whether `shift` is a block shift tries can be built or loaded with.
#[must_use]
pub const fn is_valid_block_shift(shift: u32) -> bool {
    shift >= MIN_BLOCK_SHIFT && shift <= MAX_BLOCK_SHIFT
}

/// Number of index entries for a given block shift.
#[must_use]
pub const fn index_len_for_shift(shift: u32) -> usize {
    (CODE_POINT_COUNT >> shift) as usize
}
