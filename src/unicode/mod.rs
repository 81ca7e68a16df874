//! Unicode scalar decoding and code point classification.
//!
//! Classification is answered by four frozen [`CodePointTrie`](crate::trie::CodePointTrie)s
//! held in the process-wide [`UnicodeTables`].

mod codepoint;
mod properties;
mod tables;
mod utf16;

pub use codepoint::CodePoint;
pub use properties::{
    BidiCharacterType, BidiClass, BidiPairedBracketType, GeneralCategory, GraphemeClusterClass,
    LineBreakClass,
};
pub use tables::{DATA_DIR_ENV, TableConfig, TableKind, UnicodeTables};
pub use utf16::{Utf16CodePoints, code_point_count, decode_at, decode_last_at};
