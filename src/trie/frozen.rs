//! Immutable trie and its binary serialization.
//!
//! # Binary format
//!
//! All integers are little-endian `u32`:
//!
//! | field          | notes                                        |
//! |----------------|----------------------------------------------|
//! | magic          | `b"UTRI"`                                    |
//! | version        | [`FORMAT_VERSION`]                           |
//! | block size     | power of two, 16..=4096                      |
//! | default value  |                                              |
//! | index length   | must equal `0x110000 / block size`           |
//! | data length    |                                              |
//! | index array    | `index length` data offsets                  |
//! | data array     | `data length` values                         |

use std::io::{self, Read, Write};

use super::{CODE_POINT_COUNT, MAX_BLOCK_SHIFT, index_len_for_shift, is_valid_block_shift};
use crate::error::{Error, Result};
use crate::unicode::CodePoint;

/// Magic bytes at the start of every serialized trie.
pub const MAGIC: [u8; 4] = *b"UTRI";

/// Current serialization format version.
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = 24;

/// Frozen two-stage lookup table from code point to `u32`.
///
/// Immutable after construction and safe to share across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodePointTrie {
    block_shift: u32,
    default_value: u32,
    index: Box<[u32]>,
    data: Box<[u32]>,
}

impl CodePointTrie {
    pub(super) fn from_parts(
        block_shift: u32,
        default_value: u32,
        index: Box<[u32]>,
        data: Box<[u32]>,
    ) -> Self {
        debug_assert_eq!(index.len(), index_len_for_shift(block_shift));
        Self {
            block_shift,
            default_value,
            index,
            data,
        }
    }

    /// Value stored for `code_point`.
    #[inline]
    #[must_use]
    pub fn get(&self, code_point: CodePoint) -> u32 {
        self.get_u32(code_point.value())
    }

    /// Value stored for a raw code point.
    ///
    /// Values above `0x10FFFF` yield the default value.
    #[inline]
    #[must_use]
    pub fn get_u32(&self, code_point: u32) -> u32 {
        let Some(&offset) = self.index.get((code_point >> self.block_shift) as usize) else {
            return self.default_value;
        };
        let mask = (1u32 << self.block_shift) - 1;
        let position = offset as usize + (code_point & mask) as usize;
        self.data.get(position).copied().unwrap_or(self.default_value)
    }

    /// Value for code points that were never assigned.
    #[must_use]
    pub fn default_value(&self) -> u32 {
        self.default_value
    }

    /// Number of code points per block.
    #[must_use]
    pub fn block_size(&self) -> u32 {
        1 << self.block_shift
    }

    #[must_use]
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Size of the serialized form in bytes.
    #[must_use]
    pub fn size_in_bytes(&self) -> usize {
        HEADER_LEN + 4 * (self.index.len() + self.data.len())
    }

    /// Serialize into a byte vector.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size_in_bytes());
        out.extend_from_slice(&MAGIC);
        for field in [
            FORMAT_VERSION,
            self.block_size(),
            self.default_value,
            self.index.len() as u32,
            self.data.len() as u32,
        ] {
            out.extend_from_slice(&field.to_le_bytes());
        }
        for value in self.index.iter().chain(self.data.iter()) {
            out.extend_from_slice(&value.to_le_bytes());
        }
        out
    }

    /// Write the serialized trie to `writer`.
    pub fn save<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Deserialize a trie from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::load(bytes)
    }

    /// Read and validate a serialized trie from `reader`.
    ///
    /// Truncated or inconsistent data is reported as
    /// [`Error::CorruptTrie`]; other read failures as [`Error::Io`].
    pub fn load<R: Read>(mut reader: R) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        read_exact_or_corrupt(&mut reader, &mut header, "header")?;

        if header[..4] != MAGIC {
            return Err(Error::corrupt("bad magic bytes"));
        }
        let field = |n: usize| {
            let start = 4 + n * 4;
            u32::from_le_bytes([
                header[start],
                header[start + 1],
                header[start + 2],
                header[start + 3],
            ])
        };
        let version = field(0);
        let block_size = field(1);
        let default_value = field(2);
        let index_len = field(3) as usize;
        let data_len = field(4) as usize;

        if version != FORMAT_VERSION {
            return Err(Error::corrupt(format!(
                "unsupported format version {version}"
            )));
        }
        if !block_size.is_power_of_two() || !is_valid_block_shift(block_size.trailing_zeros()) {
            return Err(Error::corrupt(format!("invalid block size {block_size}")));
        }
        let block_shift = block_size.trailing_zeros();
        if index_len != index_len_for_shift(block_shift) {
            return Err(Error::corrupt(format!(
                "index length {index_len} does not cover the code space with block size {block_size}"
            )));
        }
        let max_data_len = (CODE_POINT_COUNT + (1 << MAX_BLOCK_SHIFT)) as usize;
        if data_len < block_size as usize || data_len > max_data_len {
            return Err(Error::corrupt(format!("invalid data length {data_len}")));
        }

        let index = read_u32_array(&mut reader, index_len, "index array")?;
        let data = read_u32_array(&mut reader, data_len, "data array")?;

        if let Some((block, &offset)) = index
            .iter()
            .enumerate()
            .find(|&(_, &offset)| offset as usize + block_size as usize > data_len)
        {
            return Err(Error::corrupt(format!(
                "index entry {block} points past the data array (offset {offset})"
            )));
        }

        Ok(Self {
            block_shift,
            default_value,
            index,
            data,
        })
    }
}

fn read_exact_or_corrupt<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::corrupt(format!("truncated {what}"))
        } else {
            Error::Io(e)
        }
    })
}

fn read_u32_array<R: Read>(reader: &mut R, len: usize, what: &str) -> Result<Box<[u32]>> {
    let mut bytes = vec![0u8; len * 4];
    read_exact_or_corrupt(reader, &mut bytes, what)?;
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
