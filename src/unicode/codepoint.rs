//! Validated Unicode code points and their properties.

use std::fmt;

use super::properties::{BidiClass, GeneralCategory, GraphemeClusterClass, LineBreakClass};
use super::tables::UnicodeTables;
use crate::error::{Error, Result};

// ASCII table layout: low five bits hold the GeneralCategory discriminant.
const ASCII_CATEGORY_MASK: u8 = 0x1F;
const ASCII_LETTER_OR_DIGIT: u8 = 0x40;
const ASCII_WHITE_SPACE: u8 = 0x80;

static ASCII_TABLE: [u8; 128] = build_ascii_table();

const fn ascii_category(byte: u8) -> GeneralCategory {
    match byte {
        0x00..=0x1F | 0x7F => GeneralCategory::Control,
        b' ' => GeneralCategory::SpaceSeparator,
        b'0'..=b'9' => GeneralCategory::DecimalNumber,
        b'A'..=b'Z' => GeneralCategory::UppercaseLetter,
        b'a'..=b'z' => GeneralCategory::LowercaseLetter,
        b'$' => GeneralCategory::CurrencySymbol,
        b'(' | b'[' | b'{' => GeneralCategory::OpenPunctuation,
        b')' | b']' | b'}' => GeneralCategory::ClosePunctuation,
        b'+' | b'<' | b'=' | b'>' | b'|' | b'~' => GeneralCategory::MathSymbol,
        b'-' => GeneralCategory::DashPunctuation,
        b'^' | b'`' => GeneralCategory::ModifierSymbol,
        b'_' => GeneralCategory::ConnectorPunctuation,
        _ => GeneralCategory::OtherPunctuation,
    }
}

const fn build_ascii_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut byte = 0u8;
    while byte < 128 {
        let mut entry = ascii_category(byte) as u8;
        if byte.is_ascii_alphanumeric() {
            entry |= ASCII_LETTER_OR_DIGIT;
        }
        if matches!(byte, 0x09..=0x0D | b' ') {
            entry |= ASCII_WHITE_SPACE;
        }
        table[byte as usize] = entry;
        byte += 1;
    }
    table
}

/// A Unicode code point in `[0, 0x10FFFF]`.
///
/// Surrogate values are representable (they are code points), but the UTF-16
/// decoder never produces them: unpaired surrogates decode to
/// [`REPLACEMENT_CHAR`](Self::REPLACEMENT_CHAR).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePoint(u32);

impl CodePoint {
    /// Largest code point value.
    pub const MAX_VALUE: u32 = 0x10_FFFF;

    /// U+FFFD REPLACEMENT CHARACTER.
    pub const REPLACEMENT_CHAR: Self = Self(0xFFFD);

    /// Validate `value` as a code point.
    pub fn new(value: u32) -> Result<Self> {
        if Self::is_valid(value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidCodePoint(value))
        }
    }

    /// Callers must guarantee `value <= 0x10FFFF`.
    pub(crate) const fn new_unchecked(value: u32) -> Self {
        debug_assert!(value <= Self::MAX_VALUE);
        Self(value)
    }

    #[must_use]
    pub const fn is_valid(value: u32) -> bool {
        value <= Self::MAX_VALUE
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The code point as a `char`, or `None` for surrogates.
    #[must_use]
    pub const fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    /// Basic Multilingual Plane (plane 0).
    #[must_use]
    pub const fn is_bmp(self) -> bool {
        self.0 <= 0xFFFF
    }

    #[must_use]
    pub const fn plane(self) -> u32 {
        self.0 >> 16
    }

    #[must_use]
    pub const fn is_ascii(self) -> bool {
        self.0 < 0x80
    }

    /// Number of UTF-16 code units needed to encode this code point.
    #[must_use]
    pub const fn utf16_len(self) -> usize {
        if self.is_bmp() { 1 } else { 2 }
    }

    /// Number of UTF-8 bytes needed to encode this code point.
    #[must_use]
    pub const fn utf8_len(self) -> usize {
        match self.0 {
            0..=0x7F => 1,
            0x80..=0x7FF => 2,
            0x800..=0xFFFF => 3,
            _ => 4,
        }
    }

    /// C0 and C1 controls: `[U+0000, U+001F]` and `[U+007F, U+009F]`.
    ///
    /// Fixed by Unicode stability policy, so this never consults the tables.
    #[must_use]
    pub const fn is_control(self) -> bool {
        self.0 <= 0x1F || (self.0 >= 0x7F && self.0 <= 0x9F)
    }

    /// LF, VT, FF, CR, NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR.
    #[must_use]
    pub const fn is_new_line(self) -> bool {
        matches!(self.0, 0x0A..=0x0D | 0x85 | 0x2028 | 0x2029)
    }

    /// Unicode White_Space.
    #[must_use]
    pub fn is_white_space(self) -> bool {
        if self.is_ascii() {
            return ASCII_TABLE[self.0 as usize] & ASCII_WHITE_SPACE != 0;
        }
        // NEL is the only White_Space code point outside Zs/Zl/Zp above ASCII.
        self.0 == 0x85 || self.general_category().is_separator()
    }

    #[must_use]
    pub fn is_letter(self) -> bool {
        if self.is_ascii() {
            return self.to_ascii_byte().is_ascii_alphabetic();
        }
        self.general_category().is_letter()
    }

    /// General_Category Nd.
    #[must_use]
    pub fn is_digit(self) -> bool {
        if self.is_ascii() {
            return self.to_ascii_byte().is_ascii_digit();
        }
        self.general_category() == GeneralCategory::DecimalNumber
    }

    #[must_use]
    pub fn is_letter_or_digit(self) -> bool {
        if self.is_ascii() {
            return ASCII_TABLE[self.0 as usize] & ASCII_LETTER_OR_DIGIT != 0;
        }
        let category = self.general_category();
        category.is_letter() || category == GeneralCategory::DecimalNumber
    }

    #[must_use]
    pub fn is_mark(self) -> bool {
        self.general_category().is_mark()
    }

    #[must_use]
    pub fn is_punctuation(self) -> bool {
        self.general_category().is_punctuation()
    }

    #[must_use]
    pub fn is_symbol(self) -> bool {
        self.general_category().is_symbol()
    }

    #[must_use]
    pub fn is_separator(self) -> bool {
        self.general_category().is_separator()
    }

    /// General_Category from the global tables (ASCII answered inline).
    #[must_use]
    pub fn general_category(self) -> GeneralCategory {
        if self.is_ascii() {
            return GeneralCategory::from_u32(u32::from(
                ASCII_TABLE[self.0 as usize] & ASCII_CATEGORY_MASK,
            ));
        }
        UnicodeTables::global().general_category(self)
    }

    #[must_use]
    pub fn line_break_class(self) -> LineBreakClass {
        UnicodeTables::global().line_break_class(self)
    }

    #[must_use]
    pub fn grapheme_cluster_class(self) -> GraphemeClusterClass {
        UnicodeTables::global().grapheme_cluster_class(self)
    }

    #[must_use]
    pub fn bidi_class(self) -> BidiClass {
        UnicodeTables::global().bidi_class(self)
    }

    const fn to_ascii_byte(self) -> u8 {
        self.0 as u8
    }
}

impl TryFrom<u32> for CodePoint {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        Self(c as u32)
    }
}

impl From<CodePoint> for u32 {
    fn from(cp: CodePoint) -> Self {
        cp.0
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}
