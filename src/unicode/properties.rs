//! Typed property values stored in the classification tries.

/// Unicode General_Category, numbered as ICU numbers it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GeneralCategory {
    #[default]
    Unassigned = 0,
    UppercaseLetter = 1,
    LowercaseLetter = 2,
    TitlecaseLetter = 3,
    ModifierLetter = 4,
    OtherLetter = 5,
    NonspacingMark = 6,
    EnclosingMark = 7,
    SpacingMark = 8,
    DecimalNumber = 9,
    LetterNumber = 10,
    OtherNumber = 11,
    SpaceSeparator = 12,
    LineSeparator = 13,
    ParagraphSeparator = 14,
    Control = 15,
    Format = 16,
    PrivateUse = 17,
    Surrogate = 18,
    DashPunctuation = 19,
    OpenPunctuation = 20,
    ClosePunctuation = 21,
    ConnectorPunctuation = 22,
    OtherPunctuation = 23,
    MathSymbol = 24,
    CurrencySymbol = 25,
    ModifierSymbol = 26,
    OtherSymbol = 27,
    InitialPunctuation = 28,
    FinalPunctuation = 29,
}

impl GeneralCategory {
    const ALL: [Self; 30] = [
        Self::Unassigned,
        Self::UppercaseLetter,
        Self::LowercaseLetter,
        Self::TitlecaseLetter,
        Self::ModifierLetter,
        Self::OtherLetter,
        Self::NonspacingMark,
        Self::EnclosingMark,
        Self::SpacingMark,
        Self::DecimalNumber,
        Self::LetterNumber,
        Self::OtherNumber,
        Self::SpaceSeparator,
        Self::LineSeparator,
        Self::ParagraphSeparator,
        Self::Control,
        Self::Format,
        Self::PrivateUse,
        Self::Surrogate,
        Self::DashPunctuation,
        Self::OpenPunctuation,
        Self::ClosePunctuation,
        Self::ConnectorPunctuation,
        Self::OtherPunctuation,
        Self::MathSymbol,
        Self::CurrencySymbol,
        Self::ModifierSymbol,
        Self::OtherSymbol,
        Self::InitialPunctuation,
        Self::FinalPunctuation,
    ];

    /// Decode a stored table value; unknown values map to `Unassigned`.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        if (value as usize) < Self::ALL.len() {
            Self::ALL[value as usize]
        } else {
            Self::Unassigned
        }
    }

    #[must_use]
    pub const fn is_letter(self) -> bool {
        matches!(
            self,
            Self::UppercaseLetter
                | Self::LowercaseLetter
                | Self::TitlecaseLetter
                | Self::ModifierLetter
                | Self::OtherLetter
        )
    }

    #[must_use]
    pub const fn is_mark(self) -> bool {
        matches!(
            self,
            Self::NonspacingMark | Self::EnclosingMark | Self::SpacingMark
        )
    }

    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(
            self,
            Self::DecimalNumber | Self::LetterNumber | Self::OtherNumber
        )
    }

    #[must_use]
    pub const fn is_punctuation(self) -> bool {
        matches!(
            self,
            Self::DashPunctuation
                | Self::OpenPunctuation
                | Self::ClosePunctuation
                | Self::ConnectorPunctuation
                | Self::OtherPunctuation
                | Self::InitialPunctuation
                | Self::FinalPunctuation
        )
    }

    #[must_use]
    pub const fn is_symbol(self) -> bool {
        matches!(
            self,
            Self::MathSymbol | Self::CurrencySymbol | Self::ModifierSymbol | Self::OtherSymbol
        )
    }

    #[must_use]
    pub const fn is_separator(self) -> bool {
        matches!(
            self,
            Self::SpaceSeparator | Self::LineSeparator | Self::ParagraphSeparator
        )
    }
}

/// UAX #14 line breaking class, numbered as ICU numbers it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LineBreakClass {
    #[default]
    Unknown = 0,
    Ambiguous = 1,
    Alphabetic = 2,
    BreakBoth = 3,
    BreakAfter = 4,
    BreakBefore = 5,
    MandatoryBreak = 6,
    ContingentBreak = 7,
    ClosePunctuation = 8,
    CombiningMark = 9,
    CarriageReturn = 10,
    Exclamation = 11,
    Glue = 12,
    Hyphen = 13,
    Ideographic = 14,
    Inseparable = 15,
    InfixNumeric = 16,
    LineFeed = 17,
    Nonstarter = 18,
    Numeric = 19,
    OpenPunctuation = 20,
    PostfixNumeric = 21,
    PrefixNumeric = 22,
    Quotation = 23,
    ComplexContext = 24,
    Surrogate = 25,
    Space = 26,
    BreakSymbols = 27,
    ZwSpace = 28,
    NextLine = 29,
    WordJoiner = 30,
    H2 = 31,
    H3 = 32,
    Jl = 33,
    Jt = 34,
    Jv = 35,
    CloseParenthesis = 36,
    ConditionalJapaneseStarter = 37,
    HebrewLetter = 38,
    RegionalIndicator = 39,
    EBase = 40,
    EModifier = 41,
    Zwj = 42,
    Aksara = 43,
    AksaraPrebase = 44,
    AksaraStart = 45,
    ViramaFinal = 46,
    Virama = 47,
}

impl LineBreakClass {
    const ALL: [Self; 48] = [
        Self::Unknown,
        Self::Ambiguous,
        Self::Alphabetic,
        Self::BreakBoth,
        Self::BreakAfter,
        Self::BreakBefore,
        Self::MandatoryBreak,
        Self::ContingentBreak,
        Self::ClosePunctuation,
        Self::CombiningMark,
        Self::CarriageReturn,
        Self::Exclamation,
        Self::Glue,
        Self::Hyphen,
        Self::Ideographic,
        Self::Inseparable,
        Self::InfixNumeric,
        Self::LineFeed,
        Self::Nonstarter,
        Self::Numeric,
        Self::OpenPunctuation,
        Self::PostfixNumeric,
        Self::PrefixNumeric,
        Self::Quotation,
        Self::ComplexContext,
        Self::Surrogate,
        Self::Space,
        Self::BreakSymbols,
        Self::ZwSpace,
        Self::NextLine,
        Self::WordJoiner,
        Self::H2,
        Self::H3,
        Self::Jl,
        Self::Jt,
        Self::Jv,
        Self::CloseParenthesis,
        Self::ConditionalJapaneseStarter,
        Self::HebrewLetter,
        Self::RegionalIndicator,
        Self::EBase,
        Self::EModifier,
        Self::Zwj,
        Self::Aksara,
        Self::AksaraPrebase,
        Self::AksaraStart,
        Self::ViramaFinal,
        Self::Virama,
    ];

    /// Decode a stored table value; unknown values map to `Unknown`.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        if (value as usize) < Self::ALL.len() {
            Self::ALL[value as usize]
        } else {
            Self::Unknown
        }
    }

    /// Classes that force a line break after the character (LB4, LB5).
    #[must_use]
    pub const fn is_mandatory_break(self) -> bool {
        matches!(
            self,
            Self::MandatoryBreak | Self::CarriageReturn | Self::LineFeed | Self::NextLine
        )
    }
}

/// UAX #29 grapheme cluster break class.
///
/// `ExtendedPictographic` is layered over `Other`: a code point carries it only
/// when its Grapheme_Cluster_Break value is `Other`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GraphemeClusterClass {
    #[default]
    Other = 0,
    Control = 1,
    Cr = 2,
    Extend = 3,
    L = 4,
    Lf = 5,
    Lv = 6,
    Lvt = 7,
    T = 8,
    V = 9,
    SpacingMark = 10,
    Prepend = 11,
    RegionalIndicator = 12,
    EBase = 13,
    EBaseGaz = 14,
    EModifier = 15,
    GlueAfterZwj = 16,
    Zwj = 17,
    ExtendedPictographic = 18,
}

impl GraphemeClusterClass {
    const ALL: [Self; 19] = [
        Self::Other,
        Self::Control,
        Self::Cr,
        Self::Extend,
        Self::L,
        Self::Lf,
        Self::Lv,
        Self::Lvt,
        Self::T,
        Self::V,
        Self::SpacingMark,
        Self::Prepend,
        Self::RegionalIndicator,
        Self::EBase,
        Self::EBaseGaz,
        Self::EModifier,
        Self::GlueAfterZwj,
        Self::Zwj,
        Self::ExtendedPictographic,
    ];

    /// Decode a stored table value; unknown values map to `Other`.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        if (value as usize) < Self::ALL.len() {
            Self::ALL[value as usize]
        } else {
            Self::Other
        }
    }
}

/// UAX #9 bidirectional character type.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BidiCharacterType {
    /// Left-to-right.
    #[default]
    L = 0,
    /// Right-to-left.
    R = 1,
    /// Arabic letter.
    AL = 2,
    /// European number.
    EN = 3,
    /// European separator.
    ES = 4,
    /// European number terminator.
    ET = 5,
    /// Arabic number.
    AN = 6,
    /// Common number separator.
    CS = 7,
    /// Nonspacing mark.
    NSM = 8,
    /// Boundary neutral.
    BN = 9,
    /// Paragraph separator.
    B = 10,
    /// Segment separator.
    S = 11,
    /// Whitespace.
    WS = 12,
    /// Other neutral.
    ON = 13,
    /// Left-to-right embedding.
    LRE = 14,
    /// Left-to-right override.
    LRO = 15,
    /// Right-to-left embedding.
    RLE = 16,
    /// Right-to-left override.
    RLO = 17,
    /// Pop directional format.
    PDF = 18,
    /// Left-to-right isolate.
    LRI = 19,
    /// Right-to-left isolate.
    RLI = 20,
    /// First strong isolate.
    FSI = 21,
    /// Pop directional isolate.
    PDI = 22,
}

impl BidiCharacterType {
    const ALL: [Self; 23] = [
        Self::L,
        Self::R,
        Self::AL,
        Self::EN,
        Self::ES,
        Self::ET,
        Self::AN,
        Self::CS,
        Self::NSM,
        Self::BN,
        Self::B,
        Self::S,
        Self::WS,
        Self::ON,
        Self::LRE,
        Self::LRO,
        Self::RLE,
        Self::RLO,
        Self::PDF,
        Self::LRI,
        Self::RLI,
        Self::FSI,
        Self::PDI,
    ];

    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        if (value as usize) < Self::ALL.len() {
            Self::ALL[value as usize]
        } else {
            Self::L
        }
    }

    /// L, R or AL.
    #[must_use]
    pub const fn is_strong(self) -> bool {
        matches!(self, Self::L | Self::R | Self::AL)
    }

    /// LRE, LRO, RLE, RLO or PDF.
    #[must_use]
    pub const fn is_embedding_or_override(self) -> bool {
        matches!(self, Self::LRE | Self::LRO | Self::RLE | Self::RLO | Self::PDF)
    }

    /// LRI, RLI or FSI.
    #[must_use]
    pub const fn is_isolate_initiator(self) -> bool {
        matches!(self, Self::LRI | Self::RLI | Self::FSI)
    }

    /// LRI, RLI, FSI or PDI.
    #[must_use]
    pub const fn is_isolate_control(self) -> bool {
        matches!(self, Self::LRI | Self::RLI | Self::FSI | Self::PDI)
    }

    /// Types that X9 removes from further processing.
    #[must_use]
    pub const fn is_removed_by_x9(self) -> bool {
        matches!(
            self,
            Self::LRE | Self::LRO | Self::RLE | Self::RLO | Self::PDF | Self::BN
        )
    }

    /// Neutral and isolate formatting types (NI in UAX #9).
    #[must_use]
    pub const fn is_neutral_or_isolate(self) -> bool {
        matches!(
            self,
            Self::B
                | Self::S
                | Self::WS
                | Self::ON
                | Self::LRI
                | Self::RLI
                | Self::FSI
                | Self::PDI
        )
    }
}

/// Bidi_Paired_Bracket_Type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BidiPairedBracketType {
    #[default]
    None = 0,
    Open = 1,
    Close = 2,
}

impl BidiPairedBracketType {
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        match value {
            1 => Self::Open,
            2 => Self::Close,
            _ => Self::None,
        }
    }
}

/// Packed bidi classification of one code point.
///
/// Bits 0-4 hold the [`BidiCharacterType`], bits 5-6 the
/// [`BidiPairedBracketType`], and bits 8-28 the Bidi_Paired_Bracket code
/// point (the partner bracket).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BidiClass(u32);

impl BidiClass {
    const TYPE_MASK: u32 = 0x1F;
    const BRACKET_TYPE_SHIFT: u32 = 5;
    const BRACKET_TYPE_MASK: u32 = 0x3;
    const BRACKET_SHIFT: u32 = 8;
    const BRACKET_MASK: u32 = 0x1F_FFFF;

    #[must_use]
    pub const fn new(
        character_type: BidiCharacterType,
        bracket_type: BidiPairedBracketType,
        paired_bracket: u32,
    ) -> Self {
        Self(
            (character_type as u32)
                | ((bracket_type as u32) << Self::BRACKET_TYPE_SHIFT)
                | ((paired_bracket & Self::BRACKET_MASK) << Self::BRACKET_SHIFT),
        )
    }

    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Raw packed value as stored in the trie.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn character_type(self) -> BidiCharacterType {
        BidiCharacterType::from_u32(self.0 & Self::TYPE_MASK)
    }

    #[must_use]
    pub const fn paired_bracket_type(self) -> BidiPairedBracketType {
        BidiPairedBracketType::from_u32((self.0 >> Self::BRACKET_TYPE_SHIFT) & Self::BRACKET_TYPE_MASK)
    }

    /// The partner bracket code point, or 0 for non-brackets.
    #[must_use]
    pub const fn paired_bracket(self) -> u32 {
        (self.0 >> Self::BRACKET_SHIFT) & Self::BRACKET_MASK
    }
}
