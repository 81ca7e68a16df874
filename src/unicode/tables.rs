//! Process-wide classification tables.
//!
//! Four frozen tries answer every classification query:
//!
//! | table              | value                                       |
//! |--------------------|---------------------------------------------|
//! | general category   | [`GeneralCategory`] discriminant            |
//! | line break         | [`LineBreakClass`] discriminant             |
//! | grapheme cluster   | [`GraphemeClusterClass`] discriminant       |
//! | bidi               | packed [`BidiClass`]                        |
//!
//! The tables are built once from compiled Unicode data, or loaded from a
//! directory of serialized blobs when [`TableConfig::data_dir`] is set
//! (for example through the `UNIBIDI_DATA_DIR` environment variable).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use icu_properties::props::{
    ExtendedPictographic, GeneralCategory as IcuGeneralCategory, GraphemeClusterBreak, LineBreak,
};
use icu_properties::{CodePointMapData, CodePointSetData};
use unicode_bidi::data_source::BidiDataSource;
use unicode_bidi::{BidiClass as UbaClass, HardcodedBidiData};

use super::codepoint::CodePoint;
use super::properties::{
    BidiCharacterType, BidiClass, BidiPairedBracketType, GeneralCategory, GraphemeClusterClass,
    LineBreakClass,
};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log, log_enabled};
use crate::trie::{CODE_POINT_COUNT, CodePointTrie, TrieBuilder};

/// Environment variable naming a directory of serialized tables.
pub const DATA_DIR_ENV: &str = "UNIBIDI_DATA_DIR";

/// Where the process-wide tables come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableConfig {
    /// Directory holding the four `.trie` blobs. `None` builds the tables from
    /// compiled Unicode data.
    pub data_dir: Option<PathBuf>,
}

impl TableConfig {
    /// Read the configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { data_dir }
    }
}

/// The four classification tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    GeneralCategory,
    LineBreak,
    GraphemeCluster,
    Bidi,
}

impl TableKind {
    pub const ALL: [Self; 4] = [
        Self::GeneralCategory,
        Self::LineBreak,
        Self::GraphemeCluster,
        Self::Bidi,
    ];

    /// File name of this table inside a data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::GeneralCategory => "general_category.trie",
            Self::LineBreak => "line_break.trie",
            Self::GraphemeCluster => "grapheme_cluster.trie",
            Self::Bidi => "bidi.trie",
        }
    }

    /// Build this table from compiled Unicode data.
    #[must_use]
    pub fn build(self) -> CodePointTrie {
        match self {
            Self::GeneralCategory => build_general_category(),
            Self::LineBreak => build_line_break(),
            Self::GraphemeCluster => build_grapheme_cluster(),
            Self::Bidi => build_bidi(),
        }
    }
}

/// Frozen classification tries, shared read-only by every caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnicodeTables {
    general_category: CodePointTrie,
    line_break: CodePointTrie,
    grapheme_cluster: CodePointTrie,
    bidi: CodePointTrie,
}

static GLOBAL: OnceLock<UnicodeTables> = OnceLock::new();

impl UnicodeTables {
    /// The process-wide tables, initialized on first use from
    /// [`TableConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics if a configured data directory holds missing or corrupt blobs.
    /// Classification is a prerequisite for all processing, so a broken data
    /// asset is fatal.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            let config = TableConfig::from_env();
            match Self::from_config(&config) {
                Ok(tables) => tables,
                Err(err) => {
                    emit_log(
                        LogLevel::Error,
                        &format!("failed to load Unicode tables: {err}"),
                    );
                    panic!("failed to load Unicode tables: {err}");
                }
            }
        })
    }

    /// Install `tables` as the process-wide tables.
    ///
    /// Fails, handing the tables back, if the global tables were already
    /// initialized.
    pub fn install(tables: Self) -> std::result::Result<(), Self> {
        GLOBAL.set(tables)
    }

    /// Load or build tables according to `config`.
    pub fn from_config(config: &TableConfig) -> Result<Self> {
        match &config.data_dir {
            Some(dir) => Self::load_from_dir(dir),
            None => Ok(Self::builtin()),
        }
    }

    /// Build all tables from compiled Unicode data.
    #[must_use]
    pub fn builtin() -> Self {
        let start = Instant::now();
        let tables = Self {
            general_category: TableKind::GeneralCategory.build(),
            line_break: TableKind::LineBreak.build(),
            grapheme_cluster: TableKind::GraphemeCluster.build(),
            bidi: TableKind::Bidi.build(),
        };
        if log_enabled(LogLevel::Info) {
            emit_log(
                LogLevel::Info,
                &format!(
                    "built Unicode tables in {} ms ({} bytes)",
                    start.elapsed().as_millis(),
                    tables.size_in_bytes()
                ),
            );
        }
        tables
    }

    /// Load the four blobs from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::InvalidTableDir(dir.to_path_buf()));
        }
        let load = |kind: TableKind| -> Result<CodePointTrie> {
            let path = dir.join(kind.file_name());
            let trie = File::open(&path)
                .map_err(Error::from)
                .and_then(|file| CodePointTrie::load(BufReader::new(file)))
                .inspect_err(|err| {
                    emit_log(
                        LogLevel::Warn,
                        &format!("rejected {}: {err}", path.display()),
                    );
                })?;
            emit_log(
                LogLevel::Debug,
                &format!("loaded {} ({} bytes)", path.display(), trie.size_in_bytes()),
            );
            Ok(trie)
        };
        let tables = Self {
            general_category: load(TableKind::GeneralCategory)?,
            line_break: load(TableKind::LineBreak)?,
            grapheme_cluster: load(TableKind::GraphemeCluster)?,
            bidi: load(TableKind::Bidi)?,
        };
        emit_log(
            LogLevel::Info,
            &format!("loaded Unicode tables from {}", dir.display()),
        );
        Ok(tables)
    }

    /// Write the four blobs into `dir`, creating it if needed.
    pub fn save_to_dir(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        for kind in TableKind::ALL {
            let path = dir.join(kind.file_name());
            self.trie(kind).save(BufWriter::new(File::create(&path)?))?;
            emit_log(LogLevel::Debug, &format!("wrote {}", path.display()));
        }
        Ok(())
    }

    #[must_use]
    pub fn trie(&self, kind: TableKind) -> &CodePointTrie {
        match kind {
            TableKind::GeneralCategory => &self.general_category,
            TableKind::LineBreak => &self.line_break,
            TableKind::GraphemeCluster => &self.grapheme_cluster,
            TableKind::Bidi => &self.bidi,
        }
    }

    /// Combined serialized size of all tables.
    #[must_use]
    pub fn size_in_bytes(&self) -> usize {
        TableKind::ALL
            .iter()
            .map(|&kind| self.trie(kind).size_in_bytes())
            .sum()
    }

    #[must_use]
    pub fn general_category(&self, cp: CodePoint) -> GeneralCategory {
        GeneralCategory::from_u32(self.general_category.get(cp))
    }

    #[must_use]
    pub fn line_break_class(&self, cp: CodePoint) -> LineBreakClass {
        LineBreakClass::from_u32(self.line_break.get(cp))
    }

    #[must_use]
    pub fn grapheme_cluster_class(&self, cp: CodePoint) -> GraphemeClusterClass {
        GraphemeClusterClass::from_u32(self.grapheme_cluster.get(cp))
    }

    #[must_use]
    pub fn bidi_class(&self, cp: CodePoint) -> BidiClass {
        BidiClass::from_u32(self.bidi.get(cp))
    }
}

/// Feed `value_of` for every code point into a builder, one `set_range` per
/// run of equal values.
fn builder_from_runs(default_value: u32, value_of: impl Fn(u32) -> u32) -> TrieBuilder {
    let mut builder = TrieBuilder::new(default_value);
    let mut run_start = 0;
    let mut run_value = value_of(0);
    for cp in 1..CODE_POINT_COUNT {
        let value = value_of(cp);
        if value != run_value {
            if run_value != default_value {
                builder.set_range(
                    CodePoint::new_unchecked(run_start),
                    CodePoint::new_unchecked(cp - 1),
                    run_value,
                    true,
                );
            }
            run_start = cp;
            run_value = value;
        }
    }
    if run_value != default_value {
        builder.set_range(
            CodePoint::new_unchecked(run_start),
            CodePoint::new_unchecked(CODE_POINT_COUNT - 1),
            run_value,
            true,
        );
    }
    builder
}

fn build_general_category() -> CodePointTrie {
    let map = CodePointMapData::<IcuGeneralCategory>::new();
    builder_from_runs(GeneralCategory::Unassigned as u32, |cp| {
        map.get32(cp) as u32
    })
    .freeze()
}

fn build_line_break() -> CodePointTrie {
    let map = CodePointMapData::<LineBreak>::new();
    builder_from_runs(LineBreakClass::Unknown as u32, |cp| {
        u32::from(map.get32(cp).to_icu4c_value())
    })
    .freeze()
}

fn build_grapheme_cluster() -> CodePointTrie {
    let map = CodePointMapData::<GraphemeClusterBreak>::new();
    let mut builder = builder_from_runs(GraphemeClusterClass::Other as u32, |cp| {
        u32::from(map.get32(cp).to_icu4c_value())
    });

    // Extended_Pictographic only claims code points without an explicit
    // Grapheme_Cluster_Break value.
    let pictographic = CodePointSetData::new::<ExtendedPictographic>();
    let mut run: Option<(u32, u32)> = None;
    for cp in 0..CODE_POINT_COUNT {
        if pictographic.contains32(cp) {
            run = Some(run.map_or((cp, cp), |(start, _)| (start, cp)));
        } else if let Some((start, end)) = run.take() {
            builder.set_range(
                CodePoint::new_unchecked(start),
                CodePoint::new_unchecked(end),
                GraphemeClusterClass::ExtendedPictographic as u32,
                false,
            );
        }
    }
    if let Some((start, end)) = run {
        builder.set_range(
            CodePoint::new_unchecked(start),
            CodePoint::new_unchecked(end),
            GraphemeClusterClass::ExtendedPictographic as u32,
            false,
        );
    }
    builder.freeze()
}

#[allow(unreachable_patterns)]
fn character_type_of(class: UbaClass) -> BidiCharacterType {
    match class {
        UbaClass::L => BidiCharacterType::L,
        UbaClass::R => BidiCharacterType::R,
        UbaClass::AL => BidiCharacterType::AL,
        UbaClass::EN => BidiCharacterType::EN,
        UbaClass::ES => BidiCharacterType::ES,
        UbaClass::ET => BidiCharacterType::ET,
        UbaClass::AN => BidiCharacterType::AN,
        UbaClass::CS => BidiCharacterType::CS,
        UbaClass::NSM => BidiCharacterType::NSM,
        UbaClass::BN => BidiCharacterType::BN,
        UbaClass::B => BidiCharacterType::B,
        UbaClass::S => BidiCharacterType::S,
        UbaClass::WS => BidiCharacterType::WS,
        UbaClass::ON => BidiCharacterType::ON,
        UbaClass::LRE => BidiCharacterType::LRE,
        UbaClass::LRO => BidiCharacterType::LRO,
        UbaClass::RLE => BidiCharacterType::RLE,
        UbaClass::RLO => BidiCharacterType::RLO,
        UbaClass::PDF => BidiCharacterType::PDF,
        UbaClass::LRI => BidiCharacterType::LRI,
        UbaClass::RLI => BidiCharacterType::RLI,
        UbaClass::FSI => BidiCharacterType::FSI,
        UbaClass::PDI => BidiCharacterType::PDI,
        _ => BidiCharacterType::L,
    }
}

fn build_bidi() -> CodePointTrie {
    let source = HardcodedBidiData;
    let type_of = |cp: u32| {
        char::from_u32(cp).map_or(BidiCharacterType::L, |c| {
            character_type_of(source.bidi_class(c))
        })
    };
    let mut builder = builder_from_runs(BidiCharacterType::L as u32, |cp| type_of(cp) as u32);

    // Every paired bracket is ON. The data source reports each bracket's
    // opening partner; closing partners are recovered by inverting that map.
    // Canonically equivalent pairs share an opening, so an opener prefers
    // the closer at the next code point.
    let mut brackets = Vec::new();
    let mut closing_for_opening: HashMap<char, Vec<char>> = HashMap::new();
    for cp in 0..CODE_POINT_COUNT {
        if builder.get(CodePoint::new_unchecked(cp)) != BidiCharacterType::ON as u32 {
            continue;
        }
        let Some(c) = char::from_u32(cp) else {
            continue;
        };
        if let Some(bracket) = source.bidi_matched_opening_bracket(c) {
            if !bracket.is_open {
                closing_for_opening.entry(bracket.opening).or_default().push(c);
            }
            brackets.push((c, bracket.opening, bracket.is_open));
        }
    }

    for (c, opening, is_open) in brackets {
        let (bracket_type, partner) = if is_open {
            let Some(candidates) = closing_for_opening.get(&opening) else {
                continue;
            };
            let next = char::from_u32(u32::from(c) + 1);
            let closing = candidates
                .iter()
                .copied()
                .find(|&close| Some(close) == next)
                .unwrap_or(candidates[0]);
            (BidiPairedBracketType::Open, closing)
        } else {
            (BidiPairedBracketType::Close, opening)
        };
        let class = BidiClass::new(BidiCharacterType::ON, bracket_type, partner as u32);
        builder.set(CodePoint::from(c), class.value());
    }
    builder.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static UnicodeTables {
        UnicodeTables::global()
    }

    #[test]
    fn test_general_category_lookups() {
        let t = tables();
        assert_eq!(
            t.general_category(CodePoint::from('A')),
            GeneralCategory::UppercaseLetter
        );
        assert_eq!(
            t.general_category(CodePoint::from('中')),
            GeneralCategory::OtherLetter
        );
        assert_eq!(
            t.general_category(CodePoint::from('\u{0301}')),
            GeneralCategory::NonspacingMark
        );
        assert_eq!(
            t.general_category(CodePoint::from('\u{2028}')),
            GeneralCategory::LineSeparator
        );
        assert_eq!(
            t.general_category(CodePoint::from('\u{E000}')),
            GeneralCategory::PrivateUse
        );
        assert_eq!(
            t.general_category(CodePoint::new(0x10_FFFD).unwrap()),
            GeneralCategory::PrivateUse
        );
        assert_eq!(
            t.general_category(CodePoint::new(0x10_FFFF).unwrap()),
            GeneralCategory::Unassigned
        );
    }

    #[test]
    fn test_line_break_lookups() {
        let t = tables();
        assert_eq!(
            t.line_break_class(CodePoint::from('\n')),
            LineBreakClass::LineFeed
        );
        assert_eq!(
            t.line_break_class(CodePoint::from(' ')),
            LineBreakClass::Space
        );
        assert_eq!(
            t.line_break_class(CodePoint::from('(')),
            LineBreakClass::OpenPunctuation
        );
        assert_eq!(
            t.line_break_class(CodePoint::from('5')),
            LineBreakClass::Numeric
        );
    }

    #[test]
    fn test_grapheme_cluster_lookups() {
        let t = tables();
        assert_eq!(
            t.grapheme_cluster_class(CodePoint::from('\r')),
            GraphemeClusterClass::Cr
        );
        assert_eq!(
            t.grapheme_cluster_class(CodePoint::from('\u{200D}')),
            GraphemeClusterClass::Zwj
        );
        assert_eq!(
            t.grapheme_cluster_class(CodePoint::from('\u{0301}')),
            GraphemeClusterClass::Extend
        );
        assert_eq!(
            t.grapheme_cluster_class(CodePoint::from('😀')),
            GraphemeClusterClass::ExtendedPictographic
        );
        assert_eq!(
            t.grapheme_cluster_class(CodePoint::from('a')),
            GraphemeClusterClass::Other
        );
    }

    #[test]
    fn test_bidi_lookups() {
        let t = tables();
        let ty = |c: char| t.bidi_class(CodePoint::from(c)).character_type();
        assert_eq!(ty('a'), BidiCharacterType::L);
        assert_eq!(ty('א'), BidiCharacterType::R);
        assert_eq!(ty('ب'), BidiCharacterType::AL);
        assert_eq!(ty('1'), BidiCharacterType::EN);
        assert_eq!(ty('\u{0661}'), BidiCharacterType::AN);
        assert_eq!(ty(' '), BidiCharacterType::WS);
        assert_eq!(ty('\u{2029}'), BidiCharacterType::B);
        assert_eq!(ty('\u{2067}'), BidiCharacterType::RLI);
        assert_eq!(ty('\u{2069}'), BidiCharacterType::PDI);
    }

    #[test]
    fn test_bidi_bracket_data() {
        let t = tables();
        let open = t.bidi_class(CodePoint::from('('));
        assert_eq!(open.paired_bracket_type(), BidiPairedBracketType::Open);
        assert_eq!(open.paired_bracket(), u32::from(')'));

        let close = t.bidi_class(CodePoint::from(']'));
        assert_eq!(close.paired_bracket_type(), BidiPairedBracketType::Close);
        assert_eq!(close.paired_bracket(), u32::from('['));

        let plain = t.bidi_class(CodePoint::from('!'));
        assert_eq!(plain.paired_bracket_type(), BidiPairedBracketType::None);
    }

    #[test]
    fn test_bidi_brackets_match_data_source() {
        let t = tables();
        let source = HardcodedBidiData;
        for cp in 0..0x1_0000 {
            let Some(c) = char::from_u32(cp) else {
                continue;
            };
            let class = t.bidi_class(CodePoint::from(c));
            let expected = match source.bidi_matched_opening_bracket(c) {
                Some(bracket) if bracket.is_open => BidiPairedBracketType::Open,
                Some(_) => BidiPairedBracketType::Close,
                None => BidiPairedBracketType::None,
            };
            assert_eq!(class.paired_bracket_type(), expected, "U+{cp:04X}");
            if expected != BidiPairedBracketType::None {
                assert_eq!(class.character_type(), BidiCharacterType::ON, "U+{cp:04X}");
            }
        }
    }

    #[test]
    fn test_config_default_has_no_dir() {
        assert_eq!(TableConfig::default().data_dir, None);
    }

    #[test]
    fn test_load_from_missing_dir_fails() {
        let err = UnicodeTables::load_from_dir(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, Error::InvalidTableDir(_)));
    }

    #[test]
    fn test_file_names_are_distinct() {
        let mut names: Vec<_> = TableKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
