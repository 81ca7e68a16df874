//! Resolved levels checked against the `unicode-bidi` reference resolver.

mod common;

use common::{ALEF, BIDI_ALPHABET, LRI, PDI};
use proptest::prelude::*;
use unibidi::{BidiData, BidiResolver};
use unicode_bidi::{BidiInfo, Level};

// ============================================================================
// Reference Comparison
// ============================================================================

/// Levels from `unicode-bidi`, one per code point, with L1 applied at each
/// paragraph end.
fn reference_levels(text: &str, base_level: Option<u8>) -> Vec<u8> {
    let default_level = base_level.and_then(|level| Level::new(level).ok());
    let info = BidiInfo::new(text, default_level);
    let mut out = Vec::with_capacity(text.len());
    for paragraph in &info.paragraphs {
        let levels = info.reordered_levels(paragraph, paragraph.range.clone());
        out.extend(
            text.char_indices()
                .filter(|(byte, _)| paragraph.range.contains(byte))
                .map(|(byte, _)| levels[byte].number()),
        );
    }
    out
}

/// Compare every position that survives X9.
fn assert_matches_reference(text: &str, base_level: Option<u8>) -> Result<(), TestCaseError> {
    let mut data = BidiData::new();
    data.init(text);
    let resolved = BidiResolver::new().resolve(&data, base_level);
    let expected = reference_levels(text, base_level);
    prop_assert_eq!(resolved.len(), expected.len());

    for (i, (&level, &want)) in resolved.levels().iter().zip(&expected).enumerate() {
        if data.types()[i].is_removed_by_x9() {
            continue;
        }
        prop_assert_eq!(
            level,
            want as i8,
            "text {:?} base {:?} at {}: {:?} vs {:?}",
            text,
            base_level,
            i,
            resolved.levels(),
            expected
        );
    }
    Ok(())
}

// ============================================================================
// Strategies
// ============================================================================

fn text_from(alphabet: Vec<char>) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(alphabet), 0..80)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Everything except isolate controls and the angle brackets.
fn without_isolates() -> Vec<char> {
    BIDI_ALPHABET
        .iter()
        .copied()
        .filter(|&c| !matches!(c, '\u{2066}'..='\u{2069}' | '\u{2329}' | '\u{3009}'))
        .collect()
}

/// Everything except paired brackets.
fn without_brackets() -> Vec<char> {
    BIDI_ALPHABET
        .iter()
        .copied()
        .filter(|&c| !matches!(c, '(' | ')' | '[' | ']' | '\u{2329}' | '\u{3009}'))
        .collect()
}

fn base_level() -> impl Strategy<Value = Option<u8>> {
    prop_oneof![Just(None), Just(Some(0)), Just(Some(1)), Just(Some(2))]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn brackets_and_embeddings_match_reference(
        text in text_from(without_isolates()),
        base in base_level(),
    ) {
        assert_matches_reference(&text, base)?;
    }

    #[test]
    fn isolates_and_embeddings_match_reference(
        text in text_from(without_brackets()),
        base in base_level(),
    ) {
        assert_matches_reference(&text, base)?;
    }
}

// ============================================================================
// Fixed Cases
// ============================================================================

#[test]
fn mixed_paragraphs_match_reference() {
    common::init_logging();
    for text in [
        "abc",
        "\u{5D0}\u{5D1} 12 abc",
        "a (\u{5D0}) b",
        "\u{5D0} [a] \u{5D1}\n\u{627}1.5 \u{661}",
        "x\u{202B}y\u{202C}z  ",
    ] {
        for base in [None, Some(0), Some(1)] {
            assert_matches_reference(text, base).unwrap();
        }
    }
}

/// A bracket pair in a sequence that skips over an isolate takes its
/// context from the strong type before the isolate initiator.
#[test]
fn bracket_context_spans_isolate() {
    let text = format!("{ALEF}a{LRI}a{PDI}({ALEF})");
    let mut data = BidiData::new();
    data.init(&text);
    let resolved = BidiResolver::new().resolve(&data, Some(0));
    // The pair encloses R, but the preceding strong type in its sequence is
    // the L before LRI, so N0 falls back to the embedding direction.
    assert_eq!(resolved.levels(), &[1, 0, 0, 2, 0, 0, 1, 0]);
}
