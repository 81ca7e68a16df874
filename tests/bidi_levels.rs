//! Hand-checked UAX #9 scenarios through the public entry points.

mod common;

use common::{ALEF, BET, LRI, PDF, PDI, RLE, RLI};
use unibidi::{BidiData, BidiResolver, Direction, resolve_levels};

fn levels(text: &str) -> Vec<i8> {
    resolve_levels(text, None).levels().to_vec()
}

#[test]
fn latin_only() {
    common::init_logging();
    assert_eq!(levels("abc"), [0, 0, 0]);
}

#[test]
fn european_digits_after_hebrew_rise() {
    // R WS EN EN: the space sits between R and a number.
    let text = format!("{ALEF} 12");
    assert_eq!(levels(&text), [1, 1, 2, 2]);
}

#[test]
fn neutral_between_directions_takes_embedding() {
    let text = format!("a 1 {ALEF}");
    assert_eq!(levels(&text), [0, 0, 0, 0, 1]);
}

#[test]
fn arabic_digits_alone() {
    let resolved = resolve_levels("\u{661}\u{662}", None);
    assert_eq!(resolved.base_direction(), Direction::Ltr);
    assert_eq!(resolved.levels(), &[2, 2]);
}

#[test]
fn ltr_isolate_in_rtl_paragraph() {
    let text = format!("{ALEF}{LRI}ab{PDI}");
    assert_eq!(levels(&text), [1, 1, 2, 2, 1]);
}

#[test]
fn rtl_isolate_hides_its_content_from_paragraph_detection() {
    // The only strong character is isolated, so the paragraph is LTR.
    let text = format!("{RLI}{ALEF}{PDI}");
    let resolved = resolve_levels(&text, None);
    assert_eq!(resolved.paragraph_level(), 0);
    assert_eq!(resolved.levels(), &[0, 1, 0]);
}

#[test]
fn bracket_pair_follows_embedding_direction() {
    let text = format!("a(b){ALEF}");
    assert_eq!(levels(&text), [0, 0, 0, 0, 1]);
}

#[test]
fn embedding_codes_are_removed() {
    let text = format!("a{RLE}b{PDF}c");
    let resolved = resolve_levels(&text, None);
    assert_eq!(resolved.levels(), &[0, -1, 2, -1, 0]);
    assert_eq!(resolved.filled_levels(), vec![0, 0, 2, 2, 0]);
}

#[test]
fn paragraph_separator_splits() {
    let text = format!("{ALEF}{BET}\u{2029}ab");
    let resolved = resolve_levels(&text, None);
    let paragraphs = resolved.paragraphs();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].range, 0..3);
    assert_eq!(paragraphs[0].direction(), Direction::Rtl);
    assert_eq!(paragraphs[1].range, 3..5);
    assert_eq!(paragraphs[1].direction(), Direction::Ltr);
    assert_eq!(resolved.levels(), &[1, 1, 1, 0, 0]);
    assert_eq!(resolved.visual_order(), vec![2, 1, 0, 3, 4]);
}

#[test]
fn forced_rtl_base_level() {
    let resolved = resolve_levels("ab", Some(1));
    assert_eq!(resolved.levels(), &[2, 2]);
    assert_eq!(resolved.visual_order(), vec![0, 1]);
    let runs = resolved.visual_runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].level, 2);
}

#[test]
fn utf16_input_resolves_by_code_point() {
    // A supplementary character is one code point, two units.
    let units: Vec<u16> = format!("{ALEF}\u{1F600}b").encode_utf16().collect();
    let mut data = BidiData::new();
    data.init_utf16(&units);
    assert_eq!(data.len(), 3);
    let resolved = BidiResolver::new().resolve(&data, None);
    assert_eq!(resolved.len(), 3);
    assert_eq!(resolved.paragraph_level(), 1);
}
