//! Writing, loading and validating classification table directories.

mod common;

use std::fs;

use tempfile::TempDir;
use tracing::info;
use unibidi::trie::CODE_POINT_COUNT;
use unibidi::{
    BidiCharacterType, CodePoint, Error, GeneralCategory, TableConfig, TableKind, UnicodeTables,
};

fn builtin() -> &'static UnicodeTables {
    UnicodeTables::global()
}

#[test]
fn save_and_load_directory_round_trip() {
    common::init_logging();
    let dir = TempDir::new().unwrap();
    builtin().save_to_dir(dir.path()).unwrap();

    for kind in TableKind::ALL {
        let path = dir.path().join(kind.file_name());
        let len = fs::metadata(&path).unwrap().len() as usize;
        info!(file = kind.file_name(), len, "wrote table");
        assert_eq!(len, builtin().trie(kind).size_in_bytes());
    }

    let loaded = UnicodeTables::load_from_dir(dir.path()).unwrap();
    assert_eq!(&loaded, builtin());
    for kind in TableKind::ALL {
        let (a, b) = (loaded.trie(kind), builtin().trie(kind));
        for point in (0..CODE_POINT_COUNT).step_by(97) {
            assert_eq!(a.get_u32(point), b.get_u32(point));
        }
    }
}

#[test]
fn loaded_tables_classify() {
    common::init_logging();
    let dir = TempDir::new().unwrap();
    builtin().save_to_dir(dir.path()).unwrap();
    let config = TableConfig {
        data_dir: Some(dir.path().to_path_buf()),
    };
    let tables = UnicodeTables::from_config(&config).unwrap();
    assert_eq!(
        tables.general_category(CodePoint::from('A')),
        GeneralCategory::UppercaseLetter
    );
    assert_eq!(
        tables.bidi_class(CodePoint::from('\u{5D0}')).character_type(),
        BidiCharacterType::R
    );
}

#[test]
fn missing_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    match UnicodeTables::load_from_dir(&missing) {
        Err(Error::InvalidTableDir(path)) => assert_eq!(path, missing),
        other => panic!("expected InvalidTableDir, got {other:?}"),
    }
}

#[test]
fn missing_blob_is_io_error() {
    let dir = TempDir::new().unwrap();
    builtin().save_to_dir(dir.path()).unwrap();
    fs::remove_file(dir.path().join(TableKind::LineBreak.file_name())).unwrap();
    assert!(matches!(
        UnicodeTables::load_from_dir(dir.path()),
        Err(Error::Io(_))
    ));
}

#[test]
fn corrupt_blob_is_rejected() {
    common::init_logging();
    let dir = TempDir::new().unwrap();
    builtin().save_to_dir(dir.path()).unwrap();
    let path = dir.path().join(TableKind::Bidi.file_name());

    // Truncated data array.
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();
    let err = UnicodeTables::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, Error::CorruptTrie { .. }), "{err}");

    // Bad magic.
    let mut bad = bytes.clone();
    bad[0] = b'X';
    fs::write(&path, &bad).unwrap();
    let err = UnicodeTables::load_from_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("magic"), "{err}");
}

#[test]
fn default_config_uses_compiled_tables() {
    let tables = UnicodeTables::from_config(&TableConfig::default()).unwrap();
    assert_eq!(&tables, builtin());
}
