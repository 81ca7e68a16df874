//! `unicode_tables` - build, write and verify the classification trie blobs
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin unicode_tables
//! cargo run --bin unicode_tables -- --out data/
//! cargo run --bin unicode_tables -- --verify data/
//! ```
//!
//! A directory written with `--out` can be used at run time through the
//! `UNIBIDI_DATA_DIR` environment variable.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use unibidi::trie::CODE_POINT_COUNT;
use unibidi::{LogLevel, TableKind, UnicodeTables, set_log_callback, set_log_level};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "unicode_tables - Unicode classification trie tool

USAGE:
    unicode_tables [OPTIONS]

With no options, builds the tables and prints their sizes.

OPTIONS:
    -h, --help              Print this help message and exit
    --out <DIR>             Write the trie blobs into DIR
    --verify <DIR>          Load the blobs in DIR and compare them against
                            the compiled tables
    -v, --verbose           Log progress to stderr

EXAMPLES:
    unicode_tables --out data/
    unicode_tables --verify data/ --verbose
";

/// What the tool should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Stats,
    Write(PathBuf),
    Verify(PathBuf),
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    pub verbose: bool,
}

/// Result of CLI parsing.
pub enum ParseResult {
    Config(Config),
    Help,
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self {
            command: Command::Stats,
            verbose: false,
        };
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();

            match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,

                "-v" | "--verbose" => config.verbose = true,

                "--out" | "--verify" => {
                    let Some(value) = args.next() else {
                        return ParseResult::Error(format!("{arg_str} requires a directory"));
                    };
                    if config.command != Command::Stats {
                        return ParseResult::Error(
                            "--out and --verify are mutually exclusive".to_string(),
                        );
                    }
                    let dir = PathBuf::from(value);
                    config.command = if arg_str == "--out" {
                        Command::Write(dir)
                    } else {
                        Command::Verify(dir)
                    };
                }

                other => return ParseResult::Error(format!("Unknown option: {other}")),
            }
        }

        ParseResult::Config(config)
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => config,
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            return ExitCode::SUCCESS;
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            return ExitCode::FAILURE;
        }
    };

    if config.verbose {
        set_log_level(LogLevel::Debug);
        set_log_callback(|level, message| eprintln!("[{level:?}] {message}"));
    }

    let result = match &config.command {
        Command::Stats => {
            print_stats(&UnicodeTables::builtin());
            Ok(())
        }
        Command::Write(dir) => {
            let tables = UnicodeTables::builtin();
            tables.save_to_dir(dir).map(|()| {
                print_stats(&tables);
                println!("wrote {} tables to {}", TableKind::ALL.len(), dir.display());
            })
        }
        Command::Verify(dir) => UnicodeTables::load_from_dir(dir).and_then(|loaded| {
            let mismatches = verify(&loaded, &UnicodeTables::builtin());
            if mismatches > 0 {
                return Err(unibidi::Error::CorruptTrie {
                    reason: format!("{mismatches} code points differ from the compiled tables"),
                });
            }
            println!("{}: all tables match", dir.display());
            Ok(())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_stats(tables: &UnicodeTables) {
    for kind in TableKind::ALL {
        let trie = tables.trie(kind);
        println!(
            "{:<22} index {:>6}  data {:>7}  {:>8} bytes",
            kind.file_name(),
            trie.index_len(),
            trie.data_len(),
            trie.size_in_bytes()
        );
    }
    println!("{:<22} {:>38} bytes", "total", tables.size_in_bytes());
}

/// Count code points whose value differs in any table, reporting each
/// differing table once.
fn verify(loaded: &UnicodeTables, expected: &UnicodeTables) -> usize {
    let mut total = 0;
    for kind in TableKind::ALL {
        let (actual, wanted) = (loaded.trie(kind), expected.trie(kind));
        let mut first = None;
        let mut count = 0;
        for cp in 0..CODE_POINT_COUNT {
            if actual.get_u32(cp) != wanted.get_u32(cp) {
                first.get_or_insert(cp);
                count += 1;
            }
        }
        if let Some(cp) = first {
            eprintln!(
                "{}: {count} mismatches, first at U+{cp:04X}",
                kind.file_name()
            );
        }
        total += count;
    }
    total
}
