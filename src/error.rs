//! Error types for unibidi.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for unibidi operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for unibidi operations.
///
/// Malformed UTF-16 and UAX #9 overflow conditions are resolved in place and
/// never surface here.
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading or writing a serialized trie.
    Io(io::Error),
    /// Integer outside `[0, 0x10FFFF]` used as a code point.
    InvalidCodePoint(u32),
    /// Serialized trie data failed validation.
    CorruptTrie { reason: String },
    /// A configured table directory does not exist or is not a directory.
    InvalidTableDir(PathBuf),
}

impl Error {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptTrie {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidCodePoint(value) => {
                write!(f, "invalid code point: {value:#X} is outside [0, 0x10FFFF]")
            }
            Self::CorruptTrie { reason } => write!(f, "corrupt trie data: {reason}"),
            Self::InvalidTableDir(path) => {
                write!(f, "invalid table directory: {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCodePoint(0x11_0000);
        assert!(err.to_string().contains("0x110000"));

        let err = Error::corrupt("bad magic");
        assert_eq!(err.to_string(), "corrupt trie data: bad magic");

        let err = Error::InvalidTableDir(PathBuf::from("/nope"));
        assert!(err.to_string().contains("/nope"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
