//! Error types for huffzip.
//!
//! Every fallible operation in the crate returns a [`HuffError`]. Nothing in the
//! library panics on bad input, so a failed compress or decompress leaves the
//! caller free to report the problem and carry on.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Debug, Error)]
pub enum HuffError {
    /// A path could not be opened, read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source looks already compressed, or lacks the container extension.
    #[error("refusing {}: {reason}", .path.display())]
    FormatRejected { path: PathBuf, reason: String },

    /// Truncated header, implausible declared sizes or a failed allocation.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The tree header or the payload ran out of bits mid-structure.
    #[error("tree structure error: {0}")]
    Structure(String),

    /// Table-driven decoding ended with bits that match no code.
    #[error("incomplete code: {remaining} trailing bit(s) match no symbol")]
    IncompleteCode { remaining: usize },

    /// A byte has no code in the tree.
    #[error("no code assigned to symbol {0:#04x}")]
    UnboundSymbol(u8),

    /// Bit access outside the logical length of a bit vector.
    #[error("bit index {index} out of range for length {len}")]
    Index { index: usize, len: usize },
}

impl HuffError {
    /// Attach a path to an I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        HuffError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn rejected<S: Into<String>>(path: &Path, reason: S) -> Self {
        HuffError::FormatRejected {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::HuffError;
    use std::path::Path;

    #[test]
    fn messages_test() {
        let e = HuffError::UnboundSymbol(0x41);
        assert_eq!(e.to_string(), "no code assigned to symbol 0x41");

        let e = HuffError::Index { index: 9, len: 3 };
        assert_eq!(e.to_string(), "bit index 9 out of range for length 3");

        let e = HuffError::rejected(Path::new("a.zip"), "already compressed");
        assert_eq!(e.to_string(), "refusing a.zip: already compressed");
    }

    #[test]
    fn io_source_test() {
        use std::error::Error;
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e = HuffError::io(Path::new("missing.txt"), inner);
        assert!(e.to_string().starts_with("I/O error on missing.txt"));
        assert!(e.source().is_some());
    }
}
