//! Error types for huffpack operations.
//!
//! Every failure of the bit layer, the container parser and the decode loop
//! is reported through [`HuffpackError`]. The variants follow the order in
//! which a container is processed: acquiring the source, validating the
//! framing, parsing the tree, then walking the message bits.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for huffpack operations.
#[derive(Debug, Error)]
pub enum HuffpackError {
    /// I/O error from an already opened reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source path is missing or unreadable.
    #[error("Cannot read source {}: {source}", path.display())]
    SourceUnavailable {
        /// The path that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Destination path cannot be created or committed.
    #[error("Cannot write destination {}: {source}", path.display())]
    SinkUnavailable {
        /// The path that could not be written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Container does not start with the expected magic bytes.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual bytes found.
        found: Vec<u8>,
    },

    /// Container declares a format version this build cannot read.
    #[error("Unsupported container version: {version}")]
    UnsupportedVersion {
        /// The version byte found in the header.
        version: u8,
    },

    /// Container structure is inconsistent (tree, header or payload).
    #[error("Malformed container: {message}")]
    ContainerMalformed {
        /// Description of the inconsistency.
        message: String,
    },

    /// Bits ran out before a code resolved to a leaf.
    #[error("Corrupted bit stream at bit position {bit_position}")]
    StreamCorruption {
        /// Bit position (within the message) where decoding stalled.
        bit_position: u64,
    },

    /// Unexpected end of input while reading a fixed-width field.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Encoded message is longer than the 32-bit length header can describe.
    #[error("Encoded message of {bits} bits exceeds the 32-bit length header")]
    MessageTooLarge {
        /// Total number of encoded bits.
        bits: u64,
    },

    /// Tree is deeper than a code register can hold.
    #[error("Huffman code of depth {depth} exceeds the maximum code length")]
    CodeTooLong {
        /// Depth of the offending leaf.
        depth: usize,
    },
}

/// Result type alias for huffpack operations.
pub type Result<T> = std::result::Result<T, HuffpackError>;

impl HuffpackError {
    /// Create a source unavailable error.
    pub fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a sink unavailable error.
    pub fn sink_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SinkUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(version: u8) -> Self {
        Self::UnsupportedVersion { version }
    }

    /// Create a malformed container error.
    pub fn container_malformed(message: impl Into<String>) -> Self {
        Self::ContainerMalformed {
            message: message.into(),
        }
    }

    /// Create a stream corruption error.
    pub fn stream_corruption(bit_position: u64) -> Self {
        Self::StreamCorruption { bit_position }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create a message too large error.
    pub fn message_too_large(bits: u64) -> Self {
        Self::MessageTooLarge { bits }
    }

    /// Create a code too long error.
    pub fn code_too_long(depth: usize) -> Self {
        Self::CodeTooLong { depth }
    }

    /// Whether the error describes a damaged or foreign container rather
    /// than an environment problem.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic { .. }
                | Self::UnsupportedVersion { .. }
                | Self::ContainerMalformed { .. }
                | Self::StreamCorruption { .. }
                | Self::UnexpectedEof { .. }
        )
    }
}
