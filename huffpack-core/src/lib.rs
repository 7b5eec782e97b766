//! # huffpack Core
//!
//! Core components for the huffpack compression library.
//!
//! This crate provides the building blocks shared by the codec and the CLI:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for Huffman codes and headers
//! - [`traits`]: Compressor/decompressor seams and byte source/sink traits
//! - [`fs`]: File-backed sources and crash-safe sinks
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! huffpack is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     huffpack compress / decompress / info / codes       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     magic, version, serialized tree, bit count, payload │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     frequencies, heap, Huffman tree, code table         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, ByteSource/ByteSink            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use huffpack_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b1011, 4).unwrap();
//! writer.write_u32_be(4).unwrap();
//! let data = writer.finish().unwrap();
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1011);
//! assert_eq!(reader.read_u32_be().unwrap(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod fs;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{HuffpackError, Result};
pub use fs::{FileSink, FileSource};
pub use traits::{ByteSink, ByteSource, Compressor, Decompressor};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{HuffpackError, Result};
    pub use crate::traits::{ByteSink, ByteSource, Compressor, Decompressor};
}
