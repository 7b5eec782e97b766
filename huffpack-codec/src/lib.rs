//! # huffpack Codec: Static Huffman Compression
//!
//! This crate builds a Huffman tree from the byte frequencies of an input,
//! packs every byte's code into an MSB-first bit stream, and stores tree and
//! bits together in a self-describing container.
//!
//! ## Features
//!
//! - **Deterministic**: equal weights are merged in insertion order, so the
//!   same input always produces the same container
//! - **Strict decoding**: damaged trees, short payloads, trailing bytes and
//!   codes cut off by the bit count are reported as errors
//! - **Framed or raw**: `HUFP` magic + version by default, or the bare
//!   tree/bit-count/payload layout
//!
//! ## Pipeline
//!
//! ```text
//! compress:    bytes ─▶ FrequencyTable ─▶ HuffmanTree ─▶ CodeTable ─▶ BitWriter ─▶ Container
//! decompress:  Container ─▶ BitReader ─▶ HuffmanTree + bit count ─▶ tree walk ─▶ bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use huffpack_codec::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let compressed = compress(original).unwrap();
//! assert!(compressed.starts_with(b"HUFP"));
//!
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Inspecting codes
//!
//! ```rust
//! use huffpack_codec::HuffmanTree;
//!
//! let table = HuffmanTree::from_bytes(b"aaab").code_table().unwrap();
//! assert_eq!(table.get(b'a').unwrap().to_string(), "1");
//! assert_eq!(table.get(b'b').unwrap().to_string(), "0");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code;
pub mod config;
pub mod container;
pub mod decode;
pub mod driver;
pub mod encode;
pub mod frequency;
pub mod heap;
pub mod tree;

pub use code::{Code, CodeTable};
pub use config::{
    ALPHABET_SIZE, CodecConfig, ContainerFormat, FORMAT_VERSION, MAGIC, MAX_CODE_LENGTH,
};
pub use container::{Container, detect_format};
pub use decode::{HuffmanDecoder, decode_message, decompress};
pub use driver::{TransformStats, compress_file, decompress_file};
pub use encode::{HuffmanEncoder, compress, encode_message};
pub use frequency::FrequencyTable;
pub use heap::PriorityQueue;
pub use huffpack_core::{HuffpackError, Result};
pub use tree::{HuffNode, HuffmanTree};
