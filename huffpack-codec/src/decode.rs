//! Huffman decoder.

use crate::config::CodecConfig;
use crate::container::Container;
use crate::tree::HuffmanTree;
use huffpack_core::BitReader;
use huffpack_core::error::{HuffpackError, Result};
use huffpack_core::traits::Decompressor;
use std::io::Cursor;

/// Static Huffman decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanDecoder {
    config: CodecConfig,
}

impl HuffmanDecoder {
    /// Create a decoder expecting containers in the configured layout.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Parse and decode a complete container.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let container = Container::parse(data, &self.config)?;
        self.decode_container(&container)
    }

    /// Decode an already parsed container.
    pub fn decode_container(&self, container: &Container) -> Result<Vec<u8>> {
        let output = decode_message(
            &container.tree,
            &container.payload,
            container.bit_count as u64,
        )?;
        tracing::debug!(
            bit_count = container.bit_count,
            output_bytes = output.len(),
            "decoded message"
        );
        Ok(output)
    }
}

impl Decompressor for HuffmanDecoder {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decode(input)
    }
}

/// Walk `tree` over the first `bit_count` bits of `payload`.
///
/// Each code starts at the root; reaching a leaf emits its byte. The walk
/// must end exactly on a leaf when the bit count is used up.
pub fn decode_message(tree: &HuffmanTree, payload: &[u8], bit_count: u64) -> Result<Vec<u8>> {
    if tree.is_empty() {
        if bit_count > 0 {
            return Err(HuffpackError::container_malformed(format!(
                "empty tree with {} message bits",
                bit_count
            )));
        }
        return Ok(Vec::new());
    }

    let mut reader = BitReader::new(Cursor::new(payload));
    let mut output = Vec::with_capacity(payload.len() * 2);
    let mut remaining = bit_count;
    while remaining > 0 {
        let (byte, used) = tree.decode_symbol(&mut reader, remaining)?;
        output.push(byte);
        remaining -= used;
    }
    Ok(output)
}

/// Decompress a framed container with the default configuration.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::default().decode(data)
}
