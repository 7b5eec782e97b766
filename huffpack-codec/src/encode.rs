//! Huffman encoder.

use crate::code::CodeTable;
use crate::config::CodecConfig;
use crate::container::Container;
use crate::decode::HuffmanDecoder;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use huffpack_core::BitWriter;
use huffpack_core::error::{HuffpackError, Result};
use huffpack_core::traits::Compressor;

/// Static Huffman encoder.
///
/// Counts the input, builds its tree, and packs every byte's code into a
/// container laid out according to the configured [`CodecConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanEncoder {
    config: CodecConfig,
}

impl HuffmanEncoder {
    /// Create an encoder.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data` into a serialized container.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let output = self.encode_container(data)?.to_bytes()?;

        if self.config.verify {
            self.verify(data, &output)?;
        }
        Ok(output)
    }

    /// Decode `output` and check that it reproduces `input`.
    pub fn verify(&self, input: &[u8], output: &[u8]) -> Result<()> {
        let decoded = HuffmanDecoder::new(self.config).decode(output)?;
        if decoded != input {
            return Err(HuffpackError::container_malformed(
                "verification failed: decoded output differs from the input",
            ));
        }
        tracing::debug!("verified container round trip");
        Ok(())
    }

    /// Encode `data` into a container without serializing it.
    pub fn encode_container(&self, data: &[u8]) -> Result<Container> {
        let frequencies = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&frequencies);
        let table = tree.code_table()?;

        let bits: u64 = frequencies
            .iter()
            .map(|(byte, count)| count * table.get(byte).map_or(0, |code| code.len() as u64))
            .sum();
        let bit_count = u32::try_from(bits).map_err(|_| HuffpackError::message_too_large(bits))?;

        let payload = encode_message(&table, data)?;

        tracing::debug!(
            input_bytes = data.len(),
            distinct_symbols = frequencies.distinct_symbols(),
            bit_count,
            payload_bytes = payload.len(),
            "encoded message"
        );

        Ok(Container {
            format: self.config.format,
            tree,
            bit_count,
            payload,
        })
    }
}

impl Compressor for HuffmanEncoder {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.encode(input)
    }
}

/// Pack the code of every byte of `data`, in order, MSB-first.
///
/// Every byte of `data` must have a code in `table`.
pub fn encode_message(table: &CodeTable, data: &[u8]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new(Vec::with_capacity(data.len() / 2 + 1));
    for &byte in data {
        let code = table.get(byte).ok_or_else(|| {
            HuffpackError::container_malformed(format!("byte {:#04x} has no code", byte))
        })?;
        writer.write_bits(code.bits(), code.len())?;
    }
    writer.finish()
}

/// Compress `data` into a framed container with the default configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::default().encode(data)
}
