//! Container layout.
//!
//! ```text
//! ┌──────────┬─────────┬────────────┬────────────────┬───────────┬──────────┐
//! │ "HUFP"   │ version │ leaf count │ preorder tree  │ bit count │ payload  │
//! │ 4 bytes  │ 1 byte  │ u16 BE     │ padded to byte │ u32 BE    │ N/8 up   │
//! └──────────┴─────────┴────────────┴────────────────┴───────────┴──────────┘
//!  framed only ───────┘
//! ```
//!
//! The raw layout omits magic and version. Parsing is strict: the declared
//! bit count must be covered by the payload exactly, and nothing may follow it.

use crate::config::{CodecConfig, ContainerFormat, FORMAT_VERSION, MAGIC};
use crate::tree::HuffmanTree;
use huffpack_core::error::{HuffpackError, Result};
use huffpack_core::{BitReader, BitWriter};
use std::io::{Cursor, Write};

/// A parsed or assembled container.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Layout the container was read from or will be written as.
    pub format: ContainerFormat,
    /// Huffman tree shared by encoder and decoder.
    pub tree: HuffmanTree,
    /// Number of meaningful bits in `payload`.
    pub bit_count: u32,
    /// Packed message bits, MSB-first, last byte zero-padded.
    pub payload: Vec<u8>,
}

impl Container {
    /// Parse a complete container.
    pub fn parse(data: &[u8], config: &CodecConfig) -> Result<Self> {
        let body = match config.format {
            ContainerFormat::Framed => strip_header(data)?,
            ContainerFormat::Raw => data,
        };

        let mut reader = BitReader::new(Cursor::new(body));
        let tree = HuffmanTree::read_from(&mut reader)?;
        let bit_count = reader.read_u32_be()?;
        let offset = reader.get_ref().position() as usize;
        let rest = body.get(offset..).unwrap_or_default();

        if tree.is_empty() && bit_count > 0 {
            return Err(HuffpackError::container_malformed(format!(
                "empty tree with {} message bits",
                bit_count
            )));
        }

        let needed = (bit_count as usize).div_ceil(8);
        if needed > rest.len() {
            return Err(HuffpackError::container_malformed(format!(
                "header declares {} bits but only {} payload bytes follow",
                bit_count,
                rest.len()
            )));
        }
        if rest.len() > needed {
            return Err(HuffpackError::container_malformed(format!(
                "{} trailing bytes after the payload",
                rest.len() - needed
            )));
        }

        tracing::debug!(
            format = %config.format,
            leaves = tree.leaf_count(),
            bit_count,
            "parsed container"
        );

        Ok(Self {
            format: config.format,
            tree,
            bit_count,
            payload: rest.to_vec(),
        })
    }

    /// Serialize the container into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut bits = BitWriter::new(writer);
        if self.format == ContainerFormat::Framed {
            bits.write_bytes(&MAGIC)?;
            bits.write_bytes(&[FORMAT_VERSION])?;
        }
        self.tree.write_to(&mut bits)?;
        bits.write_u32_be(self.bit_count)?;
        bits.write_bytes(&self.payload)?;
        bits.finish()?;
        Ok(())
    }

    /// Serialize the container into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.format.header_len() + 6 + self.payload.len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Size of the packed message in bytes.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

/// Guess the layout of `data` from its first bytes.
///
/// A raw container cannot start with the magic: its first two bytes are the
/// leaf count, and `"HU"` reads as a count far above 256.
pub fn detect_format(data: &[u8]) -> ContainerFormat {
    if data.starts_with(&MAGIC) {
        ContainerFormat::Framed
    } else {
        ContainerFormat::Raw
    }
}

fn strip_header(data: &[u8]) -> Result<&[u8]> {
    let found = &data[..data.len().min(MAGIC.len())];
    if found != MAGIC {
        return Err(HuffpackError::invalid_magic(MAGIC, found));
    }

    let version = *data
        .get(MAGIC.len())
        .ok_or_else(|| HuffpackError::unexpected_eof(1))?;
    if version != FORMAT_VERSION {
        return Err(HuffpackError::unsupported_version(version));
    }

    Ok(&data[MAGIC.len() + 1..])
}
