//! File-to-file transforms.
//!
//! Each transform reads its whole source, runs the codec in memory, and hands
//! the finished result to the sink in one call. Combined with [`FileSink`]'s
//! rename-on-commit, a failed run never leaves a partial destination.

use crate::config::CodecConfig;
use crate::container::Container;
use crate::decode::HuffmanDecoder;
use crate::encode::HuffmanEncoder;
use crate::frequency::FrequencyTable;
use huffpack_core::error::Result;
use huffpack_core::fs::{FileSink, FileSource};
use huffpack_core::traits::{ByteSink, ByteSource};
use std::path::Path;

/// Summary of one compress or decompress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformStats {
    /// Bytes read from the source.
    pub input_bytes: u64,
    /// Bytes handed to the sink.
    pub output_bytes: u64,
    /// Distinct byte values in the uncompressed data.
    pub distinct_symbols: usize,
    /// Message bits stored in the container.
    pub bit_count: u64,
}

impl TransformStats {
    /// Output size relative to input size (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Compress the file at `src` into a container at `dst`.
pub fn compress_file(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    config: &CodecConfig,
) -> Result<TransformStats> {
    let mut source = FileSource::new(src.as_ref());
    let mut sink = FileSink::new(dst.as_ref());
    let stats = compress_with(&mut source, &mut sink, config)?;
    tracing::info!(
        src = %src.as_ref().display(),
        dst = %dst.as_ref().display(),
        ratio = stats.ratio(),
        "compressed file"
    );
    Ok(stats)
}

/// Decompress the container at `src` into `dst`.
pub fn decompress_file(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    config: &CodecConfig,
) -> Result<TransformStats> {
    let mut source = FileSource::new(src.as_ref());
    let mut sink = FileSink::new(dst.as_ref());
    let stats = decompress_with(&mut source, &mut sink, config)?;
    tracing::info!(
        src = %src.as_ref().display(),
        dst = %dst.as_ref().display(),
        output_bytes = stats.output_bytes,
        "decompressed file"
    );
    Ok(stats)
}

/// Compress everything `source` yields into `sink`.
pub fn compress_with<S: ByteSource, K: ByteSink>(
    mut source: S,
    mut sink: K,
    config: &CodecConfig,
) -> Result<TransformStats> {
    let input = source.read_all_bytes()?;
    let encoder = HuffmanEncoder::new(*config);
    let container = encoder.encode_container(&input)?;
    let output = container.to_bytes()?;

    if config.verify {
        encoder.verify(&input, &output)?;
    }

    sink.write_all_bytes(&output)?;
    Ok(TransformStats {
        input_bytes: input.len() as u64,
        output_bytes: output.len() as u64,
        distinct_symbols: FrequencyTable::from_bytes(&input).distinct_symbols(),
        bit_count: container.bit_count as u64,
    })
}

/// Decompress the container `source` yields into `sink`.
pub fn decompress_with<S: ByteSource, K: ByteSink>(
    mut source: S,
    mut sink: K,
    config: &CodecConfig,
) -> Result<TransformStats> {
    let input = source.read_all_bytes()?;
    let decoder = HuffmanDecoder::new(*config);
    let container = Container::parse(&input, config)?;
    let output = decoder.decode_container(&container)?;

    sink.write_all_bytes(&output)?;
    Ok(TransformStats {
        input_bytes: input.len() as u64,
        output_bytes: output.len() as u64,
        distinct_symbols: FrequencyTable::from_bytes(&output).distinct_symbols(),
        bit_count: container.bit_count as u64,
    })
}
