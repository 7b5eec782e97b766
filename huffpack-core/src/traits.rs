//! Core traits for compression and byte transport.
//!
//! The codec itself only transforms byte slices. Acquiring the input and
//! persisting the output are delegated to a [`ByteSource`] and a
//! [`ByteSink`], so the same transform runs against files, in-memory buffers
//! or test doubles.

use crate::error::Result;

/// A whole-buffer compressor (encoder).
///
/// Implemented by every codec; the input is consumed in one call and the
/// complete container is returned.
pub trait Compressor {
    /// Compress `input` into a self-contained container.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// A whole-buffer decompressor (decoder).
pub trait Decompressor {
    /// Decompress a complete container back into the original bytes.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Something that can hand over its entire content as bytes.
pub trait ByteSource {
    /// Read every byte of the source.
    fn read_all_bytes(&mut self) -> Result<Vec<u8>>;
}

/// Something that can durably receive a complete byte buffer.
///
/// Implementations must either store all of `data` or report an error;
/// a failed call must not leave a truncated result behind.
pub trait ByteSink {
    /// Replace the sink's content with `data`.
    fn write_all_bytes(&mut self, data: &[u8]) -> Result<()>;
}

impl ByteSource for &[u8] {
    fn read_all_bytes(&mut self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl ByteSource for Vec<u8> {
    fn read_all_bytes(&mut self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl ByteSink for Vec<u8> {
    fn write_all_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.clear();
        self.extend_from_slice(data);
        Ok(())
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_all_bytes(&mut self) -> Result<Vec<u8>> {
        (**self).read_all_bytes()
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    fn write_all_bytes(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_all_bytes(data)
    }
}
