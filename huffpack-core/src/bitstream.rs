//! Bit-level I/O for Huffman containers.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level on top of any byte-oriented `Read`/`Write`.
//!
//! # Bit Ordering
//!
//! huffpack packs bits MSB-first (Most Significant Bit first): the first bit
//! written lands in bit 7 of the first byte. A trailing partial byte is padded
//! with zero bits at the least significant end. Fixed-width header integers
//! are big-endian and always start on a byte boundary.
//!
//! # Example
//!
//! ```
//! use huffpack_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b1011, 4).unwrap();
//! let output = writer.finish().unwrap();
//! assert_eq!(output, vec![0xB0]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1011);
//! ```

use crate::error::{HuffpackError, Result};
use std::io::{ErrorKind, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader one at a time and handed out
/// bit by bit, most significant unread bit first.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Byte currently being consumed.
    current: u8,
    /// Number of unread bits left in `current`.
    bits_left: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current: 0,
            bits_left: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Any unread bits of a partially consumed byte are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Whether the reader sits on a byte boundary.
    pub fn is_aligned(&self) -> bool {
        self.bits_left == 0
    }

    /// Pull one raw byte from the underlying reader, `None` at end of input.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a single bit.
    ///
    /// Returns `Ok(None)` once the input is exhausted, which is distinct
    /// from a valid `0` bit (`Ok(Some(false))`).
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_left == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.current = byte;
                    self.bits_left = 8;
                }
                None => return Ok(None),
            }
        }

        self.bits_left -= 1;
        self.total_bits_read += 1;
        Ok(Some((self.current >> self.bits_left) & 1 == 1))
    }

    /// Read up to 64 bits, first bit read in the most significant position.
    ///
    /// Fails with `UnexpectedEof` if the input ends before `count` bits.
    pub fn read_bits(&mut self, count: u8) -> Result<u64> {
        debug_assert!(count <= 64, "Cannot read more than 64 bits at once");

        let mut value = 0u64;
        for read in 0..count {
            match self.read_bit()? {
                Some(bit) => value = (value << 1) | bit as u64,
                None => {
                    let missing_bits = (count - read) as usize;
                    return Err(HuffpackError::unexpected_eof(missing_bits.div_ceil(8)));
                }
            }
        }
        Ok(value)
    }

    /// Align to the next byte boundary by discarding partial bits.
    pub fn align_to_byte(&mut self) {
        self.total_bits_read += self.bits_left as u64;
        self.bits_left = 0;
    }

    /// Read `N` whole bytes after aligning to a byte boundary.
    fn read_aligned<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.align_to_byte();

        let mut bytes = [0u8; N];
        for (i, slot) in bytes.iter_mut().enumerate() {
            match self.next_byte()? {
                Some(byte) => *slot = byte,
                None => return Err(HuffpackError::unexpected_eof(N - i)),
            }
        }
        self.total_bits_read += N as u64 * 8;
        Ok(bytes)
    }

    /// Read a byte-aligned big-endian `u16`.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_aligned::<2>()?))
    }

    /// Read a byte-aligned big-endian `u32`.
    ///
    /// Fails with `UnexpectedEof` if fewer than 4 bytes remain.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_aligned::<4>()?))
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in a one-byte buffer and emits every byte as
/// soon as it is full. Call [`BitWriter::finish`] when done: it pads and
/// writes the final partial byte and hands back the underlying writer.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Byte being assembled (MSB-first).
    current: u8,
    /// Number of bits already placed in `current`.
    bits_in_current: u8,
    /// Total bits written, padding included.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current: 0,
            bits_in_current: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    #[inline]
    fn emit_current(&mut self) -> Result<()> {
        self.writer.write_all(&[self.current])?;
        self.current = 0;
        self.bits_in_current = 0;
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.current |= (bit as u8) << (7 - self.bits_in_current);
        self.bits_in_current += 1;
        self.total_bits_written += 1;

        if self.bits_in_current == 8 {
            self.emit_current()?;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value`, most significant of them first.
    pub fn write_bits(&mut self, value: u64, count: u8) -> Result<()> {
        debug_assert!(count <= 64, "Cannot write more than 64 bits at once");

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.bits_in_current;
            let take = remaining.min(free);
            let chunk = ((value >> (remaining - take)) & ((1u64 << take) - 1)) as u8;

            self.current |= chunk << (free - take);
            self.bits_in_current += take;
            self.total_bits_written += take as u64;
            remaining -= take;

            if self.bits_in_current == 8 {
                self.emit_current()?;
            }
        }
        Ok(())
    }

    /// Pad the pending partial byte with zeros and emit it.
    pub fn align_to_byte(&mut self) -> Result<()> {
        if self.bits_in_current > 0 {
            self.total_bits_written += (8 - self.bits_in_current) as u64;
            self.emit_current()?;
        }
        Ok(())
    }

    /// Write a byte-aligned big-endian `u16`.
    pub fn write_u16_be(&mut self, value: u16) -> Result<()> {
        self.align_to_byte()?;
        self.writer.write_all(&value.to_be_bytes())?;
        self.total_bits_written += 16;
        Ok(())
    }

    /// Write a byte-aligned big-endian `u32`.
    pub fn write_u32_be(&mut self, value: u32) -> Result<()> {
        self.align_to_byte()?;
        self.writer.write_all(&value.to_be_bytes())?;
        self.total_bits_written += 32;
        Ok(())
    }

    /// Write raw bytes after aligning to a byte boundary.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.align_to_byte()?;
        self.writer.write_all(buf)?;
        self.total_bits_written += buf.len() as u64 * 8;
        Ok(())
    }

    /// Pad the final partial byte, flush, and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.align_to_byte()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_partial_byte_is_left_aligned() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        writer.write_bit(false).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bit(true).unwrap();
        assert_eq!(writer.finish().unwrap(), vec![0xB0]);
    }

    #[test]
    fn test_bitwriter_full_byte() {
        let mut writer = BitWriter::new(Vec::new());
        // Write 0b10110101 bit by bit
        for bit in [true, false, true, true, false, true, false, true] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.get_ref(), &vec![0xB5]);
        assert_eq!(writer.finish().unwrap(), vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_multi_bits_cross_boundary() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1100_1111_0, 9).unwrap();
        // 101 11001 | 1110 0000
        assert_eq!(writer.finish().unwrap(), vec![0b1011_1001, 0b1110_0000]);
    }

    #[test]
    fn test_bitwriter_wide_value() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(u64::MAX, 64).unwrap();
        writer.write_bits(0, 0).unwrap();
        assert_eq!(writer.bits_written(), 64);
        assert_eq!(writer.finish().unwrap(), vec![0xFF; 8]);
    }

    #[test]
    fn test_header_integers_are_aligned_big_endian() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b1, 1).unwrap();
        writer.write_u32_be(0x0102_0304).unwrap();
        writer.write_u16_be(0xABCD).unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            vec![0x80, 0x01, 0x02, 0x03, 0x04, 0xAB, 0xCD]
        );
    }

    #[test]
    fn test_bitreader_msb_first() {
        let mut reader = BitReader::new(Cursor::new(vec![0xB5]));
        let mut bits = Vec::new();
        while let Some(bit) = reader.read_bit().unwrap() {
            bits.push(bit);
        }
        assert_eq!(
            bits,
            vec![true, false, true, true, false, true, false, true]
        );
        assert_eq!(reader.bits_read(), 8);
    }

    #[test]
    fn test_bitreader_end_of_input_is_not_zero() {
        let mut reader = BitReader::new(Cursor::new(vec![0x00]));
        for _ in 0..8 {
            assert_eq!(reader.read_bit().unwrap(), Some(false));
        }
        assert_eq!(reader.read_bit().unwrap(), None);
    }

    #[test]
    fn test_read_bits_eof() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFF]));
        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        let err = reader.read_bits(12).unwrap_err();
        assert!(matches!(err, HuffpackError::UnexpectedEof { expected: 1 }));
    }

    #[test]
    fn test_read_u32_be_short_input() {
        let mut reader = BitReader::new(Cursor::new(vec![0x00, 0x00, 0x01]));
        let err = reader.read_u32_be().unwrap_err();
        assert!(matches!(err, HuffpackError::UnexpectedEof { expected: 1 }));
    }

    #[test]
    fn test_roundtrip() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_u16_be(300).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        writer.write_bits(0b10, 2).unwrap();
        writer.write_u32_be(0xDEAD_BEEF).unwrap();
        writer.write_bits(0b110011, 6).unwrap();
        let output = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(&output));
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_u16_be().unwrap(), 300);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_u32_be().unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
        assert!(!reader.is_aligned());
        reader.align_to_byte();
        assert_eq!(reader.read_bit().unwrap(), None);
    }
}
