//! Byte frequency counting.

use crate::config::ALPHABET_SIZE;

/// Occurrence count of every byte value in an input.
///
/// Built once per compression and read-only afterwards. Bytes that never
/// occur have a count of 0 and take no part in tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Count of a single byte value.
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Non-zero `(byte, count)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    /// Number of byte values that occur at least once.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Shannon lower bound for the message size in bits.
    ///
    /// No prefix code over whole bytes can encode the counted input in fewer
    /// bits; Huffman stays within one bit per symbol of it.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        self.iter()
            .map(|(_, count)| {
                let p = count as f64 / total;
                -(count as f64) * p.log2()
            })
            .sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }
}
