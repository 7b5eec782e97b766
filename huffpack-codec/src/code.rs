//! Prefix codes and the byte-to-code table.

use crate::config::{ALPHABET_SIZE, MAX_CODE_LENGTH};
use crate::tree::{HuffNode, HuffmanTree};
use huffpack_core::error::{HuffpackError, Result};
use std::fmt;

/// A variable-length code of up to 64 bits.
///
/// The code occupies the low `len` bits of `bits`; its first bit (the one
/// taken at the root) is the most significant of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Create a code from its bit pattern and length.
    pub fn new(bits: u64, len: u8) -> Self {
        debug_assert!(len as usize <= MAX_CODE_LENGTH);
        let mask = 1u64.checked_shl(len as u32).map_or(u64::MAX, |bit| bit - 1);
        Self {
            bits: bits & mask,
            len,
        }
    }

    /// Bit pattern, right-aligned.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extend the code by one bit; `None` past the maximum code length.
    fn child(self, bit: bool) -> Option<Self> {
        if self.len as usize >= MAX_CODE_LENGTH {
            return None;
        }
        Some(Self {
            bits: (self.bits << 1) | bit as u64,
            len: self.len + 1,
        })
    }

    /// Whether `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let head = other
            .bits
            .checked_shr((other.len - self.len) as u32)
            .unwrap_or(0);
        head == self.bits
    }
}

impl fmt::Display for Code {
    /// Renders the code as a string of `0`/`1` characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            let bit = (self.bits >> i) & 1;
            f.write_str(if bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from byte value to its Huffman code.
///
/// Every leaf of the source tree gets an entry, including the placeholder
/// leaf of a single-symbol tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl CodeTable {
    /// Walk `tree` and record the root-to-leaf path of every leaf
    /// (0 = left, 1 = right).
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self::default();
        if let Some(root) = tree.root() {
            table.assign(root, Code::new(0, 0))?;
        }
        Ok(table)
    }

    fn assign(&mut self, node: &HuffNode, prefix: Code) -> Result<()> {
        match node {
            HuffNode::Leaf { byte, .. } => {
                self.codes[*byte as usize] = Some(prefix);
                Ok(())
            }
            HuffNode::Internal { left, right, .. } => {
                let too_long = || HuffpackError::code_too_long(prefix.len() as usize + 1);
                self.assign(left, prefix.child(false).ok_or_else(too_long)?)?;
                self.assign(right, prefix.child(true).ok_or_else(too_long)?)
            }
        }
    }

    /// Code of `byte`, `None` if it is not in the tree.
    pub fn get(&self, byte: u8) -> Option<Code> {
        self.codes[byte as usize]
    }

    /// `(byte, code)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.map(|code| (byte as u8, code)))
    }

    /// Number of bytes with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Whether no byte has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> u8 {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self {
            codes: [None; ALPHABET_SIZE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        assert_eq!(Code::new(0b011, 3).to_string(), "011");
        assert_eq!(Code::new(1, 1).to_string(), "1");
        assert_eq!(Code::new(0, 0).to_string(), "");
        assert_eq!(Code::new(u64::MAX, 64).to_string(), "1".repeat(64));
    }

    #[test]
    fn test_prefix_relation() {
        let short = Code::new(0b10, 2);
        assert!(short.is_prefix_of(&Code::new(0b101, 3)));
        assert!(short.is_prefix_of(&short));
        assert!(!short.is_prefix_of(&Code::new(0b111, 3)));
        assert!(!Code::new(0b101, 3).is_prefix_of(&short));
        assert!(Code::new(0, 0).is_prefix_of(&Code::new(u64::MAX, 64)));
    }

    #[test]
    fn test_two_symbol_table() {
        let table = HuffmanTree::from_bytes(b"aaab").code_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b'b').unwrap().to_string(), "0");
        assert_eq!(table.get(b'a').unwrap().to_string(), "1");
        assert_eq!(table.get(b'c'), None);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_single_symbol_table() {
        let table = HuffmanTree::from_bytes(b"zzzz").code_table().unwrap();
        assert_eq!(table.get(b'z'), Some(Code::new(0, 1)));
        assert_eq!(table.get(b'{'), Some(Code::new(1, 1)));
    }

    #[test]
    fn test_empty_table() {
        let table = HuffmanTree::from_bytes(b"").code_table().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_len(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let mut data = vec![b'e'; 500];
        data.extend_from_slice(&[b't'; 120]);
        data.extend_from_slice(b"qzxj");
        let table = HuffmanTree::from_bytes(&data).code_table().unwrap();

        assert!(table.is_prefix_free());
        let e = table.get(b'e').unwrap().len();
        for byte in [b'q', b'z', b'x', b'j'] {
            assert!(e < table.get(byte).unwrap().len());
        }
    }

    #[test]
    fn test_fibonacci_weights_build_deep_codes() {
        // Fibonacci counts produce a maximally skewed tree
        let mut data = Vec::new();
        let (mut a, mut b) = (1usize, 1usize);
        for symbol in 0..20u8 {
            data.extend(std::iter::repeat_n(symbol, a));
            (a, b) = (b, a + b);
        }
        let tree = HuffmanTree::from_bytes(&data);
        let table = tree.code_table().unwrap();
        assert_eq!(table.max_len() as usize, tree.depth());
        assert_eq!(tree.depth(), 19);
        assert!(table.is_prefix_free());
    }
}
