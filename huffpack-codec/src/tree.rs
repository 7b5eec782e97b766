//! Huffman tree construction and serialization.
//!
//! # Construction
//!
//! Every byte with a non-zero count becomes a single-leaf tree in a
//! [`PriorityQueue`]. The two lightest trees are repeatedly taken out and
//! joined under a new internal node (first extracted on the left), until one
//! tree remains. Equal weights are resolved by insertion order: leaves are
//! inserted in ascending byte order and each merged tree is inserted after
//! everything before it, so the same input always yields the same tree.
//!
//! An input with a single distinct byte gets a synthetic zero-weight sibling
//! so that the real byte still owns a one-bit code.
//!
//! # Serialized form
//!
//! ```text
//! u16 BE   leaf count L (0..=256)
//! bits     preorder walk: 0 = internal node, 1 = leaf + 8-bit byte value
//! pad      zero bits up to the next byte boundary
//! ```
//!
//! Weights are not stored; a deserialized tree carries zero weights.

use crate::code::CodeTable;
use crate::config::ALPHABET_SIZE;
use crate::frequency::FrequencyTable;
use crate::heap::PriorityQueue;
use huffpack_core::error::{HuffpackError, Result};
use huffpack_core::{BitReader, BitWriter};
use std::cmp::Ordering;
use std::io::{Read, Write};

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    /// A single byte value and its occurrence count.
    Leaf {
        /// The byte value.
        byte: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// Merge of two subtrees.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached with a 0 bit.
        left: Box<HuffNode>,
        /// Subtree reached with a 1 bit.
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    /// Create a leaf.
    pub fn leaf(byte: u8, weight: u64) -> Self {
        Self::Leaf { byte, weight }
    }

    /// Join two subtrees; the result weighs their sum.
    pub fn merge(left: Self, right: Self) -> Self {
        Self::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Weight of the node.
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Byte value of a leaf.
    pub fn byte(&self) -> Option<u8> {
        match self {
            Self::Leaf { byte, .. } => Some(*byte),
            Self::Internal { .. } => None,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn same_structure(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf { byte: a, .. }, Self::Leaf { byte: b, .. }) => a == b,
            (
                Self::Internal {
                    left: l1,
                    right: r1,
                    ..
                },
                Self::Internal {
                    left: l2,
                    right: r2,
                    ..
                },
            ) => l1.same_structure(l2) && r1.same_structure(r2),
            _ => false,
        }
    }

    fn write_preorder<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        match self {
            Self::Leaf { byte, .. } => {
                writer.write_bit(true)?;
                writer.write_bits(*byte as u64, 8)
            }
            Self::Internal { left, right, .. } => {
                writer.write_bit(false)?;
                left.write_preorder(writer)?;
                right.write_preorder(writer)
            }
        }
    }
}

/// Heap entry: lighter trees, then earlier insertions, compare greater.
#[derive(Debug)]
struct ForestEntry {
    seq: u64,
    node: HuffNode,
}

impl Ord for ForestEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ForestEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ForestEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ForestEntry {}

/// Trees waiting to be merged.
struct Forest {
    heap: PriorityQueue<ForestEntry>,
    next_seq: u64,
}

impl Forest {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: PriorityQueue::with_capacity(capacity),
            next_seq: 0,
        }
    }

    fn push(&mut self, node: HuffNode) {
        self.heap.insert(ForestEntry {
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<HuffNode> {
        self.heap.extract_top().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A Huffman tree over the byte alphabet.
///
/// The tree is empty only for an empty input. Otherwise it has at least two
/// leaves, so every symbol has a code of at least one bit.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    root: Option<HuffNode>,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let mut forest = Forest::with_capacity(frequencies.distinct_symbols() + 1);
        for (byte, count) in frequencies.iter() {
            forest.push(HuffNode::leaf(byte, count));
        }

        if forest.len() == 0 {
            tracing::debug!("empty input, no Huffman tree");
            return Self { root: None };
        }

        if forest.len() == 1 {
            if let Some(only) = forest.pop() {
                let placeholder = only.byte().map_or(0, |byte| byte.wrapping_add(1));
                tracing::debug!(placeholder, "single symbol input, adding placeholder leaf");
                forest.push(HuffNode::merge(only, HuffNode::leaf(placeholder, 0)));
            }
        }

        while forest.len() > 1 {
            let (Some(left), Some(right)) = (forest.pop(), forest.pop()) else {
                break;
            };
            tracing::trace!(
                left = left.weight(),
                right = right.weight(),
                "merging subtrees"
            );
            forest.push(HuffNode::merge(left, right));
        }

        let tree = Self { root: forest.pop() };
        tracing::debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built Huffman tree"
        );
        tree
    }

    /// Count the bytes of `data` and build their tree.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Root node, `None` for the empty tree.
    pub fn root(&self) -> Option<&HuffNode> {
        self.root.as_ref()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of leaves, placeholder included.
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, HuffNode::leaf_count)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, HuffNode::depth)
    }

    /// Total weight, i.e. the number of bytes the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.as_ref().map_or(0, HuffNode::weight)
    }

    /// Derive the code of every leaf.
    pub fn code_table(&self) -> Result<CodeTable> {
        CodeTable::from_tree(self)
    }

    /// Follow bits from `reader` down from the root until a leaf is reached.
    ///
    /// At most `max_bits` bits are consumed. Returns the leaf byte and the
    /// number of bits its code took. Running out of the `max_bits` budget
    /// on an internal node means the message ends mid-code, while the reader
    /// itself running dry means the bits are missing from the stream.
    pub fn decode_symbol<R: Read>(
        &self,
        reader: &mut BitReader<R>,
        max_bits: u64,
    ) -> Result<(u8, u64)> {
        let Some(mut node) = self.root.as_ref() else {
            return Err(HuffpackError::container_malformed(
                "message bits present but the tree is empty",
            ));
        };
        if node.is_leaf() {
            return Err(HuffpackError::container_malformed("tree root is a leaf"));
        }

        let mut used = 0u64;
        loop {
            match node {
                HuffNode::Leaf { byte, .. } => return Ok((*byte, used)),
                HuffNode::Internal { left, right, .. } => {
                    if used == max_bits {
                        return Err(HuffpackError::container_malformed(
                            "message ends in the middle of a code",
                        ));
                    }
                    let bit = reader
                        .read_bit()?
                        .ok_or_else(|| HuffpackError::stream_corruption(reader.bits_read()))?;
                    used += 1;
                    node = if bit { right.as_ref() } else { left.as_ref() };
                }
            }
        }
    }

    /// Serialize the tree section.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.write_u16_be(self.leaf_count() as u16)?;
        if let Some(root) = &self.root {
            root.write_preorder(writer)?;
        }
        writer.align_to_byte()
    }

    /// Deserialize a tree section written by [`HuffmanTree::write_to`].
    ///
    /// Rejects leaf counts outside the alphabet, a lone leaf, a preorder
    /// walk that disagrees with the declared count, and repeated byte values.
    pub fn read_from<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let leaf_count = reader.read_u16_be()? as usize;

        if leaf_count == 0 {
            return Ok(Self { root: None });
        }
        if leaf_count > ALPHABET_SIZE {
            return Err(HuffpackError::container_malformed(format!(
                "leaf count {} exceeds alphabet size {}",
                leaf_count, ALPHABET_SIZE
            )));
        }
        if leaf_count == 1 {
            return Err(HuffpackError::container_malformed(
                "tree must have at least two leaves",
            ));
        }

        let mut parser = TreeParser {
            reader,
            expected_leaves: leaf_count,
            leaves: 0,
            internals: 0,
            seen: [false; ALPHABET_SIZE],
        };
        let root = parser.parse_node()?;

        if parser.leaves != leaf_count {
            return Err(HuffpackError::container_malformed(format!(
                "tree declares {} leaves but contains {}",
                leaf_count, parser.leaves
            )));
        }

        reader.align_to_byte();
        Ok(Self { root: Some(root) })
    }
}

impl PartialEq for HuffmanTree {
    /// Trees are equal when they have the same shape and leaf bytes;
    /// weights are ignored because they are not persisted.
    fn eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_structure(b),
            _ => false,
        }
    }
}

struct TreeParser<'a, R: Read> {
    reader: &'a mut BitReader<R>,
    expected_leaves: usize,
    leaves: usize,
    internals: usize,
    seen: [bool; ALPHABET_SIZE],
}

impl<R: Read> TreeParser<'_, R> {
    fn next_bit(&mut self) -> Result<bool> {
        self.reader
            .read_bit()?
            .ok_or_else(|| HuffpackError::container_malformed("tree section is truncated"))
    }

    fn parse_node(&mut self) -> Result<HuffNode> {
        if self.next_bit()? {
            let mut byte = 0u8;
            for _ in 0..8 {
                byte = (byte << 1) | self.next_bit()? as u8;
            }
            if std::mem::replace(&mut self.seen[byte as usize], true) {
                return Err(HuffpackError::container_malformed(format!(
                    "byte {:#04x} appears on more than one leaf",
                    byte
                )));
            }
            self.leaves += 1;
            return Ok(HuffNode::leaf(byte, 0));
        }

        // A full binary tree with L leaves has exactly L - 1 internal nodes.
        self.internals += 1;
        if self.internals >= self.expected_leaves {
            return Err(HuffpackError::container_malformed(format!(
                "tree has more internal nodes than {} leaves allow",
                self.expected_leaves
            )));
        }

        let left = self.parse_node()?;
        let right = self.parse_node()?;
        Ok(HuffNode::merge(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn assert_weights_consistent(node: &HuffNode) {
        if let HuffNode::Internal {
            weight,
            left,
            right,
        } = node
        {
            assert_eq!(*weight, left.weight() + right.weight());
            assert_weights_consistent(left);
            assert_weights_consistent(right);
        }
    }

    fn collect_leaves(node: &HuffNode, out: &mut Vec<u8>) {
        match node {
            HuffNode::Leaf { byte, .. } => out.push(*byte),
            HuffNode::Internal { left, right, .. } => {
                collect_leaves(left, out);
                collect_leaves(right, out);
            }
        }
    }

    fn serialize(tree: &HuffmanTree) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        tree.write_to(&mut writer).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_two_symbols() {
        let tree = HuffmanTree::from_bytes(b"aaab");
        let root = tree.root().unwrap();
        assert_eq!(root.weight(), 4);

        // b (weight 1) leaves the heap first and becomes the left child
        let HuffNode::Internal { left, right, .. } = root else {
            panic!("root must be internal");
        };
        assert_eq!(left.byte(), Some(b'b'));
        assert_eq!(right.byte(), Some(b'a'));
    }

    #[test]
    fn test_single_symbol_gets_placeholder() {
        let tree = HuffmanTree::from_bytes(b"aaaaaa");
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.depth(), 1);

        let HuffNode::Internal { left, right, .. } = tree.root().unwrap() else {
            panic!("root must be internal");
        };
        assert_eq!(**left, HuffNode::leaf(b'a', 6));
        assert_eq!(**right, HuffNode::leaf(b'b', 0));
    }

    #[test]
    fn test_placeholder_wraps_for_last_byte() {
        let tree = HuffmanTree::from_bytes(&[0xFF; 3]);
        let mut leaves = Vec::new();
        collect_leaves(tree.root().unwrap(), &mut leaves);
        assert_eq!(leaves, vec![0xFF, 0x00]);
    }

    #[test]
    fn test_empty_input() {
        let tree = HuffmanTree::from_bytes(b"");
        assert!(tree.is_empty());
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.weight(), 0);
        assert_eq!(serialize(&tree), vec![0x00, 0x00]);
    }

    #[test]
    fn test_weight_invariant_and_coverage() {
        let data = b"the quick brown fox jumps over the lazy dog, again and again";
        let frequencies = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&frequencies);

        let root = tree.root().unwrap();
        assert_weights_consistent(root);
        assert_eq!(tree.weight(), data.len() as u64);

        let mut leaves = Vec::new();
        collect_leaves(root, &mut leaves);
        leaves.sort_unstable();
        let expected: Vec<u8> = frequencies.iter().map(|(byte, _)| byte).collect();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let data = b"abcdabcdabcdeeeeffgh";
        let first = HuffmanTree::from_bytes(data);
        let second = HuffmanTree::from_bytes(data);
        assert_eq!(first, second);
        assert_eq!(serialize(&first), serialize(&second));
    }

    #[test]
    fn test_equal_weights_merge_in_insertion_order() {
        // Four equal weights: (a,b) then (c,d) then the two pairs
        let tree = HuffmanTree::from_bytes(b"abcd");
        let HuffNode::Internal { left, right, .. } = tree.root().unwrap() else {
            panic!("root must be internal");
        };
        let mut left_leaves = Vec::new();
        let mut right_leaves = Vec::new();
        collect_leaves(left, &mut left_leaves);
        collect_leaves(right, &mut right_leaves);
        assert_eq!(left_leaves, b"ab");
        assert_eq!(right_leaves, b"cd");
    }

    #[test]
    fn test_serialized_layout() {
        // root(internal) -> leaf 'b', leaf 'a'
        // bits: 0 1 01100010 1 01100001 -> 19 bits, padded to 3 bytes
        let tree = HuffmanTree::from_bytes(b"aaab");
        assert_eq!(
            serialize(&tree),
            vec![0x00, 0x02, 0b0101_1000, 0b1010_1100, 0b0010_0000]
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let data: Vec<u8> = (0..=255u8).chain(b"zzzzyyyx".iter().copied()).collect();
        let tree = HuffmanTree::from_bytes(&data);
        let bytes = serialize(&tree);

        let mut reader = BitReader::new(Cursor::new(&bytes));
        let restored = HuffmanTree::read_from(&mut reader).unwrap();
        assert_eq!(restored, tree);
        assert_eq!(restored.leaf_count(), 256);
        assert!(reader.is_aligned());
        assert_eq!(reader.bits_read(), bytes.len() as u64 * 8);
    }

    #[test]
    fn test_decode_symbol_walks_to_leaf() {
        let tree = HuffmanTree::from_bytes(b"aaab");
        // 1 -> 'a', 0 -> 'b'
        let mut reader = BitReader::new(Cursor::new(vec![0b1000_0000]));
        assert_eq!(tree.decode_symbol(&mut reader, 8).unwrap(), (b'a', 1));
        assert_eq!(tree.decode_symbol(&mut reader, 7).unwrap(), (b'b', 1));
    }

    #[test]
    fn test_decode_symbol_budget_and_exhaustion() {
        let tree = HuffmanTree::from_bytes(b"abcd");
        let mut reader = BitReader::new(Cursor::new(vec![0xFF]));
        let err = tree.decode_symbol(&mut reader, 1).unwrap_err();
        assert!(matches!(err, HuffpackError::ContainerMalformed { .. }));

        let mut reader = BitReader::new(Cursor::new(Vec::new()));
        let err = tree.decode_symbol(&mut reader, 2).unwrap_err();
        assert!(matches!(
            err,
            HuffpackError::StreamCorruption { bit_position: 0 }
        ));

        let empty = HuffmanTree::default();
        let mut reader = BitReader::new(Cursor::new(vec![0x00]));
        assert!(empty.decode_symbol(&mut reader, 1).is_err());
    }

    #[test]
    fn test_rejects_lone_leaf() {
        let mut reader = BitReader::new(Cursor::new(vec![0x00, 0x01, 0b1011_0000, 0b1000_0000]));
        let err = HuffmanTree::read_from(&mut reader).unwrap_err();
        assert!(matches!(err, HuffpackError::ContainerMalformed { .. }));
    }

    #[test]
    fn test_rejects_oversized_leaf_count() {
        let mut reader = BitReader::new(Cursor::new(vec![0x01, 0x01]));
        let err = HuffmanTree::read_from(&mut reader).unwrap_err();
        assert!(matches!(err, HuffpackError::ContainerMalformed { .. }));
    }

    #[test]
    fn test_rejects_truncated_tree() {
        let mut bytes = serialize(&HuffmanTree::from_bytes(b"hello world"));
        bytes.truncate(4);
        let mut reader = BitReader::new(Cursor::new(bytes));
        let err = HuffmanTree::read_from(&mut reader).unwrap_err();
        assert!(matches!(err, HuffpackError::ContainerMalformed { .. }));
    }

    #[test]
    fn test_rejects_leaf_count_mismatch() {
        let mut bytes = serialize(&HuffmanTree::from_bytes(b"abcabcabd"));
        // Claim one more leaf than the preorder walk contains
        bytes[1] += 1;
        let mut reader = BitReader::new(Cursor::new(bytes));
        let err = HuffmanTree::read_from(&mut reader).unwrap_err();
        assert!(matches!(err, HuffpackError::ContainerMalformed { .. }));
    }

    #[test]
    fn test_rejects_duplicate_leaf() {
        // 0 | 1 01100001 | 1 01100001
        let mut writer = BitWriter::new(Vec::new());
        writer.write_u16_be(2).unwrap();
        writer.write_bit(false).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bits(b'a' as u64, 8).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bits(b'a' as u64, 8).unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(bytes));
        let err = HuffmanTree::read_from(&mut reader).unwrap_err();
        assert!(err.to_string().contains("more than one leaf"));
    }

    #[test]
    fn test_rejects_runaway_internal_nodes() {
        // Declares 2 leaves, then only internal-node tags
        let mut reader = BitReader::new(Cursor::new(vec![0x00, 0x02, 0x00, 0x00]));
        let err = HuffmanTree::read_from(&mut reader).unwrap_err();
        assert!(matches!(err, HuffpackError::ContainerMalformed { .. }));
    }
}
