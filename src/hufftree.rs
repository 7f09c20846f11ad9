//! Huffman tree construction and its preorder wire form.
//!
//! Nodes live in a single arena and refer to their children by index, so the
//! tree is released in one deallocation and no traversal needs recursion.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

/// Index of a node inside its tree's arena
pub type NodeId = usize;

/// Preorder marker for an internal node
pub const INTERNAL_MARKER: u8 = b'0';
/// Preorder marker for a leaf; the symbol byte follows it
pub const LEAF_MARKER: u8 = b'1';

const MAX_LEAVES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        byte: u8,
    },
    Internal {
        weight: usize,
        left: NodeId,
        right: NodeId,
    },
}

impl HuffNode {
    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Heap entry used while merging.
///
/// Ordered by weight, then by arena index. Leaves are allocated first in
/// ascending symbol order and merged nodes are appended as they are created,
/// so equal weights resolve to lower symbol first, then leaves before merged
/// nodes, then older merged nodes before newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    weight: usize,
    id: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Count `bytes` on the calling thread and build a tree from the result.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::count(bytes))
    }

    /// Greedy minimum-weight merge over every non-zero symbol of `frequencies`.
    ///
    /// The first node popped becomes the left child (bit `0`), the second the
    /// right child (bit `1`). A table with one distinct symbol yields a tree
    /// whose root is that leaf; [`CodeTable`](crate::CodeTable) gives it the
    /// one-bit code `0`.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let distinct = frequencies.distinct();
        if distinct == 0 {
            return Err(HuffmanError::EmptyInput);
        }

        let mut nodes = Vec::with_capacity(2 * distinct - 1);
        nodes.extend(
            frequencies
                .iter()
                .map(|(byte, weight)| HuffNode::Leaf { weight, byte }),
        );

        let seeds = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Pending {
                weight: node.weight(),
                id,
            })
            .collect();
        let mut heap = MinHeap::build(seeds);

        while heap.heap_size() > 1 {
            let x = heap.extract_min().map_err(|_| HuffmanError::EmptyInput)?;
            let y = heap.extract_min().map_err(|_| HuffmanError::EmptyInput)?;

            let id = nodes.len();
            let weight = x.weight + y.weight;
            nodes.push(HuffNode::Internal {
                weight,
                left: x.id,
                right: y.id,
            });
            heap.insert(Pending { weight, id });
        }

        let root = heap.extract_min().map_err(|_| HuffmanError::EmptyInput)?.id;
        log::debug!(
            "built tree: {} leaves, {} nodes, weight {}",
            distinct,
            nodes.len(),
            nodes[root].weight()
        );

        Ok(HuffmanTree { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id]
    }

    pub fn root_is_leaf(&self) -> bool {
        self.nodes[self.root].is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path in edges.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                HuffNode::Leaf { .. } => max_depth = max_depth.max(depth),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Leaf symbols in left-to-right order.
    pub fn symbols(&self) -> Vec<u8> {
        self.preorder()
            .filter_map(|id| match &self.nodes[id] {
                HuffNode::Leaf { byte, .. } => Some(*byte),
                HuffNode::Internal { .. } => None,
            })
            .collect()
    }

    /// Same shape and same leaf symbols; weights are ignored.
    pub fn is_isomorphic(&self, other: &HuffmanTree) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            match (&self.nodes[a], &other.nodes[b]) {
                (HuffNode::Leaf { byte: x, .. }, HuffNode::Leaf { byte: y, .. }) => {
                    if x != y {
                        return false;
                    }
                }
                (
                    HuffNode::Internal {
                        left: la,
                        right: ra,
                        ..
                    },
                    HuffNode::Internal {
                        left: lb,
                        right: rb,
                        ..
                    },
                ) => {
                    stack.push((*ra, *rb));
                    stack.push((*la, *lb));
                }
                _ => return false,
            }
        }
        true
    }

    fn preorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            if let HuffNode::Internal { left, right, .. } = &self.nodes[id] {
                stack.push(*right);
                stack.push(*left);
            }
            Some(id)
        })
    }

    /// Preorder marker stream: `'0'` per internal node, `'1'` plus the symbol
    /// byte per leaf.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.nodes.len() + self.leaf_count());
        for id in self.preorder() {
            match &self.nodes[id] {
                HuffNode::Leaf { byte, .. } => {
                    bytes.push(LEAF_MARKER);
                    bytes.push(*byte);
                }
                HuffNode::Internal { .. } => bytes.push(INTERNAL_MARKER),
            }
        }
        bytes
    }

    /// Rebuild a tree from the front of `data`.
    ///
    /// Returns the tree and the number of bytes consumed. Reconstructed nodes
    /// carry zero weight. Unknown markers, truncation, duplicate symbols and
    /// more than 256 leaves are rejected as [`HuffmanError::MalformedTree`].
    pub fn deserialize(data: &[u8]) -> Result<(HuffmanTree, usize)> {
        let mut nodes: Vec<HuffNode> = Vec::new();
        // internal nodes still waiting for children, with "left is set"
        let mut open: Vec<(NodeId, bool)> = Vec::new();
        let mut seen = [false; MAX_LEAVES];
        let mut leaves = 0usize;
        let mut pos = 0usize;

        loop {
            let marker = *data
                .get(pos)
                .ok_or_else(|| HuffmanError::malformed_tree(pos, "unexpected end of tree"))?;

            let node = match marker {
                LEAF_MARKER => {
                    let byte = *data.get(pos + 1).ok_or_else(|| {
                        HuffmanError::malformed_tree(pos + 1, "leaf marker without symbol")
                    })?;
                    if seen[byte as usize] {
                        return Err(HuffmanError::malformed_tree(pos + 1, "duplicate leaf symbol"));
                    }
                    seen[byte as usize] = true;
                    leaves += 1;
                    pos += 2;
                    HuffNode::Leaf { weight: 0, byte }
                }
                INTERNAL_MARKER => {
                    if nodes.len() - leaves >= MAX_LEAVES - 1 {
                        return Err(HuffmanError::malformed_tree(pos, "too many internal nodes"));
                    }
                    pos += 1;
                    HuffNode::Internal {
                        weight: 0,
                        left: 0,
                        right: 0,
                    }
                }
                _ => return Err(HuffmanError::malformed_tree(pos, "unknown marker")),
            };

            let id = nodes.len();
            let is_internal = !node.is_leaf();
            nodes.push(node);

            if let Some((parent, left_set)) = open.last_mut() {
                let parent = *parent;
                if let HuffNode::Internal { left, right, .. } = &mut nodes[parent] {
                    if *left_set {
                        *right = id;
                        open.pop();
                    } else {
                        *left = id;
                        *left_set = true;
                    }
                }
            }

            if is_internal {
                open.push((id, false));
            } else if open.is_empty() {
                break;
            }
        }

        log::trace!("deserialized tree: {} leaves from {} bytes", leaves, pos);
        Ok((HuffmanTree { nodes, root: 0 }, pos))
    }

    /// Indented dump of the tree, one node per line.
    pub fn describe(&self) -> String {
        let mut out = String::from("Huffman Tree Structure:\n");
        let mut stack = vec![(self.root, 0usize, "root")];
        while let Some((id, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match &self.nodes[id] {
                HuffNode::Leaf { byte, weight } => {
                    let _ = writeln!(
                        out,
                        "{}{}-> Leaf: {:?} ({}) [weight: {}]",
                        indent, label, *byte as char, byte, weight
                    );
                }
                HuffNode::Internal {
                    weight,
                    left,
                    right,
                } => {
                    let _ = writeln!(out, "{}{}-> Internal [weight: {}]", indent, label, weight);
                    stack.push((*right, depth + 1, "R"));
                    stack.push((*left, depth + 1, "L"));
                }
            }
        }
        out
    }
}
