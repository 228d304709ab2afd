use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::queue::WeightQueue;

pub type Symbol = u8;

/// Number of distinct symbols, one per byte value.
pub const SYMBOL_COUNT: usize = 256;

/// Occurrence count per symbol. Symbols that never occur have no entry.
pub type FreqTable = BTreeMap<Symbol, u64>;

/// Path from the root to a leaf, `false` for left and `true` for right.
pub type Code = Vec<bool>;

pub type CodeTable = BTreeMap<Symbol, Code>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Leaf {
        byte: Symbol,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { byte, .. } => Some(*byte),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf { byte, freq } => write!(f, "{:#04x}:{}", byte, freq),
            Node::Internal { freq, left, right } => write!(f, "({} {} {})", freq, left, right),
        }
    }
}

pub type HuffmanTree = Node;

/// Counts every byte of `data` in a single pass.
pub fn count_frequencies(data: &[u8]) -> FreqTable {
    let mut counts = [0u64; SYMBOL_COUNT];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(byte, &count)| (byte as Symbol, count))
        .collect()
}

pub fn entropy_from_freq(freq: &FreqTable) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total
    );
    entropy
}

/// Greedy Huffman merge over the given frequencies.
///
/// Leaves enter the queue in ascending symbol order and equal weights leave
/// it first-in first-out, so the same table always yields the same tree. Of
/// each extracted pair the first node becomes the right child and the second
/// the left child. A table with one symbol yields a lone leaf.
pub fn build_huffman_tree(frequencies: &FreqTable) -> Result<HuffmanTree> {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );

    let mut queue = WeightQueue::new(Node::weight);
    queue.extend(
        frequencies
            .iter()
            .filter(|&(_, &freq)| freq > 0)
            .map(|(&byte, &freq)| Node::Leaf { byte, freq }),
    );
    debug!("Initial queue size: {}", queue.len());

    while queue.len() > 1 {
        let (Some(right), Some(left)) = (queue.pop(), queue.pop()) else {
            break;
        };

        queue.push(Node::Internal {
            freq: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        });
    }

    let root = queue.pop().ok_or(Error::NoData)?;
    debug!("Tree construction complete, root weight {}", root.weight());
    Ok(root)
}

pub fn build_code_table(node: &Node, prefix: Code, table: &mut CodeTable) {
    match node {
        Node::Leaf { byte, .. } => {
            trace!("Assigning code to byte {:#04x}: {}", byte, CodeDisplay(&prefix));
            table.insert(*byte, prefix);
        }
        Node::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            build_code_table(left, left_prefix, table);

            let mut right_prefix = prefix;
            right_prefix.push(true);
            build_code_table(right, right_prefix, table);
        }
    }
}

/// Code table for a whole tree. A tree made of a single leaf gets the one
/// bit code `0`, an empty code could not be told apart in the bitstream.
pub fn code_table_from_tree(root: &HuffmanTree) -> CodeTable {
    let mut table = CodeTable::new();
    match root {
        Node::Leaf { byte, .. } => {
            trace!("Single symbol {:#04x} gets code 0", byte);
            table.insert(*byte, vec![false]);
        }
        Node::Internal { .. } => build_code_table(root, Code::new(), &mut table),
    }
    table
}

/// Renders a code as a string of `0` and `1`.
pub struct CodeDisplay<'a>(pub &'a [bool]);

impl fmt::Display for CodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
