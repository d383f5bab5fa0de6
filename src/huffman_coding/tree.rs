//! The Huffman tree: construction, code tables, serialization and decoding.
//!
//! A tree is built either from a frequency table (compression) or from its own
//! serialized bit stream (decompression). Once built it never changes; the
//! forward (byte to code) and reverse (code to byte) tables are derived right
//! away.
//!
//! Codes come from a depth first walk: a left edge adds a 0 bit, a right edge a
//! 1 bit. Since every symbol sits in its own leaf the code set is prefix free.
//!
//! Serialized form (preorder):
//! - leaf: a 1 bit followed by the 8 bit symbol, most significant bit first
//! - internal node: a 0 bit, then the left subtree, then the right subtree
//!
//! An input with a single distinct byte gets a synthetic root with only a left
//! child, so the byte still gets the one bit code `0`. Its serialized form simply
//! ends after the leaf.

use std::collections::BinaryHeap;
use std::fmt::{Display, Formatter};

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::node::{Candidate, NodeData, SymbolNode};
use crate::bitstream::bitcursor::BitCursor;
use crate::bitstream::bitvec::BitVec;
use crate::error::{HuffError, Result};
use crate::tools::freq_count::freqs;

/// Deepest level a node may sit at. 256 leaves can never be deeper than this.
const MAX_LEVEL: usize = 255;

/// How a payload is turned back into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeStrategy {
    /// Walk the tree one bit at a time.
    #[default]
    TreeWalk,
    /// Accumulate bits and look them up in the reverse code table.
    Table,
}

/// Node ordering for [`HuffmanTree::to_traversal_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Preorder,
    Inorder,
    Postorder,
}

/// Size figures for one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeStats {
    /// Count of input bytes.
    pub symbols: usize,
    pub original_bits: u64,
    pub encoded_bits: u64,
}

impl EncodeStats {
    /// 1 - encoded/original, or 0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_bits == 0 {
            return 0.0;
        }
        1.0 - self.encoded_bits as f64 / self.original_bits as f64
    }
}

impl Display for EncodeStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Symbols:        {}", self.symbols)?;
        writeln!(f, "Original size:  {} bits", self.original_bits)?;
        writeln!(f, "Encoded size:   {} bits", self.encoded_bits)?;
        writeln!(f, "Encoding ratio: {:.2}%", self.ratio() * 100.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    root: Option<SymbolNode>,
    codes: FxHashMap<u8, BitVec>,
    reverse_codes: FxHashMap<BitVec, u8>,
    /// Length of the longest code, bounds table decoding.
    max_code_len: usize,
}

impl HuffmanTree {
    /// Build a tree from the byte frequencies of `data`.
    pub fn from_bytes(data: &[u8]) -> HuffmanTree {
        HuffmanTree::from_frequencies(&freqs(data))
    }

    /// Build a tree from a frequency table. Symbols with a count of zero are left out.
    pub fn from_frequencies(freqs: &[u64; 256]) -> HuffmanTree {
        let tree = HuffmanTree::with_root(build_tree(freqs));
        debug!(
            "Built tree with {} symbols, depth {}.",
            tree.symbol_count(),
            tree.depth()
        );
        trace!("Code table:\n{}", tree.code_table());
        tree
    }

    /// Rebuild a tree from its serialized form. An empty stream is the empty tree.
    pub fn from_bits(bits: &BitVec) -> Result<HuffmanTree> {
        if bits.is_empty() {
            return Ok(HuffmanTree::with_root(None));
        }
        let mut br = BitCursor::new(bits);
        let mut seen = [false; 256];
        let root = read_root(&mut br, &mut seen)?;
        if !br.is_done() {
            return Err(HuffError::Structure(format!(
                "{} unused bit(s) after the tree at {}",
                br.remaining(),
                br.loc()
            )));
        }
        let tree = HuffmanTree::with_root(Some(root));
        debug!(
            "Read tree with {} symbols from {} header bits.",
            tree.symbol_count(),
            bits.len()
        );
        Ok(tree)
    }

    fn with_root(root: Option<SymbolNode>) -> HuffmanTree {
        let mut tree = HuffmanTree {
            root,
            ..Default::default()
        };
        if let Some(root) = &tree.root {
            generate_codes(root, BitVec::new(), &mut tree.codes, &mut tree.reverse_codes);
        }
        tree.max_code_len = tree.codes.values().map(|c| c.len()).max().unwrap_or(0);
        tree
    }

    /// Serialize the tree (preorder). The empty tree serializes to no bits.
    pub fn to_bits(&self) -> BitVec {
        let mut buffer = BitVec::new();
        if let Some(root) = &self.root {
            serialize_node(root, &mut buffer);
        }
        buffer
    }

    pub fn root(&self) -> Option<&SymbolNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Count of distinct symbols (leaves).
    pub fn symbol_count(&self) -> usize {
        self.codes.len()
    }

    pub fn depth(&self) -> u32 {
        self.root.as_ref().map_or(0, |r| r.depth())
    }

    /// Code for one symbol, if it is in the tree.
    pub fn code(&self, symbol: u8) -> Option<&BitVec> {
        self.codes.get(&symbol)
    }

    /// All (symbol, code) pairs, ascending by symbol.
    pub fn codes(&self) -> Vec<(u8, &BitVec)> {
        let mut list: Vec<(u8, &BitVec)> = self.codes.iter().map(|(&s, c)| (s, c)).collect();
        list.sort_unstable_by_key(|&(s, _)| s);
        list
    }

    /// Concatenate the code of every input byte.
    pub fn encode(&self, data: &[u8]) -> Result<BitVec> {
        let mut out = BitVec::with_capacity(data.len() * self.max_code_len.max(1) / 2);
        for &byte in data {
            let code = self.codes.get(&byte).ok_or(HuffError::UnboundSymbol(byte))?;
            out.extend_from(code);
        }
        Ok(out)
    }

    /// Encode and report the before/after sizes.
    pub fn encode_with_stats(&self, data: &[u8]) -> Result<(BitVec, EncodeStats)> {
        let encoded = self.encode(data)?;
        let stats = EncodeStats {
            symbols: data.len(),
            original_bits: data.len() as u64 * 8,
            encoded_bits: encoded.len() as u64,
        };
        Ok((encoded, stats))
    }

    pub fn decode_with(&self, bits: &BitVec, strategy: DecodeStrategy) -> Result<Vec<u8>> {
        match strategy {
            DecodeStrategy::TreeWalk => self.decode(bits),
            DecodeStrategy::Table => self.decode_with_table(bits),
        }
    }

    /// Decode by walking the tree from the root for every symbol.
    pub fn decode(&self, bits: &BitVec) -> Result<Vec<u8>> {
        let root = match &self.root {
            Some(root) => root,
            None if bits.is_empty() => return Ok(Vec::new()),
            None => {
                return Err(HuffError::Structure(format!(
                    "{} payload bit(s) but the tree is empty",
                    bits.len()
                )))
            }
        };
        // A bare leaf has no branches: every bit stands for one copy of it.
        if let NodeData::Leaf(sym) = root.node_data {
            return Ok(vec![sym; bits.len()]);
        }

        let mut result = Vec::with_capacity(bits.len() / self.max_code_len.max(1));
        let mut br = BitCursor::new(bits);
        while !br.is_done() {
            let mut node = root;
            loop {
                match &node.node_data {
                    NodeData::Leaf(sym) => {
                        result.push(*sym);
                        break;
                    }
                    NodeData::Kids(left, right) => {
                        let bit = br.bit().ok_or_else(|| {
                            HuffError::Structure(format!(
                                "payload ended mid-symbol after {} bits",
                                bits.len()
                            ))
                        })?;
                        let next = if bit { right } else { left };
                        node = next.as_deref().ok_or_else(|| {
                            HuffError::Structure(format!(
                                "bit {} leads to a missing branch",
                                br.position() - 1
                            ))
                        })?;
                    }
                }
            }
        }
        Ok(result)
    }

    /// Decode by matching accumulated bits against the reverse code table.
    pub fn decode_with_table(&self, bits: &BitVec) -> Result<Vec<u8>> {
        let mut result = Vec::with_capacity(bits.len() / self.max_code_len.max(1));
        let mut current = BitVec::with_capacity(self.max_code_len);
        for bit in bits {
            current.push(bit);
            if let Some(&sym) = self.reverse_codes.get(&current) {
                result.push(sym);
                current.clear();
            } else if current.len() >= self.max_code_len {
                // Longer than any code, so it can never match
                return Err(HuffError::IncompleteCode {
                    remaining: current.len(),
                });
            }
        }
        if !current.is_empty() {
            return Err(HuffError::IncompleteCode {
                remaining: current.len(),
            });
        }
        Ok(result)
    }

    /// One `[sym]:code` line per symbol, ascending by symbol.
    pub fn code_table(&self) -> String {
        self.codes()
            .iter()
            .map(|(sym, code)| format!("[{}]:{}\n", display_symbol(*sym), code))
            .collect()
    }

    /// Space separated node listing in the requested order. Leaves print as
    /// `[sym]` (or `[sym]:code`), internal nodes as `{weight}`.
    pub fn to_traversal_string(&self, order: Traversal, show_code: bool) -> String {
        let mut buffer = String::new();
        if let Some(root) = &self.root {
            self.traverse(root, order, show_code, &mut buffer);
        }
        buffer
    }

    fn traverse(&self, node: &SymbolNode, order: Traversal, show_code: bool, buffer: &mut String) {
        if order == Traversal::Preorder {
            buffer.push_str(&self.label(node, show_code));
            buffer.push(' ');
        }
        if let Some(left) = node.left() {
            self.traverse(left, order, show_code, buffer);
        }
        if order == Traversal::Inorder {
            buffer.push_str(&self.label(node, show_code));
            buffer.push(' ');
        }
        if let Some(right) = node.right() {
            self.traverse(right, order, show_code, buffer);
        }
        if order == Traversal::Postorder {
            buffer.push_str(&self.label(node, show_code));
            buffer.push(' ');
        }
    }

    /// Draw the tree with box characters, one node per line.
    pub fn render(&self, show_code: bool) -> String {
        let mut out = String::new();
        if let Some(root) = &self.root {
            self.render_node(root, "", false, show_code, &mut out);
        }
        out
    }

    fn render_node(&self, node: &SymbolNode, prefix: &str, is_left: bool, show_code: bool, out: &mut String) {
        out.push_str(prefix);
        out.push_str(if is_left { "├──" } else { "└──" });
        out.push_str(&self.label(node, show_code));
        out.push('\n');
        let child_prefix = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
        if let Some(left) = node.left() {
            self.render_node(left, &child_prefix, true, show_code, out);
        }
        if let Some(right) = node.right() {
            self.render_node(right, &child_prefix, false, show_code, out);
        }
    }

    fn label(&self, node: &SymbolNode, show_code: bool) -> String {
        match node.node_data {
            NodeData::Leaf(sym) => match self.codes.get(&sym) {
                Some(code) if show_code => format!("[{}]:{}", display_symbol(sym), code),
                _ => format!("[{}]", display_symbol(sym)),
            },
            NodeData::Kids(..) => format!("{{{}}}", node.weight),
        }
    }
}

impl Display for HuffmanTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(true))
    }
}

/// Printable ASCII as itself, anything else as two hex digits.
pub fn display_symbol(sym: u8) -> String {
    if (b' '..=b'~').contains(&sym) {
        (sym as char).to_string()
    } else {
        format!("{:02x}", sym)
    }
}

/// Merge the two highest priority candidates until one remains.
fn build_tree(freqs: &[u64; 256]) -> Option<SymbolNode> {
    let mut heap = BinaryHeap::with_capacity(256);
    let mut seq = 0_u32;
    for (sym, &weight) in freqs.iter().enumerate() {
        if weight > 0 {
            heap.push(Candidate::new(SymbolNode::leaf(sym as u8, weight), seq));
            seq += 1;
        }
    }

    if heap.len() == 1 {
        // Wrap a lone symbol so it still gets a one bit code
        return heap.pop().map(|only| SymbolNode::parent(Some(only.node), None));
    }

    while let Some(left) = heap.pop() {
        match heap.pop() {
            Some(right) => {
                heap.push(Candidate::merge(left, right, seq));
                seq += 1;
            }
            None => return Some(left.node),
        }
    }
    None
}

/// Recursively walk the tree recording the path to every leaf.
fn generate_codes(
    node: &SymbolNode,
    path: BitVec,
    codes: &mut FxHashMap<u8, BitVec>,
    reverse_codes: &mut FxHashMap<BitVec, u8>,
) {
    match &node.node_data {
        NodeData::Leaf(sym) => {
            let code = if path.is_empty() {
                std::iter::once(false).collect()
            } else {
                path
            };
            reverse_codes.insert(code.clone(), *sym);
            codes.insert(*sym, code);
        }
        NodeData::Kids(left, right) => {
            if let Some(left) = left {
                let mut left_path = path.clone();
                left_path.push(false);
                generate_codes(left, left_path, codes, reverse_codes);
            }
            if let Some(right) = right {
                let mut right_path = path;
                right_path.push(true);
                generate_codes(right, right_path, codes, reverse_codes);
            }
        }
    }
}

fn serialize_node(node: &SymbolNode, buffer: &mut BitVec) {
    match &node.node_data {
        NodeData::Leaf(sym) => {
            buffer.push(true);
            buffer.push_bits(u64::from(*sym), 8);
        }
        NodeData::Kids(left, right) => {
            buffer.push(false);
            if let Some(left) = left {
                serialize_node(left, buffer);
            }
            if let Some(right) = right {
                serialize_node(right, buffer);
            }
        }
    }
}

/// The root may be the single symbol shape: an internal node whose stream ends
/// right after a leaf left child.
fn read_root(br: &mut BitCursor<'_>, seen: &mut [bool; 256]) -> Result<SymbolNode> {
    match br.bit() {
        None => Err(HuffError::Structure("tree header is empty".to_string())),
        Some(true) => read_leaf(br, seen),
        Some(false) => {
            let left = read_node(br, seen, 1)?;
            if br.is_done() && left.is_leaf() {
                return Ok(SymbolNode::parent(Some(left), None));
            }
            let right = read_node(br, seen, 1)?;
            Ok(SymbolNode::parent(Some(left), Some(right)))
        }
    }
}

fn read_node(br: &mut BitCursor<'_>, seen: &mut [bool; 256], level: usize) -> Result<SymbolNode> {
    if level > MAX_LEVEL {
        return Err(HuffError::Structure(format!(
            "tree nests deeper than {} levels at {}",
            MAX_LEVEL,
            br.loc()
        )));
    }
    match br.bit() {
        None => Err(HuffError::Structure(format!(
            "tree header ended where a node was expected at {}",
            br.loc()
        ))),
        Some(true) => read_leaf(br, seen),
        Some(false) => {
            let left = read_node(br, seen, level + 1)?;
            let right = read_node(br, seen, level + 1)?;
            Ok(SymbolNode::parent(Some(left), Some(right)))
        }
    }
}

fn read_leaf(br: &mut BitCursor<'_>, seen: &mut [bool; 256]) -> Result<SymbolNode> {
    let sym = br.byte().ok_or_else(|| {
        HuffError::Structure(format!("tree header ended inside a leaf symbol at {}", br.loc()))
    })?;
    if seen[sym as usize] {
        return Err(HuffError::Structure(format!(
            "symbol {} appears in more than one leaf",
            display_symbol(sym)
        )));
    }
    seen[sym as usize] = true;
    Ok(SymbolNode::leaf(sym, 0))
}
