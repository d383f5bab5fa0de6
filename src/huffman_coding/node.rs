//! Tree nodes and the merge order used to build a Huffman tree.

use std::cmp::Ordering;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    /// Internal node. Either child may be absent, which only happens for the
    /// synthetic root wrapped around a single symbol.
    Kids(Option<Box<SymbolNode>>, Option<Box<SymbolNode>>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SymbolNode {
    /// Frequency of the symbol, or the sum of the children's frequencies.
    pub weight: u64,
    pub node_data: NodeData,
}

impl SymbolNode {
    pub fn leaf(symbol: u8, weight: u64) -> SymbolNode {
        SymbolNode {
            weight,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Create an internal node weighing the sum of its children.
    pub fn parent(left: Option<SymbolNode>, right: Option<SymbolNode>) -> SymbolNode {
        let weight = left.as_ref().map_or(0, |n| n.weight) + right.as_ref().map_or(0, |n| n.weight);
        SymbolNode {
            weight,
            node_data: NodeData::Kids(left.map(Box::new), right.map(Box::new)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// Byte value of a leaf, None for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self.node_data {
            NodeData::Leaf(sym) => Some(sym),
            NodeData::Kids(..) => None,
        }
    }

    pub fn left(&self) -> Option<&SymbolNode> {
        match &self.node_data {
            NodeData::Kids(left, _) => left.as_deref(),
            NodeData::Leaf(_) => None,
        }
    }

    pub fn right(&self) -> Option<&SymbolNode> {
        match &self.node_data {
            NodeData::Kids(_, right) => right.as_deref(),
            NodeData::Leaf(_) => None,
        }
    }

    /// Leaves are depth 0; an internal node is one deeper than its deepest child.
    pub fn depth(&self) -> u32 {
        match &self.node_data {
            NodeData::Leaf(_) => 0,
            NodeData::Kids(left, right) => {
                let l = left.as_ref().map_or(0, |n| n.depth());
                let r = right.as_ref().map_or(0, |n| n.depth());
                1 + l.max(r)
            }
        }
    }

    /// Count of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Leaf(_) => 1,
            NodeData::Kids(left, right) => {
                left.as_ref().map_or(0, |n| n.leaf_count())
                    + right.as_ref().map_or(0, |n| n.leaf_count())
            }
        }
    }
}

/// A subtree waiting in the build queue, with the keys the merge order needs.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub node: SymbolNode,
    pub depth: u32,
    /// Creation order. Leaves are numbered first, in ascending byte order.
    pub seq: u32,
}

impl Candidate {
    pub fn new(node: SymbolNode, seq: u32) -> Candidate {
        let depth = node.depth();
        Candidate { node, depth, seq }
    }

    /// Merge two candidates: `first` becomes the left child.
    pub fn merge(first: Candidate, second: Candidate, seq: u32) -> Candidate {
        let depth = 1 + first.depth.max(second.depth);
        Candidate {
            node: SymbolNode::parent(Some(first.node), Some(second.node)),
            depth,
            seq,
        }
    }

    /// Byte used for tie-breaking. Internal nodes compare as 0.
    fn tie_symbol(&self) -> u8 {
        self.node.symbol().unwrap_or(0)
    }
}

/// Total merge order. Returns Greater when `a` should be merged before `b`:
/// lower weight first, then shallower subtree, then smaller byte value, then
/// the older candidate.
pub fn priority_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.node
        .weight
        .cmp(&a.node.weight)
        .then_with(|| b.depth.cmp(&a.depth))
        .then_with(|| b.tie_symbol().cmp(&a.tie_symbol()))
        .then_with(|| b.seq.cmp(&a.seq))
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        priority_order(self, other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    /// Highest priority sorts greatest, so a BinaryHeap pops it first.
    fn cmp(&self, other: &Self) -> Ordering {
        priority_order(self, other)
    }
}

#[cfg(test)]
mod test {
    use super::{priority_order, Candidate, SymbolNode};
    use std::cmp::Ordering;
    use std::collections::BinaryHeap;

    fn leaf(sym: u8, weight: u64, seq: u32) -> Candidate {
        Candidate::new(SymbolNode::leaf(sym, weight), seq)
    }

    #[test]
    fn weight_first_test() {
        let light = leaf(b'z', 1, 0);
        let heavy = leaf(b'a', 9, 1);
        assert_eq!(priority_order(&light, &heavy), Ordering::Greater);
        assert_eq!(priority_order(&heavy, &light), Ordering::Less);
    }

    #[test]
    fn depth_then_symbol_test() {
        let a = leaf(b'a', 2, 0);
        let b = leaf(b'b', 2, 1);
        // Same weight and depth: the smaller byte wins
        assert_eq!(priority_order(&a, &b), Ordering::Greater);

        let merged = Candidate::merge(leaf(b'c', 1, 2), leaf(b'd', 1, 3), 4);
        assert_eq!(merged.node.weight, 2);
        assert_eq!(merged.depth, 1);
        // Same weight, the leaf is shallower
        assert_eq!(priority_order(&b, &merged), Ordering::Greater);
    }

    #[test]
    fn internal_tie_test() {
        let older = Candidate::merge(leaf(1, 1, 0), leaf(2, 1, 1), 4);
        let newer = Candidate::merge(leaf(3, 1, 2), leaf(4, 1, 3), 5);
        assert_eq!(priority_order(&older, &newer), Ordering::Greater);
        assert_eq!(priority_order(&older, &older.clone()), Ordering::Equal);
    }

    #[test]
    fn heap_pop_order_test() {
        let mut heap = BinaryHeap::new();
        heap.push(leaf(b'c', 3, 2));
        heap.push(leaf(b'b', 1, 1));
        heap.push(leaf(b'a', 1, 0));
        heap.push(leaf(b'd', 2, 3));
        let order: Vec<u8> = std::iter::from_fn(|| heap.pop())
            .filter_map(|c| c.node.symbol())
            .collect();
        assert_eq!(order, b"abdc");
    }

    #[test]
    fn node_shape_test() {
        let root = SymbolNode::parent(
            Some(SymbolNode::leaf(b'x', 3)),
            Some(SymbolNode::parent(
                Some(SymbolNode::leaf(b'y', 1)),
                Some(SymbolNode::leaf(b'z', 1)),
            )),
        );
        assert_eq!(root.weight, 5);
        assert_eq!(root.depth(), 2);
        assert_eq!(root.leaf_count(), 3);
        assert!(!root.is_leaf());
        assert_eq!(root.left().and_then(|n| n.symbol()), Some(b'x'));

        let single = SymbolNode::parent(Some(SymbolNode::leaf(b'q', 7)), None);
        assert_eq!(single.weight, 7);
        assert_eq!(single.depth(), 1);
        assert!(single.right().is_none());
    }
}
