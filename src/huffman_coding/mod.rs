//! The huffman_coding module builds prefix codes for huffzip.
//!
//! One tree is built per file from the byte frequencies of the whole input. The
//! merge order is total (weight, then subtree depth, then byte value, then age),
//! so the same frequency table always produces the same tree and the same codes.
//!
//! - node: tree nodes and the merge order.
//! - tree: construction, code tables, (de)serialization, encoding and decoding.
//!
pub mod node;
pub mod tree;
