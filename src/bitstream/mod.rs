//! The bitstream module holds the bit-level data structures used by huffzip.
//!
//! - bitvec: an exact-length bit vector, packed most significant bit first. Codes,
//!   the serialized tree and the encoded payload are all BitVecs.
//! - bitcursor: a sequential reader over a BitVec, used when rebuilding a tree
//!   from its serialized form and when decoding.
//!
pub mod bitcursor;
pub mod bitvec;
