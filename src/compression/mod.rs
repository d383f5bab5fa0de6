//! The compression module manages whole-file compression and decompression for huffzip.
//!
//! Compression happens in the following steps:
//! - Read the entire source into memory and count byte frequencies.
//! - Build one Huffman tree from those frequencies.
//! - Serialize the tree into the container header.
//! - Encode every byte with its code into the payload.
//! - Write both sections to a temporary file and rename it over the destination.
//!
//! Decompression follows the inverse of the compression process.
//! - Parse the container, validating every declared size before allocating.
//! - Rebuild the tree from the header bits.
//! - Decode the payload, by walking the tree or through the reverse code table.
//!
//! Everything is single threaded and works on one in-memory buffer per file.
//!

pub mod compress;
pub mod container;
pub mod decompress;
pub mod report;
