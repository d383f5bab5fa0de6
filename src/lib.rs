//! huffzip: a Huffman coding file compressor.
//!
//! One Huffman tree is built per file from the byte frequencies of the whole
//! input. The serialized tree and the encoded data are stored together in a
//! `.huff` container, so every container can be decompressed on its own.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffzip -r notes.txt`
//!
//! This will compress the file, create notes.txt.huff and print the sizes.
//! `$> huffzip notes.txt.huff` restores notes.txt.
//!
//! From code:
//!
//! ```no_run
//! use huffzip::{compress, decompress, HuffOpts};
//! use std::path::Path;
//!
//! let opts = HuffOpts::new();
//! compress(Path::new("notes.txt"), Path::new("notes.txt.huff"), &opts)?;
//! decompress(Path::new("notes.txt.huff"), Path::new("notes.copy"), &opts)?;
//! # Ok::<(), huffzip::HuffError>(())
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use bitstream::bitvec::{BitVec, Radix};
pub use compression::compress::{compress, compress_bytes};
pub use compression::decompress::{decompress, decompress_bytes};
pub use compression::report::Report;
pub use error::{HuffError, Result};
pub use huffman_coding::tree::{DecodeStrategy, HuffmanTree};
pub use tools::options::{CodecConfig, HuffOpts, Mode};
