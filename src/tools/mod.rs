//! The tools module provides several helper functions for huffzip.
//!
//! The tools are:
//! - atomic_write: write an output file through a temporary file and rename it into place.
//! - cli: Command line interface for huffzip.
//! - freq_count: Byte frequency count.
//! - options: HuffOpts and CodecConfig, the settings compress and decompress run with.
//!
pub mod atomic_write;
pub mod cli;
pub mod freq_count;
pub mod options;
