use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info};

use super::container::Container;
use super::report::Report;
use crate::error::{HuffError, Result};
use crate::huffman_coding::tree::{DecodeStrategy, HuffmanTree};
use crate::tools::atomic_write::write_atomic;
use crate::tools::options::HuffOpts;

/// Decompress the container file `src` into `dst`.
pub fn decompress(src: &Path, dst: &Path, opts: &HuffOpts) -> Result<Report> {
    // Look for the right file ending before opening anything
    opts.config.check_container(src)?;
    opts.check_destination(dst)?;

    info!("Decompressing {} into {}.", src.display(), dst.display());
    let raw = fs::read(src).map_err(|e| HuffError::io(src, e))?;

    let (tree, decoded) = unpack(&raw, opts.strategy)?;
    if opts.show_tree {
        println!("{}", tree.render(true));
    }

    write_atomic(dst, |w| w.write_all(&decoded))?;
    info!("Wrote {} bytes.", decoded.len());

    let report = Report::new(raw.len() as u64, decoded.len() as u64, None);
    if opts.show_rate {
        println!("{}", report);
    }
    Ok(report)
}

/// Decompress container bytes held in memory.
pub fn decompress_bytes(raw: &[u8], strategy: DecodeStrategy) -> Result<Vec<u8>> {
    unpack(raw, strategy).map(|(_, decoded)| decoded)
}

fn unpack(raw: &[u8], strategy: DecodeStrategy) -> Result<(HuffmanTree, Vec<u8>)> {
    let container = Container::parse(raw)?;
    debug!(
        "Container holds {} tree bits and {} payload bits.",
        container.tree.len(),
        container.payload.len()
    );
    let tree = HuffmanTree::from_bits(&container.tree)?;
    let decoded = tree.decode_with(&container.payload, strategy)?;
    debug!("Decoded {} bytes using {:?}.", decoded.len(), strategy);
    Ok((tree, decoded))
}
