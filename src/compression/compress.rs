use std::fs;
use std::path::Path;

use log::{debug, info, trace};

use super::container::Container;
use super::report::Report;
use crate::error::{HuffError, Result};
use crate::huffman_coding::tree::{EncodeStats, HuffmanTree};
use crate::tools::atomic_write::write_atomic;
use crate::tools::options::HuffOpts;

/*
    Compression reads the whole source into memory, builds one Huffman tree
    from its byte frequencies, then writes the container: the serialized tree
    first, the encoded payload second.

    Output goes through a temporary file that is renamed into place only after
    everything was written, so a failure never leaves a truncated destination.
*/

/// Compress `src` into the container file `dst`.
pub fn compress(src: &Path, dst: &Path, opts: &HuffOpts) -> Result<Report> {
    // Cheap name checks before touching the file system
    opts.config.check_compressible(src)?;
    opts.check_destination(dst)?;

    info!("Compressing {} into {}.", src.display(), dst.display());
    let data = fs::read(src).map_err(|e| HuffError::io(src, e))?;
    debug!("Read {} bytes.", data.len());

    let (container, tree, stats) = pack(&data)?;
    if opts.show_tree {
        println!("{}", tree.render(true));
    }

    write_atomic(dst, |w| container.write_to(w))?;
    info!(
        "Wrote {} bytes ({} tree bits, {} payload bits).",
        container.encoded_len(),
        container.tree.len(),
        container.payload.len()
    );

    let report = Report::new(data.len() as u64, container.encoded_len(), Some(stats));
    if opts.show_rate {
        println!("{}", report);
    }
    Ok(report)
}

/// Compress a byte slice into container bytes without touching the file system.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let (container, _, _) = pack(data)?;
    Ok(container.to_bytes())
}

/// Build the tree for `data` and encode it into a container.
fn pack(data: &[u8]) -> Result<(Container, HuffmanTree, EncodeStats)> {
    let tree = HuffmanTree::from_bytes(data);
    let header = tree.to_bits();
    trace!("Tree header: {}", header);
    let (payload, stats) = tree.encode_with_stats(data)?;
    debug!(
        "Encoded {} symbols into {} bits with {} distinct codes.",
        stats.symbols,
        stats.encoded_bits,
        tree.symbol_count()
    );
    Ok((Container::new(header, payload), tree, stats))
}
