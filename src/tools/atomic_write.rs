use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{HuffError, Result};

/// Write a file through a temporary file in the same directory, then rename
/// it over `dst`. If anything fails the temporary file is removed and `dst`
/// is left untouched.
pub fn write_atomic<F>(dst: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| HuffError::io(dst, e))?;
    {
        let mut w = BufWriter::new(tmp.as_file_mut());
        write(&mut w).map_err(|e| HuffError::io(dst, e))?;
        w.flush().map_err(|e| HuffError::io(dst, e))?;
    }
    debug!("Moving {} into place at {}.", tmp.path().display(), dst.display());
    tmp.persist(dst).map_err(|e| HuffError::io(dst, e.error))?;
    Ok(())
}
