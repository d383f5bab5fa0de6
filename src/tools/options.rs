/// huffzip options - the structs callers fill in to drive compress and decompress
use std::path::{Path, PathBuf};
use std::{fmt::Display, fmt::Formatter};

use crate::error::{HuffError, Result};
use crate::huffman_coding::tree::DecodeStrategy;

/// File endings that usually hold data which is already compressed.
pub const DEFAULT_DENY_LIST: [&str; 18] = [
    ".zip", ".rar", ".7z", ".gz", ".tar", ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".mp3", ".mp4",
    ".avi", ".mkv", ".pdf", ".docx", ".xlsx", ".pptx",
];

/// Extension of huffzip containers.
pub const DEFAULT_EXTENSION: &str = ".huff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Zip or Unzip
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// File name rules of the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Source endings compress refuses. Matched case-insensitively.
    pub deny_list: Vec<String>,
    /// Ending a source must carry for decompress, and the default ending for compress output.
    pub extension: String,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self {
            deny_list: DEFAULT_DENY_LIST.iter().map(|s| s.to_string()).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Fail with FormatRejected when `path` looks already compressed.
    pub fn check_compressible(&self, path: &Path) -> Result<()> {
        match self.deny_list.iter().find(|ext| ends_with(path, ext)) {
            Some(ext) => Err(HuffError::rejected(
                path,
                format!("{} files are already compressed", ext),
            )),
            None => Ok(()),
        }
    }

    /// Fail with FormatRejected unless `path` carries the container extension.
    pub fn check_container(&self, path: &Path) -> Result<()> {
        if self.is_container(path) {
            Ok(())
        } else {
            Err(HuffError::rejected(
                path,
                format!("expected a {} file", self.extension),
            ))
        }
    }

    pub fn is_container(&self, path: &Path) -> bool {
        ends_with(path, &self.extension)
    }

    /// `path` with the container extension appended.
    pub fn container_path(&self, path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(&self.extension);
        PathBuf::from(name)
    }

    /// `path` with the container extension removed, or with `.out` appended when
    /// it has no such extension (or nothing would be left).
    pub fn restored_path(&self, path: &Path) -> PathBuf {
        let text = path.to_string_lossy();
        let cut = text.len().saturating_sub(self.extension.len());
        if self.is_container(path) && cut > 0 && text.is_char_boundary(cut) {
            let stem = &text[..cut];
            if !stem.ends_with('/') && !stem.ends_with('\\') {
                return PathBuf::from(stem);
            }
        }
        let mut name = path.as_os_str().to_os_string();
        name.push(".out");
        PathBuf::from(name)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn ends_with(path: &Path, ext: &str) -> bool {
    !ext.is_empty()
        && path
            .to_string_lossy()
            .to_lowercase()
            .ends_with(&ext.to_lowercase())
}

#[derive(Debug, Clone)]
/// Defines all user settable options to control program behavior
pub struct HuffOpts {
    /// Compress or decompress
    pub op_mode: Mode,
    /// Optional name of file to read for input
    pub file: Option<PathBuf>,
    /// Optional name of file to write, derived from the input when absent
    pub output: Option<PathBuf>,
    /// Print size figures after the operation
    pub show_rate: bool,
    /// Print the Huffman tree
    pub show_tree: bool,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Decoder used when decompressing
    pub strategy: DecodeStrategy,
    /// File name rules
    pub config: CodecConfig,
}

impl HuffOpts {
    /// Instanciated on program start - sets default parameters
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Zip,
            file: None,
            output: None,
            show_rate: false,
            show_tree: false,
            force_overwrite: false,
            strategy: DecodeStrategy::TreeWalk,
            config: CodecConfig::new(),
        }
    }

    /// Destination for the current mode: the explicit output, or one derived from the input.
    pub fn output_path(&self) -> Option<PathBuf> {
        if let Some(out) = &self.output {
            return Some(out.clone());
        }
        let file = self.file.as_ref()?;
        Some(match self.op_mode {
            Mode::Zip => self.config.container_path(file),
            Mode::Unzip => self.config.restored_path(file),
        })
    }

    /// Refuse to replace an existing file unless forced.
    pub fn check_destination(&self, dst: &Path) -> Result<()> {
        if !self.force_overwrite && dst.exists() {
            return Err(HuffError::io(
                dst,
                std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "output exists (use --force to overwrite)",
                ),
            ));
        }
        Ok(())
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}
