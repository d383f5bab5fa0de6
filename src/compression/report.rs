use std::fmt::{Display, Formatter};

use crate::huffman_coding::tree::EncodeStats;

/// Sizes seen by one compress or decompress call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Size of the file that was read, in bytes.
    pub source_size: u64,
    /// Size of the file that was written, in bytes.
    pub output_size: u64,
    /// Payload figures, available when compressing.
    pub stats: Option<EncodeStats>,
}

impl Report {
    pub fn new(source_size: u64, output_size: u64, stats: Option<EncodeStats>) -> Self {
        Self {
            source_size,
            output_size,
            stats,
        }
    }

    /// 1 - output/source. Negative when the output grew, 0 for an empty source.
    pub fn ratio(&self) -> f64 {
        if self.source_size == 0 {
            return 0.0;
        }
        1.0 - self.output_size as f64 / self.source_size as f64
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(stats) = &self.stats {
            write!(f, "{}", stats)?;
        }
        writeln!(f, "Source size:    {:.2} KB", self.source_size as f64 / 1024.0)?;
        writeln!(f, "Output size:    {:.2} KB", self.output_size as f64 / 1024.0)?;
        writeln!(f, "File ratio:     {:.2}%", self.ratio() * 100.0)
    }
}

#[cfg(test)]
mod test {
    use super::Report;

    #[test]
    fn ratio_test() {
        assert!((Report::new(2048, 512, None).ratio() - 0.75).abs() < 1e-9);
        assert!(Report::new(100, 150, None).ratio() < 0.0);
        assert_eq!(Report::new(0, 32, None).ratio(), 0.0);
    }

    #[test]
    fn display_test() {
        let text = Report::new(2048, 512, None).to_string();
        assert!(text.contains("Source size:    2.00 KB"));
        assert!(text.contains("Output size:    0.50 KB"));
        assert!(text.contains("75.00%"));
    }
}
