use std::path::PathBuf;

use clap::Parser;
use log::info;

use super::options::{HuffOpts, Mode};
use crate::huffman_coding::tree::DecodeStrategy;

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A Huffman coding file compressor",
    long_about = "
    Compresses a file with a single Huffman tree built from its byte frequencies.
    The tree is stored in front of the encoded data, so every .huff file can be
    decompressed on its own."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform compression on the input file
    #[clap(short = 'z', long = "zip")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Write the result here instead of next to the input
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Show compression figures
    #[clap(short = 'r', long = "rate")]
    rate: bool,

    /// Print the Huffman tree
    #[clap(short = 't', long = "tree")]
    tree: bool,

    /// Decode with the code table instead of walking the tree
    #[clap(long = "table")]
    table: bool,

    ///Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,

    /// Displays license information
    #[clap(short = 'L', long)]
    license: bool,
}

fn license() -> String {
    "
huffzip, a Huffman coding file compressor.

This program is free software; you can redistribute it and/or modify
it under the terms of the MIT license.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
"
    .to_string()
}

/// Parse the process arguments into HuffOpts and set the log level.
pub fn huffopts_init() -> HuffOpts {
    init_huff_opts(Args::parse())
}

/// Put command line information from CLAP into our internal structure.
pub fn init_huff_opts(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();
    let file = PathBuf::from(&args.filename);

    // Explicit flags win, otherwise go by the file name
    opts.op_mode = if args.decompress {
        Mode::Unzip
    } else if args.compress || !opts.config.is_container(&file) {
        Mode::Zip
    } else {
        Mode::Unzip
    };
    opts.file = Some(file);
    opts.output = args.output.map(PathBuf::from);
    opts.show_rate = args.rate;
    opts.show_tree = args.tree;
    opts.force_overwrite = args.force;
    if args.table {
        opts.strategy = DecodeStrategy::Table
    };

    // Set the log level
    match args.v {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    if args.license {
        println!("{}", license())
    };

    // Below we report initialization status to the user
    info!("---- huffzip Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if let Some(out) = opts.output_path() {
        info!("Writing output to {}", out.display());
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.strategy == DecodeStrategy::Table {
        info!("Using table driven decoding")
    };
    info!("---- huffzip Initialization End ----\n");
    opts
}

#[cfg(test)]
mod test {
    use super::{init_huff_opts, Args};
    use crate::huffman_coding::tree::DecodeStrategy;
    use crate::tools::options::Mode;
    use clap::Parser;
    use std::path::PathBuf;

    fn opts(argv: &[&str]) -> crate::tools::options::HuffOpts {
        init_huff_opts(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn mode_from_name_test() {
        let o = opts(&["huffzip", "notes.txt"]);
        assert_eq!(o.op_mode, Mode::Zip);
        assert_eq!(o.output_path(), Some(PathBuf::from("notes.txt.huff")));

        let o = opts(&["huffzip", "notes.txt.huff"]);
        assert_eq!(o.op_mode, Mode::Unzip);
        assert_eq!(o.output_path(), Some(PathBuf::from("notes.txt")));

        // Forced compression of something that already looks like a container
        let o = opts(&["huffzip", "-z", "notes.txt.huff"]);
        assert_eq!(o.op_mode, Mode::Zip);
    }

    #[test]
    fn flags_test() {
        let o = opts(&["huffzip", "-d", "-r", "-t", "--table", "-f", "-o", "out.bin", "a.huff"]);
        assert_eq!(o.op_mode, Mode::Unzip);
        assert!(o.show_rate && o.show_tree && o.force_overwrite);
        assert_eq!(o.strategy, DecodeStrategy::Table);
        assert_eq!(o.output_path(), Some(PathBuf::from("out.bin")));
    }

    #[test]
    fn conflicting_modes_test() {
        assert!(Args::try_parse_from(["huffzip", "-z", "-d", "a.txt"]).is_err());
        assert!(Args::try_parse_from(["huffzip"]).is_err());
    }

    #[test]
    fn license_flag_test() {
        let args = Args::try_parse_from(["huffzip", "-L", "a.txt"]).unwrap();
        assert!(args.license);
        assert!(super::license().contains("huffzip"));
    }
}
