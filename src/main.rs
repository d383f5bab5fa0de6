//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::process::ExitCode;

use huffzip::tools::cli::huffopts_init;
use huffzip::{compress, decompress, Mode};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    let options = huffopts_init();
    let (src, dst) = match (options.file.clone(), options.output_path()) {
        (Some(src), Some(dst)) => (src, dst),
        _ => {
            error!("No input file given.");
            return ExitCode::FAILURE;
        }
    };

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress(&src, &dst, &options),
        Mode::Unzip => decompress(&src, &dst, &options),
    };

    match result {
        Ok(_) => {
            info!("Done.\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
