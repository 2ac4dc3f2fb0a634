//! Command line interface, via the external CLAP crate.

use clap::Parser;
use log::LevelFilter;

/// Default block size for the forward transform. Each block costs its own
/// delimiter byte in the output, so very small blocks inflate the stream.
pub const DEFAULT_BLOCK_SIZE: usize = 65536;

#[derive(Parser, Debug)]
#[clap(
    name = "parbwt",
    version,
    about = "A block-parallel Burrows-Wheeler transform tool",
    long_about = "
    Applies the Burrows-Wheeler Transform to a file in fixed-size blocks,
    spreading the blocks over a pool of worker threads while keeping the
    output in strict block order. The transform is fully reversible; run
    with -d to restore the original file.

    The transformed file starts with one byte naming the delimiter (a byte
    value that never occurs in the input), followed by one transformed
    chunk of block_size + 1 bytes per input block."
)]
pub struct Args {
    /// File to transform (or to restore, with -d)
    pub input: String,

    /// File to write the result to
    pub output: String,

    /// Reverse the transform instead of applying it
    #[clap(short = 'd', long = "decode")]
    pub decode: bool,

    /// Block size in bytes
    #[clap(short = 'b', long = "block-size", default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Worker threads for the forward transform. 0 means one per core
    #[clap(short = 't', long = "threads", default_value_t = 0)]
    pub threads: usize,

    /// Sets verbosity. -v0 shows nothing, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    pub v: u8,
}

/// Map the -v level onto the log filter.
pub fn log_level(v: u8) -> LevelFilter {
    match v {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
