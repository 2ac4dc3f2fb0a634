//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use clap::Parser;
use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use parbwt::pipeline::orchestrator::{decode_file, encode_file};
use parbwt::tools::cli::{self, Args};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let args = Args::parse();

    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        cli::log_level(args.v),
        Config::default(),
        TerminalMode::Stdout,
        ColorChoice::AlwaysAnsi,
    )
    .unwrap();

    if args.block_size == 0 {
        error!("Block size must be greater than 0.");
        std::process::exit(1);
    }

    //----- Figure out what we need to do and go do it
    let result = if args.decode {
        info!("Restoring {} into {}.", args.input, args.output);
        decode_file(&args.input, &args.output, args.block_size)
    } else {
        info!("Transforming {} into {}.", args.input, args.output);
        encode_file(&args.input, &args.output, args.block_size, args.threads)
    };

    match result {
        Ok(()) => info!("Done.\n"),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
