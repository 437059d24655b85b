use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

mod keymap;
mod run;

/// Runs a Chip-8 program.
///
/// Keys 1234/QWER/ASDF/ZXCV stand in for the hexadecimal keypad; Escape quits.
/// Set RUST_LOG (e.g. RUST_LOG=trace) to change how much is logged.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Size of each Chip-8 pixel in screen pixels
    #[arg(default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    let args = Args::parse();
    run::run(&args.rom, args.scale)
}
