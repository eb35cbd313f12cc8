//! # Modified Huffman scanline tool
//!
//! Converts between PBM bitmaps and rows compressed with the one-dimensional
//! coding of ITU-T T.4, stored as one hex string per row.
#![warn(missing_docs)]

mod cli;
mod pbm;
mod util;

use clap::Parser;
use color_eyre::eyre;

#[derive(Parser, Debug)]
#[clap(name = "mh-tool", version)]
/// Encode and decode bitmap rows with CCITT Modified Huffman
struct Options {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Compress the rows of a PBM image
    Encode(cli::encode::EncodeOpts),
    /// Decompress rows into a PBM image
    Decode(cli::decode::DecodeOpts),
}

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;
    match opt.cmd {
        Command::Encode(opt) => cli::encode::run(opt),
        Command::Decode(opt) => cli::decode::run(opt),
    }
}
