use std::{fmt::Write, path::PathBuf};

use ccitt_mh::Encoder;
use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use log::info;

use crate::{pbm::parse_pbm, util::Hex};

#[derive(Parser, Debug)]
/// Options for encoding a bitmap
pub struct EncodeOpts {
    /// A PBM image (`P1` or `P4`)
    file: PathBuf,
    /// Where to write the encoded rows (default: `<file>.hex`)
    #[clap(short, long)]
    out: Option<PathBuf>,
    /// Put an EOL code in front of every row
    #[clap(long)]
    eol: bool,
}

/// Encode every row of the image and write one hex line per row
pub fn run(opt: EncodeOpts) -> eyre::Result<()> {
    let file = opt.file;
    let buffer =
        std::fs::read(&file).wrap_err_with(|| format!("Failed to read '{}'", file.display()))?;
    let image = parse_pbm(&buffer)?;
    info!("Loaded {}x{} bitmap", image.width, image.rows.len());

    let encoder = Encoder::new().eol(opt.eol);
    let mut out = String::new();
    let mut total = 0;
    for row in &image.rows {
        let bytes = encoder.encode(row);
        total += bytes.len();
        writeln!(out, "{}", Hex(&bytes))?;
    }
    info!(
        "Encoded {} rows into {} bytes ({} uncompressed)",
        image.rows.len(),
        total,
        (image.width + 7) / 8 * image.rows.len()
    );

    let out_path = opt.out.unwrap_or_else(|| file.with_extension("hex"));
    std::fs::write(&out_path, out)?;
    info!("Saved rows as '{}'", out_path.display());
    Ok(())
}
