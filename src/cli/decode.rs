use std::path::PathBuf;

use ccitt_mh::{ascii_art, BitRow, DecodeOptions, Decoder, ASCII, UNICODE};
use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use log::{info, warn};

use crate::{pbm::write_pbm, util::parse_hex};

#[derive(Parser, Debug)]
/// Options for decoding rows
pub struct DecodeOpts {
    /// A text file with one hex encoded row per line
    file: PathBuf,
    /// Require every row to have exactly this width
    #[clap(short, long)]
    width: Option<usize>,
    /// Where to write the PBM image (default: `<file>.pbm`)
    #[clap(short, long)]
    out: Option<PathBuf>,
    /// Print the rows to the console
    #[clap(short, long)]
    print: bool,
    /// Invert black and white when printing
    #[clap(short, long)]
    invert: bool,
    /// Only use ASCII characters when printing
    #[clap(short, long)]
    ascii: bool,
    /// Replace corrupt rows with white rows instead of stopping
    #[clap(long)]
    blank_on_error: bool,
}

/// Decode all rows of a file
///
/// Returns the rows and the indices of the rows that failed to decode. These
/// are left empty.
fn decode_rows(
    text: &str,
    decoder: &Decoder,
    blank_on_error: bool,
) -> eyre::Result<(Vec<BitRow>, Vec<usize>)> {
    let mut rows = Vec::new();
    let mut blanks = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let bytes =
            parse_hex(line).wrap_err_with(|| format!("Invalid hex at line {}", index + 1))?;
        match decoder.decode(&bytes) {
            Ok(row) => rows.push(row),
            Err(e) if blank_on_error => {
                warn!("corrupt compressed data at row {}: {}", index, e);
                blanks.push(index);
                rows.push(BitRow::new());
            }
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("corrupt compressed data at row {}", index))
            }
        }
    }
    Ok((rows, blanks))
}

/// Decode every line of the file and save the rows as an image
pub fn run(opt: DecodeOpts) -> eyre::Result<()> {
    let file = opt.file;
    let text = std::fs::read_to_string(&file)
        .wrap_err_with(|| format!("Failed to read '{}'", file.display()))?;

    let options = match opt.width {
        Some(width) => DecodeOptions::strict(width),
        None => DecodeOptions::default(),
    };
    let decoder = Decoder::new(options);
    let (mut rows, blanks) = decode_rows(&text, &decoder, opt.blank_on_error)?;

    let width = opt
        .width
        .unwrap_or_else(|| rows.iter().map(BitRow::width).max().unwrap_or(0));
    for &index in &blanks {
        rows[index] = BitRow::with_width(width);
    }
    info!("Decoded {} rows of width {}", rows.len(), width);
    if !blanks.is_empty() {
        warn!("Replaced {} corrupt rows with white rows", blanks.len());
    }

    if opt.print {
        let style = if opt.ascii { ASCII } else { UNICODE };
        let mut out = String::new();
        ascii_art(&mut out, style, &rows, width, opt.invert)?;
        print!("{}", out);
    }

    if opt.out.is_some() || !opt.print {
        let out_path = opt.out.unwrap_or_else(|| file.with_extension("pbm"));
        let mut buffer = Vec::new();
        write_pbm(&mut buffer, &rows, width)?;
        std::fs::write(&out_path, buffer)?;
        info!("Saved image as '{}'", out_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::decode_rows;
    use ccitt_mh::{encode_row, BitRow, Color, DecodeOptions, Decoder};

    use crate::util::Hex;

    fn text(rows: &[BitRow]) -> String {
        rows.iter()
            .map(|row| format!("{}\n", Hex(&encode_row(row))))
            .collect()
    }

    #[test]
    fn test_decode_rows() {
        let mut mixed = BitRow::new();
        mixed.push_run(Color::White, 3);
        mixed.push_run(Color::Black, 5);
        let rows = vec![BitRow::with_width(8), mixed, BitRow::new()];
        let (decoded, blanks) = decode_rows(&text(&rows), &Decoder::default(), false).unwrap();
        assert_eq!(decoded, rows);
        assert!(blanks.is_empty());
    }

    #[test]
    fn test_corrupt_rows() {
        let input = format!("{}\n000000\n", Hex(&encode_row(&BitRow::with_width(4))));
        let decoder = Decoder::new(DecodeOptions::strict(4));

        let err = decode_rows(&input, &decoder, false).unwrap_err();
        assert_eq!(err.to_string(), "corrupt compressed data at row 1");

        let (rows, blanks) = decode_rows(&input, &decoder, true).unwrap();
        assert_eq!(rows, vec![BitRow::with_width(4), BitRow::new()]);
        assert_eq!(blanks, vec![1]);
    }

    #[test]
    fn test_invalid_hex() {
        let err = decode_rows("0e00\nxyz\n", &Decoder::default(), true).unwrap_err();
        assert_eq!(err.to_string(), "Invalid hex at line 2");
    }
}
