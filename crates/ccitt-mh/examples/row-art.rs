use ccitt_mh::{ascii_art, BitRow, DecodeOptions, Decoder, ASCII, UNICODE};
use clap::Parser;
use color_eyre::eyre::{self, eyre};

#[derive(Parser)]
/// decode hex encoded scanlines and draw them to the console
struct Options {
    /// the encoded rows, as hex strings
    rows: Vec<String>,
    #[clap(short, long)]
    /// require this width
    width: Option<usize>,
    #[clap(short, long)]
    /// invert black and white
    invert: bool,
    #[clap(short, long)]
    /// only use ASCII characters
    ascii: bool,
}

fn nibble(digit: u8, index: usize) -> eyre::Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(eyre!(
            "Invalid hex digit {:?} at {}",
            char::from(digit),
            index
        )),
    }
}

fn parse_hex(input: &str) -> eyre::Result<Vec<u8>> {
    let digits = input.trim().as_bytes();
    if digits.len() % 2 != 0 {
        return Err(eyre!("Odd number of hex digits ({})", digits.len()));
    }
    digits
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| Ok(nibble(pair[0], 2 * i)? << 4 | nibble(pair[1], 2 * i + 1)?))
        .collect()
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Options::parse();

    let options = match opt.width {
        Some(width) => DecodeOptions::strict(width),
        None => DecodeOptions::default(),
    };
    let decoder = Decoder::new(options);
    let mut rows: Vec<BitRow> = Vec::with_capacity(opt.rows.len());
    for hex in &opt.rows {
        rows.push(decoder.decode(&parse_hex(hex)?)?);
    }

    let width = opt
        .width
        .unwrap_or_else(|| rows.iter().map(BitRow::width).max().unwrap_or(0));
    let style = if opt.ascii { ASCII } else { UNICODE };
    let mut string = String::new();
    ascii_art(&mut string, style, &rows, width, opt.invert)?;
    print!("{}", string);
    Ok(())
}
