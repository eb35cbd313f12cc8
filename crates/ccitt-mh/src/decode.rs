//! Decoder implementation

use log::trace;

use crate::{
    bits::TransmissionBitReader,
    error::{DecodeError, DecodeResult},
    table::{self, Code, Matched, MAX_CODE_LEN},
    BitRow, Color, Run, RunSink,
};

/// The position of the decoder within a scanline
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum State {
    /// At the start of a white run
    #[default]
    ExpectingWhiteRun,
    /// A white make-up code was read, the run continues
    WhiteMakeupPending,
    /// At the start of a black run
    ExpectingBlackRun,
    /// A black make-up code was read, the run continues
    BlackMakeupPending,
}

impl State {
    /// The color of the run being decoded
    pub fn color(self) -> Color {
        match self {
            State::ExpectingWhiteRun | State::WhiteMakeupPending => Color::White,
            State::ExpectingBlackRun | State::BlackMakeupPending => Color::Black,
        }
    }

    /// Whether a run was started by a make-up code and still needs its
    /// terminating code
    pub fn is_makeup_pending(self) -> bool {
        matches!(self, State::WhiteMakeupPending | State::BlackMakeupPending)
    }

    /// The next state after `code` (of this state's color) and the pixels
    /// it contributes
    pub fn transition(self, code: Matched) -> (State, Run) {
        use State::*;
        let color = self.color();
        let next = match (color, code) {
            (Color::White, Matched::Makeup(_)) => WhiteMakeupPending,
            (Color::White, Matched::Terminating(_)) => ExpectingBlackRun,
            (Color::Black, Matched::Makeup(_)) => BlackMakeupPending,
            (Color::Black, Matched::Terminating(_)) => ExpectingWhiteRun,
        };
        (next, Run::new(color, code.run_len() as usize))
    }
}

/// Options for decoding a scanline
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct DecodeOptions {
    /// The expected width of the row. If set, any other width is an error.
    pub width: Option<usize>,
}

impl DecodeOptions {
    /// Require rows to have exactly `width` pixels
    pub fn strict(width: usize) -> Self {
        Self { width: Some(width) }
    }
}

/// The decoder
///
/// Holds no state between rows, a single instance can decode any number of
/// rows, from any number of threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Create a new decoder instance
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decode one scanline into a new row
    pub fn decode(&self, input: &[u8]) -> DecodeResult<BitRow> {
        let mut row = BitRow::new();
        self.decode_into(input, &mut row)?;
        Ok(row)
    }

    /// Decode one scanline, appending the pixels to `sink`
    pub fn decode_into<S: RunSink + ?Sized>(&self, input: &[u8], sink: &mut S) -> DecodeResult<()> {
        let base = sink.pixels();
        let mut reader = TransmissionBitReader::new(input);
        let mut state = State::default();
        let mut run_start = base;
        let mut bits: u16 = 0;
        let mut len: u8 = 0;

        while let Some(bit) = reader.next() {
            bits = (bits << 1) | u16::from(bit);
            len += 1;
            if len > MAX_CODE_LEN {
                return Err(DecodeError::InvalidCode {
                    position: reader.position() - 1,
                    bits,
                });
            }

            let code = Code::new(bits, len);
            if table::is_eol(code) {
                trace!("EOL at bit {} in state {:?}", reader.position() - 12, state);
                if state.is_makeup_pending() {
                    trace!("Dropping {} pixels", sink.pixels() - run_start);
                    sink.truncate(run_start);
                }
                state = State::ExpectingWhiteRun;
                bits = 0;
                len = 0;
                continue;
            }

            if let Some(matched) = table::lookup(state.color(), code) {
                if !state.is_makeup_pending() {
                    run_start = sink.pixels();
                }
                let (next, run) = state.transition(matched);
                sink.push_run(run.color, run.len);
                state = next;
                bits = 0;
                len = 0;

                if let Some(expected) = self.options.width {
                    let actual = sink.pixels() - base;
                    // an EOL can still drop the pixels of a pending make-up run
                    if actual > expected && !state.is_makeup_pending() {
                        return Err(DecodeError::WidthMismatch { expected, actual });
                    }
                }
            }
        }

        if len > 0 {
            trace!("Ignoring {} trailing bits ({:#b})", len, bits);
        }
        if state.is_makeup_pending() {
            trace!("Row ends after a make-up code");
        }
        if let Some(expected) = self.options.width {
            let actual = sink.pixels() - base;
            if actual != expected {
                return Err(DecodeError::WidthMismatch { expected, actual });
            }
        }
        Ok(())
    }
}
