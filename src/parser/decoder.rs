//! Escape sequence decoder
//!
//! Decodes exactly one escape sequence from the front of the unconsumed
//! input. The decoder is stateless: when the input ends before the sequence
//! is terminated it reports [`Decoded::Incomplete`] and the caller keeps the
//! bytes until more data arrives.
//!
//! Recognized forms:
//! - CSI: `ESC [ params intermediates final`, final in `0x40..=0x7E`
//! - OSC: `ESC ] ... BEL` or `ESC ] ... ESC \`
//! - DCS/SOS/PM/APC: `ESC P|X|^|_ ... ESC \`
//! - Charset designation: `ESC ( X`, `ESC ) X`, `ESC * X`, `ESC + X`
//! - Any other `ESC X`

use super::actions::{Decoded, EraseMode, EscapeSequence};
use super::params::Params;
use super::sgr::parse_sgr;

pub const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Decode one escape sequence from the start of `input`.
///
/// `input` must begin with ESC. All returned byte counts fall on `char`
/// boundaries of `input`.
pub fn decode(input: &str) -> Decoded {
    let bytes = input.as_bytes();
    debug_assert_eq!(bytes.first(), Some(&ESC));

    let Some(&introducer) = bytes.get(1) else {
        return Decoded::Incomplete;
    };

    match introducer {
        b'[' => decode_csi(bytes),
        b']' => decode_string(bytes, true),
        b'P' | b'X' | b'^' | b'_' => decode_string(bytes, false),
        b'(' | b')' | b'*' | b'+' => match input[2..].chars().next() {
            None => Decoded::Incomplete,
            Some(c) if c.is_control() => Decoded::Ignore { consumed: 2 },
            Some(c) => Decoded::Ignore {
                consumed: 2 + c.len_utf8(),
            },
        },
        // A control character (including another ESC) cancels the lone ESC
        // and is processed on its own.
        b if b < 0x20 || b == 0x7f => Decoded::Ignore { consumed: 1 },
        _ => {
            let len = input[1..].chars().next().map_or(1, char::len_utf8);
            tracing::debug!("Unhandled ESC sequence: {:?}", &input[..1 + len]);
            Decoded::Ignore { consumed: 1 + len }
        }
    }
}

fn decode_csi(bytes: &[u8]) -> Decoded {
    let mut intermediates_start = None;

    for (i, &byte) in bytes.iter().enumerate().skip(2) {
        match byte {
            // Parameter bytes after an intermediate are malformed, but the
            // sequence is ignored anyway once intermediates are present.
            0x30..=0x3F => {}
            0x20..=0x2F => {
                intermediates_start.get_or_insert(i);
            }
            0x40..=0x7E => {
                let param_end = intermediates_start.unwrap_or(i);
                return dispatch_csi(
                    &bytes[2..param_end],
                    intermediates_start.is_some(),
                    byte,
                    i + 1,
                );
            }
            _ => {
                // Controls and non-ASCII abort the sequence; the byte itself
                // is left for the caller.
                tracing::debug!("CSI sequence aborted by byte {:#04x}", byte);
                return Decoded::Ignore { consumed: i };
            }
        }
    }

    Decoded::Incomplete
}

fn dispatch_csi(
    param_bytes: &[u8],
    has_intermediates: bool,
    final_byte: u8,
    consumed: usize,
) -> Decoded {
    let private = matches!(param_bytes.first(), Some(b'<' | b'=' | b'>' | b'?'));
    if private || has_intermediates {
        tracing::debug!(
            "Ignoring CSI {:?} {}",
            String::from_utf8_lossy(param_bytes),
            final_byte as char
        );
        return Decoded::Ignore { consumed };
    }

    let params = Params::parse(param_bytes);
    let sequence = match final_byte {
        b'A' => EscapeSequence::CursorUp(params.get_or(0, 1)),
        b'B' => EscapeSequence::CursorDown(params.get_or(0, 1)),
        b'C' => EscapeSequence::CursorForward(params.get_or(0, 1)),
        b'D' => EscapeSequence::CursorBack(params.get_or(0, 1)),
        b'E' => EscapeSequence::CursorNextLine(params.get_or(0, 1)),
        b'F' => EscapeSequence::CursorPrevLine(params.get_or(0, 1)),
        b'G' => EscapeSequence::CursorColumn(params.get_or(0, 1)),
        b'H' | b'f' => EscapeSequence::CursorPosition {
            row: params.get_or(0, 1),
            col: params.get_or(1, 1),
        },
        b'J' | b'K' => {
            let Some(mode) = EraseMode::from_param(params.raw(0)) else {
                tracing::debug!("Unsupported erase mode: {}", params.raw(0));
                return Decoded::Ignore { consumed };
            };
            if final_byte == b'J' {
                EscapeSequence::EraseInDisplay(mode)
            } else {
                EscapeSequence::EraseInLine(mode)
            }
        }
        b'm' => EscapeSequence::Sgr(parse_sgr(&params)),
        _ => {
            tracing::debug!(
                "Unknown CSI {:?} {}",
                String::from_utf8_lossy(param_bytes),
                final_byte as char
            );
            return Decoded::Ignore { consumed };
        }
    };

    Decoded::Apply { sequence, consumed }
}

/// Skip a string-type sequence terminated by ST (`ESC \`), or by BEL when
/// `bel_terminates` is set.
fn decode_string(bytes: &[u8], bel_terminates: bool) -> Decoded {
    let mut i = 2;
    while i < bytes.len() {
        match bytes[i] {
            BEL if bel_terminates => return Decoded::Ignore { consumed: i + 1 },
            ESC => {
                return match bytes.get(i + 1) {
                    None => Decoded::Incomplete,
                    Some(b'\\') => Decoded::Ignore { consumed: i + 2 },
                    // Unterminated string cut short by a new sequence
                    Some(_) => Decoded::Ignore { consumed: i },
                };
            }
            _ => {}
        }
        i += 1;
    }

    Decoded::Incomplete
}
