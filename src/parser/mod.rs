//! Escape sequence decoding
//!
//! A stateless decoder that turns the escape sequence at the front of the
//! input into a semantic action, or reports that more input is needed.
//! The screen owns the retained bytes, so any chunk boundary is safe.

mod actions;
mod decoder;
mod params;
mod sgr;
mod strip;

pub use actions::{Decoded, EraseMode, EscapeSequence, SgrAttribute};
pub use decoder::{decode, ESC};
pub use params::Params;
pub use sgr::parse_sgr;
pub use strip::{strip_ansi, visible_len};
