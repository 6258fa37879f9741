//! Demo Screen Library
//!
//! Turns a captured stream of terminal output into a fixed-size grid of
//! styled cells, the way a real terminal would show it, and hands out
//! immutable snapshots of that grid for rendering.
//!
//! - `core`: Styled cells, lines, the pen, the screen model and snapshots
//! - `parser`: Escape sequence decoding, SGR parameters and ANSI stripping
//! - `replay`: Timestamped event replay on a logical clock
//! - `cast`: Asciicast v2 recordings
//! - `config`: Screen and replay configuration

pub mod cast;
pub mod config;
pub mod core;
pub mod error;
pub mod parser;
pub mod replay;

pub use crate::cast::{Cast, CastHeader};
pub use crate::config::{AnsiMode, Config, ReplayConfig, ScreenConfig};
pub use crate::core::{Color, Pen, Screen, ScreenLine, Snapshot, StyledCell};
pub use crate::error::{Error, Result};
pub use crate::parser::{strip_ansi, visible_len};
pub use crate::replay::{EventKind, RecordedEvent, Replayer};
