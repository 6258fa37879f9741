//! Terminal Core Module
//!
//! Platform-independent screen state. This module contains:
//! - Cell representation with resolved style
//! - Fixed-width lines
//! - The pen (current SGR state)
//! - The screen model driven by `feed`
//! - Owned snapshots for downstream rendering
//!
//! The core is deterministic: the same character stream always produces
//! the same state, however it is split into chunks.

mod cell;
mod line;
mod pen;
mod screen;
mod snapshot;

pub use cell::{Color, StyledCell};
pub use line::ScreenLine;
pub use pen::Pen;
pub use screen::Screen;
pub use snapshot::Snapshot;
