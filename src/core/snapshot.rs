//! Screen snapshots
//!
//! A snapshot is a fully owned copy of the screen at one instant. It shares
//! nothing with the live screen, so feeding more output never changes a
//! snapshot that was already handed out, and snapshots can move freely
//! between threads.

use serde::{Deserialize, Serialize};

use super::cell::StyledCell;
use super::line::ScreenLine;
use super::screen::Screen;

/// A frozen copy of the terminal screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotData")]
pub struct Snapshot {
    /// Plain text of each row, trailing blanks trimmed
    pub lines: Vec<String>,
    /// Styled cells of each row
    pub styled_lines: Vec<ScreenLine>,
    pub cursor_row: usize,
    pub cursor_col: usize,
    /// Logical timestamp supplied by the caller, in milliseconds
    pub t_ms: f64,
}

impl Snapshot {
    /// Create a snapshot from the current screen state
    pub fn from_screen(screen: &Screen, t_ms: f64) -> Self {
        let styled_lines: Vec<ScreenLine> = screen.lines().cloned().collect();
        let lines = styled_lines.iter().map(ScreenLine::to_plain).collect();
        let (cursor_row, cursor_col) = screen.cursor();

        Snapshot {
            lines,
            styled_lines,
            cursor_row,
            cursor_col,
            t_ms,
        }
    }

    /// Number of rows captured
    pub fn rows(&self) -> usize {
        self.styled_lines.len()
    }

    /// Number of columns captured
    pub fn cols(&self) -> usize {
        self.styled_lines.first().map_or(0, ScreenLine::width)
    }

    /// Get a cell at the given position
    pub fn cell(&self, row: usize, col: usize) -> Option<&StyledCell> {
        self.styled_lines.get(row).and_then(|line| line.get(col))
    }

    /// All lines joined with newlines
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Non-blank lines joined with newlines
    pub fn visible_text(&self) -> String {
        self.lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Compare screen content and cursor, ignoring the timestamp
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        self.styled_lines == other.styled_lines
            && self.cursor_row == other.cursor_row
            && self.cursor_col == other.cursor_col
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Unchecked wire form of [`Snapshot`]
#[derive(Deserialize)]
struct SnapshotData {
    lines: Vec<String>,
    styled_lines: Vec<ScreenLine>,
    cursor_row: usize,
    cursor_col: usize,
    t_ms: f64,
}

impl TryFrom<SnapshotData> for Snapshot {
    type Error = String;

    /// Rebuild a snapshot, rejecting anything a screen could not have produced
    fn try_from(data: SnapshotData) -> Result<Self, Self::Error> {
        let cols = data.styled_lines.first().map_or(0, ScreenLine::width);
        if cols == 0 {
            return Err("snapshot has no rows or zero-width lines".to_string());
        }
        if let Some((row, line)) = data
            .styled_lines
            .iter()
            .enumerate()
            .find(|(_, line)| line.width() != cols)
        {
            return Err(format!(
                "line {} has width {}, expected {}",
                row,
                line.width(),
                cols
            ));
        }
        if data.lines.len() != data.styled_lines.len() {
            return Err(format!(
                "{} plain lines for {} styled lines",
                data.lines.len(),
                data.styled_lines.len()
            ));
        }
        if let Some(row) = data
            .lines
            .iter()
            .zip(&data.styled_lines)
            .position(|(text, line)| *text != line.to_plain())
        {
            return Err(format!("plain text of line {} does not match its cells", row));
        }
        if data.cursor_row >= data.styled_lines.len() || data.cursor_col >= cols {
            return Err(format!(
                "cursor ({}, {}) outside {}x{} grid",
                data.cursor_row,
                data.cursor_col,
                data.styled_lines.len(),
                cols
            ));
        }

        Ok(Snapshot {
            lines: data.lines,
            styled_lines: data.styled_lines,
            cursor_row: data.cursor_row,
            cursor_col: data.cursor_col,
            t_ms: data.t_ms,
        })
    }
}
