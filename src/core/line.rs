//! Screen line
//!
//! A fixed-width row of cells. The width is set at construction and never
//! changes, so every index in `0..width` is always addressable.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cell::StyledCell;

/// A single line in the terminal grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenLine {
    cells: Vec<StyledCell>,
}

impl ScreenLine {
    /// Create a blank line with `width` cells
    pub fn new(width: usize) -> Self {
        Self {
            cells: vec![StyledCell::default(); width],
        }
    }

    /// Number of cells in this line
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Get the cell at `col`
    pub fn get(&self, col: usize) -> Option<&StyledCell> {
        self.cells.get(col)
    }

    /// All cells, left to right
    pub fn cells(&self) -> &[StyledCell] {
        &self.cells
    }

    /// Replace the cell at `col`. Out-of-range columns are ignored.
    pub fn set(&mut self, col: usize, cell: StyledCell) {
        if let Some(slot) = self.cells.get_mut(col) {
            *slot = cell;
        }
    }

    /// Reset every cell to blank
    pub fn clear(&mut self) {
        self.cells.fill(StyledCell::default());
    }

    /// Blank cells in `start..end`, clamped to the line width
    pub fn clear_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.cells.len());
        if start < end {
            self.cells[start..end].fill(StyledCell::default());
        }
    }

    /// Check if every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(StyledCell::is_blank)
    }

    /// Plain text content with trailing whitespace removed
    pub fn to_plain(&self) -> String {
        let text: String = self.cells.iter().map(|c| c.ch).collect();
        text.trim_end().to_string()
    }
}

impl fmt::Display for ScreenLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain())
    }
}
