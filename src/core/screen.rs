//! Screen model implementation
//!
//! The screen owns a fixed grid of lines, the cursor, and the current pen.
//! All mutation goes through [`Screen::feed`], which accepts arbitrary
//! chunks of terminal output. Escape sequences cut off at the end of a
//! chunk are retained and completed by the next call.

use std::collections::VecDeque;

use super::cell::StyledCell;
use super::line::ScreenLine;
use super::pen::Pen;
use super::snapshot::Snapshot;
use crate::config::{AnsiMode, ScreenConfig};
use crate::error::Result;
use crate::parser::{decode, Decoded, EraseMode, EscapeSequence};

/// Longest unterminated escape sequence kept between feeds
const MAX_PENDING: usize = 64 * 1024;

/// Tab stop interval
const TAB_WIDTH: usize = 8;

/// The terminal screen model
#[derive(Debug, Clone)]
pub struct Screen {
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
    /// Visible lines, top to bottom
    grid: VecDeque<ScreenLine>,
    /// Cursor row (0-indexed)
    cursor_row: usize,
    /// Cursor column (0-indexed)
    cursor_col: usize,
    /// The last column has been written; the next printable character
    /// wraps first
    pending_wrap: bool,
    /// Current pen
    pen: Pen,
    /// Escape sequence handling
    ansi_mode: AnsiMode,
    /// Unterminated escape sequence from the previous feed
    pending: String,
    /// Incomplete UTF-8 sequence from the previous `feed_bytes`
    utf8_tail: Vec<u8>,
    /// Lines evicted off the top since construction or reset
    scrolled_lines: u64,
}

impl Screen {
    /// Create a new blank screen. Fails if either dimension is zero.
    pub fn new(rows: usize, cols: usize, ansi_mode: AnsiMode) -> Result<Self> {
        Self::from_config(&ScreenConfig {
            rows,
            cols,
            ansi_mode,
        })
    }

    /// Create a new blank screen from a configuration
    pub fn from_config(config: &ScreenConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            grid: (0..config.rows).map(|_| ScreenLine::new(config.cols)).collect(),
            cursor_row: 0,
            cursor_col: 0,
            pending_wrap: false,
            pen: Pen::default(),
            ansi_mode: config.ansi_mode,
            pending: String::new(),
            utf8_tail: Vec::new(),
            scrolled_lines: 0,
        })
    }

    /// Get the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cursor position as `(row, col)`
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// The pen that the next character will be written with
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn ansi_mode(&self) -> AnsiMode {
        self.ansi_mode
    }

    /// Get a line at the given row
    pub fn line(&self, row: usize) -> Option<&ScreenLine> {
        self.grid.get(row)
    }

    /// Iterate over visible lines, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &ScreenLine> + '_ {
        self.grid.iter()
    }

    /// Get a cell at the given position
    pub fn cell(&self, row: usize, col: usize) -> Option<&StyledCell> {
        self.grid.get(row).and_then(|line| line.get(col))
    }

    /// Number of lines scrolled off the top since construction or reset
    pub fn scrolled_lines(&self) -> u64 {
        self.scrolled_lines
    }

    /// Check if an unterminated escape sequence is waiting for more input
    pub fn has_pending_input(&self) -> bool {
        !self.pending.is_empty() || !self.utf8_tail.is_empty()
    }

    /// Process a chunk of terminal output
    pub fn feed(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        tracing::trace!(bytes = chunk.len(), pending = self.pending.len(), "feed");

        if self.pending.is_empty() {
            let consumed = self.process(chunk);
            self.retain(&chunk[consumed..]);
        } else {
            let mut input = std::mem::take(&mut self.pending);
            input.push_str(chunk);
            let consumed = self.process(&input);
            self.retain(&input[consumed..]);
        }
    }

    /// Process a chunk of UTF-8 encoded output.
    ///
    /// A character split across chunks is completed by the next call;
    /// invalid bytes become U+FFFD.
    pub fn feed_bytes(&mut self, data: &[u8]) {
        let joined;
        let mut rest: &[u8] = if self.utf8_tail.is_empty() {
            data
        } else {
            let mut buf = std::mem::take(&mut self.utf8_tail);
            buf.extend_from_slice(data);
            joined = buf;
            &joined
        };

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.feed(text);
                    return;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    self.feed(std::str::from_utf8(&rest[..valid]).unwrap_or_default());
                    match err.error_len() {
                        Some(len) => {
                            self.feed("\u{FFFD}");
                            rest = &rest[valid + len..];
                        }
                        None => {
                            self.utf8_tail = rest[valid..].to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Capture the current state as an independent snapshot
    pub fn snapshot(&self, t_ms: f64) -> Snapshot {
        Snapshot::from_screen(self, t_ms)
    }

    /// Return to the blank initial state
    pub fn reset(&mut self) {
        for line in &mut self.grid {
            line.clear();
        }
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.pending_wrap = false;
        self.pen.reset();
        self.pending.clear();
        self.utf8_tail.clear();
        self.scrolled_lines = 0;
    }

    /// Run `input` through the screen, returning the number of bytes
    /// consumed. Anything left over is an incomplete escape sequence.
    fn process(&mut self, input: &str) -> usize {
        let mut pos = 0;

        while let Some(ch) = input[pos..].chars().next() {
            if ch == '\x1b' {
                match decode(&input[pos..]) {
                    Decoded::Apply { sequence, consumed } => {
                        self.apply(sequence);
                        pos += consumed;
                    }
                    Decoded::Ignore { consumed } => pos += consumed,
                    Decoded::Incomplete => break,
                }
                continue;
            }

            self.execute(ch);
            pos += ch.len_utf8();
        }

        pos
    }

    fn retain(&mut self, tail: &str) {
        if tail.len() > MAX_PENDING {
            tracing::warn!(
                "Discarding unterminated escape sequence of {} bytes",
                tail.len()
            );
            return;
        }
        if !tail.is_empty() {
            tracing::debug!("Retaining {} bytes of incomplete escape sequence", tail.len());
        }
        self.pending.push_str(tail);
    }

    /// Handle a single non-escape character
    fn execute(&mut self, ch: char) {
        match ch {
            '\r' => self.carriage_return(),
            // LF, VT, FF
            '\n' | '\x0b' | '\x0c' => self.linefeed(),
            '\x08' => self.backspace(),
            '\t' => self.tab(),
            // BEL, NUL and the remaining C0 controls
            c if (c as u32) < 0x20 => {}
            c => self.print_char(c),
        }
    }

    /// Apply a decoded escape sequence
    fn apply(&mut self, sequence: EscapeSequence) {
        match sequence {
            EscapeSequence::CursorUp(n) => self.move_cursor_up(n.into()),
            EscapeSequence::CursorDown(n) => self.move_cursor_down(n.into()),
            EscapeSequence::CursorForward(n) => self.move_cursor_forward(n.into()),
            EscapeSequence::CursorBack(n) => self.move_cursor_backward(n.into()),
            EscapeSequence::CursorNextLine(n) => {
                self.move_cursor_down(n.into());
                self.cursor_col = 0;
            }
            EscapeSequence::CursorPrevLine(n) => {
                self.move_cursor_up(n.into());
                self.cursor_col = 0;
            }
            EscapeSequence::CursorColumn(col) => {
                self.move_cursor_to(self.cursor_row, usize::from(col).saturating_sub(1));
            }
            EscapeSequence::CursorPosition { row, col } => {
                self.move_cursor_to(
                    usize::from(row).saturating_sub(1),
                    usize::from(col).saturating_sub(1),
                );
            }
            EscapeSequence::EraseInDisplay(mode) => self.erase_in_display(mode),
            EscapeSequence::EraseInLine(mode) => self.erase_in_line(mode),
            EscapeSequence::Sgr(attrs) => match self.ansi_mode {
                AnsiMode::Preserve => self.pen.apply_all(&attrs),
                AnsiMode::Strip => {}
            },
        }
    }

    /// Write a character at the cursor and advance
    fn print_char(&mut self, c: char) {
        if self.pending_wrap {
            self.linefeed();
        }

        let cell = StyledCell::with_pen(c, &self.pen);
        self.grid[self.cursor_row].set(self.cursor_col, cell);

        if self.cursor_col + 1 < self.cols {
            self.cursor_col += 1;
        } else {
            self.pending_wrap = true;
        }
    }

    /// Move down one row (scrolling at the bottom) and return to column 0
    fn linefeed(&mut self) {
        self.pending_wrap = false;
        if self.cursor_row + 1 < self.rows {
            self.cursor_row += 1;
        } else {
            self.scroll_up();
        }
        self.cursor_col = 0;
    }

    /// Evict the top line and append a blank one at the bottom
    fn scroll_up(&mut self) {
        if let Some(mut line) = self.grid.pop_front() {
            line.clear();
            self.grid.push_back(line);
            self.scrolled_lines += 1;
        }
    }

    fn carriage_return(&mut self) {
        self.pending_wrap = false;
        self.cursor_col = 0;
    }

    fn backspace(&mut self) {
        // With a pending wrap the cursor is already drawn on the last
        // written column.
        if self.pending_wrap {
            self.pending_wrap = false;
        } else {
            self.cursor_col = self.cursor_col.saturating_sub(1);
        }
    }

    fn tab(&mut self) {
        self.pending_wrap = false;
        let next_stop = (self.cursor_col / TAB_WIDTH + 1) * TAB_WIDTH;
        self.cursor_col = next_stop.min(self.cols - 1);
    }

    fn move_cursor_to(&mut self, row: usize, col: usize) {
        self.pending_wrap = false;
        self.cursor_row = row.min(self.rows - 1);
        self.cursor_col = col.min(self.cols - 1);
    }

    fn move_cursor_up(&mut self, n: usize) {
        self.move_cursor_to(self.cursor_row.saturating_sub(n), self.cursor_col);
    }

    fn move_cursor_down(&mut self, n: usize) {
        self.move_cursor_to(self.cursor_row.saturating_add(n), self.cursor_col);
    }

    fn move_cursor_forward(&mut self, n: usize) {
        self.move_cursor_to(self.cursor_row, self.cursor_col.saturating_add(n));
    }

    fn move_cursor_backward(&mut self, n: usize) {
        self.move_cursor_to(self.cursor_row, self.cursor_col.saturating_sub(n));
    }

    /// Erase in line (EL). The cursor does not move, but a pending wrap is
    /// cancelled.
    fn erase_in_line(&mut self, mode: EraseMode) {
        self.pending_wrap = false;
        let col = self.cursor_col;
        let line = &mut self.grid[self.cursor_row];
        match mode {
            EraseMode::ToEnd => line.clear_range(col, self.cols),
            EraseMode::ToStart => line.clear_range(0, col + 1),
            EraseMode::All => line.clear(),
        }
    }

    /// Erase in display (ED)
    fn erase_in_display(&mut self, mode: EraseMode) {
        self.pending_wrap = false;
        let row = self.cursor_row;
        match mode {
            EraseMode::ToEnd => {
                self.erase_in_line(EraseMode::ToEnd);
                for line in self.grid.iter_mut().skip(row + 1) {
                    line.clear();
                }
            }
            EraseMode::ToStart => {
                for line in self.grid.iter_mut().take(row) {
                    line.clear();
                }
                self.erase_in_line(EraseMode::ToStart);
            }
            EraseMode::All => {
                for line in &mut self.grid {
                    line.clear();
                }
                self.move_cursor_to(0, 0);
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fresh(rows: usize, cols: usize) -> Screen {
        Screen::new(rows, cols, AnsiMode::Preserve).unwrap()
    }

    fn fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z ]{1,12}",
            prop::sample::select(vec![
                "\r",
                "\n",
                "\t",
                "\x08",
                "\x1b]0;title\x07",
                "\x1b[?25l",
            ])
            .prop_map(str::to_string),
            (0u8..90, prop::sample::select(vec!['A', 'B', 'C', 'D']))
                .prop_map(|(n, c)| format!("\x1b[{}{}", n, c)),
            (0u8..3, prop::sample::select(vec!['J', 'K']))
                .prop_map(|(n, c)| format!("\x1b[{}{}", n, c)),
            (0u8..108).prop_map(|n| format!("\x1b[{}m", n)),
            any::<u8>().prop_map(|n| format!("\x1b[38;5;{}m", n)),
            (any::<u8>(), any::<u8>()).prop_map(|(r, b)| format!("\x1b[48;2;{};0;{}m", r, b)),
        ]
    }

    proptest! {
        /// Splitting the stream anywhere reaches the same state as feeding it whole.
        #[test]
        fn chunk_splits_are_equivalent(
            parts in proptest::collection::vec(fragment(), 1..40),
            cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..8),
        ) {
            let input: String = parts.concat();

            let mut whole = fresh(6, 20);
            whole.feed(&input);

            let mut offsets: Vec<usize> = cuts.iter().map(|c| c.index(input.len() + 1)).collect();
            offsets.push(0);
            offsets.push(input.len());
            offsets.sort_unstable();
            offsets.dedup();

            let mut split = fresh(6, 20);
            for pair in offsets.windows(2) {
                split.feed_bytes(&input.as_bytes()[pair[0]..pair[1]]);
            }

            prop_assert_eq!(whole.snapshot(0.0), split.snapshot(0.0));
            prop_assert_eq!(whole.pen(), split.pen());
        }

        /// The cursor never leaves the grid and every line keeps its width.
        #[test]
        fn cursor_and_grid_stay_in_bounds(
            parts in proptest::collection::vec(fragment(), 0..60),
            rows in 1usize..8,
            cols in 1usize..30,
        ) {
            let mut screen = fresh(rows, cols);
            for part in &parts {
                screen.feed(part);
                let (row, col) = screen.cursor();
                prop_assert!(row < rows);
                prop_assert!(col < cols);
            }
            prop_assert_eq!(screen.lines().count(), rows);
            prop_assert!(screen.lines().all(|l| l.width() == cols));
        }

        /// Carriage-return redraws never move the cursor to another row.
        #[test]
        fn carriage_return_redraws_stay_on_row(frames in proptest::collection::vec("[a-z%#=]{0,15}", 1..20)) {
            let mut screen = fresh(10, 40);
            for frame in &frames {
                screen.feed(&format!("\r{}", frame));
                prop_assert_eq!(screen.cursor().0, 0);
            }
            prop_assert!(screen.lines().skip(1).all(ScreenLine::is_blank));
        }
    }
}
