//! Character-by-character walk that builds rows and cells.
//!
//! The scanner never fails. Unknown characters are skipped, and commands that
//! need a row or cell that does not exist yet create it on the spot.

use std::iter::Peekable;
use std::str::Chars;

use log::{debug, trace};

use crate::color::{Color, ColorState, PALE};
use crate::grid::{Cell, Grid, Row};
use crate::resolver::Nesting;
use crate::token::{ROW_BREAK, Token};

/// Scan an already expanded program into a grid, starting from `colors`.
pub(crate) fn scan(input: &str, colors: ColorState) -> Grid {
    let mut scanner = Scanner::new(input, colors);
    while let Some(ch) = scanner.chars.next() {
        match Token::from_char(ch) {
            Some(token) => scanner.step(token),
            None => trace!("skipping {:?}", ch),
        }
    }
    scanner.finish()
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    /// The innermost level, the one commands apply to.
    level: Level,
    nesting: Nesting,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, colors: ColorState) -> Self {
        Self {
            chars: input.chars().peekable(),
            level: Level::new(colors),
            nesting: Nesting::default(),
        }
    }

    fn step(&mut self, token: Token) {
        let level = &mut self.level;
        match token {
            Token::RowBreak => {
                if self.chars.next_if_eq(&ROW_BREAK).is_none() {
                    level.break_row();
                } else if !self.nesting.close(level) {
                    level.stray_close();
                }
            }
            Token::Grow => level.grow(level.colors.resolve()),
            // Expansion has already happened by the time anything is
            // scanned, so a surviving `i` is just a pale growth.
            Token::Recurse => level.grow(Some(PALE)),
            Token::Raise => level.raise(),
            Token::Open => self.nesting.open(level),
            Token::Hue(hue) => level.colors.select(hue),
            Token::Lighten => level.colors.lighten(),
            Token::ModeShift | Token::ModeReset => {}
        }
        if token != Token::Raise {
            self.level.raise_run = 0;
        }
    }

    fn finish(mut self) -> Grid {
        self.nesting.unwind(&mut self.level);
        self.level.finish()
    }
}

/// Rows and pending state of one grid under construction.
pub(crate) struct Level {
    rows: Vec<Row>,
    /// The row being built; opened lazily by the first command that needs it.
    current: Option<Row>,
    /// `p`s since the last cell was sized. Non-zero makes the next growth
    /// start a new cell instead of widening the last one.
    pending_cells: u32,
    /// Length of the current run of consecutive `p`s.
    raise_run: u32,
    /// Starting height for the next row to be opened.
    next_row_height: u32,
    /// The previous command was a `B` or `BB`.
    after_break: bool,
    /// The previous structural command widened or created the last cell.
    after_growth: bool,
    colors: ColorState,
}

impl Level {
    pub(crate) fn new(colors: ColorState) -> Self {
        Self {
            rows: Vec::new(),
            current: None,
            pending_cells: 0,
            raise_run: 0,
            next_row_height: 1,
            after_break: false,
            after_growth: false,
            colors,
        }
    }

    /// The open row, creating it at the pending height if needed.
    fn row_mut(&mut self) -> &mut Row {
        let height = self.next_row_height;
        self.current.get_or_insert_with(|| Row::new(height))
    }

    fn break_row(&mut self) {
        if let Some(row) = self.current.take() {
            self.rows.push(row);
        }
        self.pending_cells = 0;
        self.next_row_height = 1;
        self.after_break = true;
        self.after_growth = false;
    }

    /// A `BB` with no nested grid open. The row stays open.
    fn stray_close(&mut self) {
        debug!("unmatched BB ignored");
        self.next_row_height = 1;
        self.after_break = true;
        self.after_growth = false;
    }

    pub(crate) fn grow(&mut self, color: Option<Color>) {
        let fresh = self.pending_cells > 0;
        let row = self.row_mut();
        match row.cells.last_mut() {
            Some(cell) if !fresh => {
                cell.width += 1;
                cell.color = color;
            }
            _ => row.cells.push(Cell::new(color)),
        }
        self.pending_cells = 0;
        self.after_break = false;
        self.after_growth = true;
    }

    fn raise(&mut self) {
        self.raise_run += 1;
        let target = self.raise_run + 1;
        match self.current.as_mut() {
            Some(row) if !self.after_break => row.height = row.height.max(target),
            _ => self.next_row_height = self.next_row_height.max(target),
        }
        self.pending_cells += 1;
        self.after_growth = false;
    }

    /// Color for the cell of a nested grid opened here, and the state the
    /// nested program starts from. The nested program keeps the lightness
    /// but not the hue, and the hue is spent for the rest of this level too.
    pub(crate) fn enter_nested(&mut self) -> (Option<Color>, ColorState) {
        let color = self.colors.resolve();
        self.colors.clear_hue();
        (color, self.colors)
    }

    /// Place a finished nested grid in the last cell if it was just grown,
    /// otherwise in a new cell.
    pub(crate) fn attach(&mut self, color: Option<Color>, nested: Grid) {
        let reuse = self.after_growth;
        let row = self.row_mut();
        match row.cells.last_mut() {
            Some(cell) if reuse => {
                cell.nested = Some(nested);
                cell.color = color;
            }
            _ => row.cells.push(Cell::with_nested(color, nested)),
        }
        self.pending_cells = 0;
        self.raise_run = 0;
        self.after_break = false;
        self.after_growth = false;
    }

    pub(crate) fn finish(mut self) -> Grid {
        if let Some(row) = self.current.take() {
            self.rows.push(row);
        }
        Grid::new(self.rows)
    }
}
