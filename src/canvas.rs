//! Character-cell rasterizer for compiled grids.
//!
//! Lays a [`Grid`] out over a fixed-size buffer of colored cells: row heights
//! and cell widths are shared out in proportion to their weights, and nested
//! grids are drawn inside their cell, inset by one cell where there is room.
//! The buffer can then be painted to a terminal as background colors.

use std::io::Write;

use anyhow::Result;
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor};
use crossterm::queue;
use itertools::Itertools;

use crate::color::{Color, NEUTRAL};
use crate::grid::Grid;

/// Color of the area not covered by any cell.
pub const BACKGROUND: Color = Color::rgb(0xFF, 0xFF, 0xFF);

/// A rectangle of buffer cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub col: usize,
    pub row: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(col: usize, row: usize, width: usize, height: usize) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink by one on every side, unless that would leave nothing.
    fn inset(&self) -> Rect {
        if self.width >= 3 && self.height >= 3 {
            Rect::new(self.col + 1, self.row + 1, self.width - 2, self.height - 2)
        } else {
            *self
        }
    }
}

/// A 2D buffer of colors.
pub struct Canvas {
    cells: Vec<Color>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// Create a new buffer filled with the background color.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![BACKGROUND; width * height],
            width,
            height,
        }
    }

    /// Get the color at (col, row).
    pub fn get(&self, col: usize, row: usize) -> Color {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col]
        } else {
            BACKGROUND
        }
    }

    /// Fill a rectangle, clipped to the buffer.
    pub fn fill(&mut self, rect: Rect, color: Color) {
        let right = (rect.col + rect.width).min(self.width);
        let bottom = (rect.row + rect.height).min(self.height);
        for row in rect.row..bottom {
            let base = row * self.width;
            for col in rect.col..right {
                self.cells[base + col] = color;
            }
        }
    }

    /// Lay `grid` out over the whole buffer.
    pub fn draw(&mut self, grid: &Grid) {
        self.draw_in(grid, Rect::new(0, 0, self.width, self.height));
    }

    /// Lay `grid` out over `rect`.
    pub fn draw_in(&mut self, grid: &Grid, rect: Rect) {
        let mut pending = vec![(grid, rect)];
        while let Some((grid, rect)) = pending.pop() {
            if rect.is_empty() || grid.is_empty() {
                continue;
            }
            let heights = grid.rows.iter().map(|row| row.height).collect_vec();
            for (row, (top, height)) in grid.rows.iter().zip(share(rect.row, rect.height, &heights)) {
                let widths = row.cells.iter().map(|cell| cell.width).collect_vec();
                for (cell, (left, width)) in row.cells.iter().zip(share(rect.col, rect.width, &widths)) {
                    let area = Rect::new(left, top, width, height);
                    if area.is_empty() {
                        continue;
                    }
                    self.fill(area, cell.color.unwrap_or(NEUTRAL));
                    // Cells do not overlap, so nested grids can be drawn later.
                    if let Some(nested) = &cell.nested {
                        pending.push((nested, area.inset()));
                    }
                }
            }
        }
    }

    /// Paint the buffer as background-colored spaces, one line per row.
    pub fn paint(&self, out: &mut impl Write) -> Result<()> {
        for row in 0..self.height {
            let line = &self.cells[row * self.width..(row + 1) * self.width];
            for (color, run) in &line.iter().chunk_by(|&&c| c) {
                let len = run.count();
                queue!(
                    out,
                    SetBackgroundColor(term_color(color)),
                    Print(" ".repeat(len))
                )?;
            }
            queue!(out, ResetColor, Print("\n"))?;
        }
        out.flush()?;
        Ok(())
    }
}

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Share `len` cells starting at `start` among `weights`, rounding running
/// totals so the pieces always add up to `len`.
pub fn share(start: usize, len: usize, weights: &[u32]) -> Vec<(usize, usize)> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return weights.iter().map(|_| (start, 0)).collect();
    }
    let edge = |acc: u64| start + ((acc * len as u64 + total / 2) / total) as usize;
    weights
        .iter()
        .scan(0u64, |acc, &w| {
            let from = edge(*acc);
            *acc += u64::from(w);
            Some((from, edge(*acc) - from))
        })
        .collect()
}
