//! Tree of nested grid layouts produced by the compiler.
//!
//! A [`Grid`] is a top-to-bottom sequence of [`Row`]s, each a left-to-right
//! sequence of [`Cell`]s. Heights and widths are relative weights; a renderer
//! sizes rows and cells in proportion to them. A cell may own a whole nested
//! grid, so the structure is a strict tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A compiled layout: rows in rendering order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    pub rows: Vec<Row>,
}

/// A horizontal band of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub height: u32,
    pub cells: Vec<Cell>,
}

/// One unit of a row, optionally holding a nested grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, rename = "slab", skip_serializing_if = "Option::is_none")]
    pub nested: Option<Grid>,
}

impl Grid {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Nesting depth: 0 for an empty grid, 1 for a grid with no nested
    /// grids, and one more for every level of nesting below that.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((grid, depth)) = pending.pop() {
            if grid.is_empty() {
                continue;
            }
            deepest = deepest.max(depth);
            pending.extend(grid.nested().map(|nested| (nested, depth + 1)));
        }
        deepest
    }

    /// Total number of cells, nested grids included.
    pub fn cell_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(grid) = pending.pop() {
            count += grid.cells().count();
            pending.extend(grid.nested());
        }
        count
    }

    /// Top-level cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    /// Grids nested directly in this one's cells.
    fn nested(&self) -> impl Iterator<Item = &Grid> {
        self.cells().filter_map(|cell| cell.nested.as_ref())
    }

    /// Detach the grids nested directly in this one's cells.
    fn take_nested(&mut self) -> Vec<Grid> {
        self.rows
            .iter_mut()
            .flat_map(|row| row.cells.iter_mut())
            .filter_map(|cell| cell.nested.take())
            .collect()
    }
}

/// One line of the outline, with its indent.
enum Line<'a> {
    Row(&'a Row, usize),
    Cell(&'a Cell, usize),
}

/// Outline lines for the rows of `grid`, last row first.
fn row_lines(grid: &Grid, indent: usize) -> impl Iterator<Item = Line<'_>> {
    grid.rows.iter().rev().map(move |row| Line::Row(row, indent))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending: Vec<Line> = row_lines(self, 0).collect();
        while let Some(line) = pending.pop() {
            match line {
                Line::Row(row, indent) => {
                    writeln!(f, "{:indent$}row h={}", "", row.height, indent = indent)?;
                    let cells = row.cells.iter().rev();
                    pending.extend(cells.map(|cell| Line::Cell(cell, indent + 2)));
                }
                Line::Cell(cell, indent) => {
                    write!(f, "{:indent$}cell w={}", "", cell.width, indent = indent)?;
                    if let Some(color) = cell.color {
                        write!(f, " {}", color)?;
                    }
                    writeln!(f)?;
                    if let Some(nested) = &cell.nested {
                        pending.extend(row_lines(nested, indent + 2));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Drop for Grid {
    // Detach nested grids onto a heap stack so no drop recurses.
    fn drop(&mut self) {
        let mut pending = self.take_nested();
        while let Some(mut grid) = pending.pop() {
            pending.extend(grid.take_nested());
        }
    }
}

impl Row {
    pub fn new(height: u32) -> Self {
        Self {
            height,
            cells: Vec::new(),
        }
    }
}

impl Cell {
    pub fn new(color: Option<Color>) -> Self {
        Self {
            width: 1,
            color,
            nested: None,
        }
    }

    pub fn with_nested(color: Option<Color>, nested: Grid) -> Self {
        Self {
            width: 1,
            color,
            nested: Some(nested),
        }
    }
}
