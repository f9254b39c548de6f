//! Compiler from Slab command strings to trees of nested grid layouts.
//!
//! A Slab program is a string of single-character commands:
//!
//! | Char | Meaning                                                          |
//! |------|------------------------------------------------------------------|
//! | `B`  | End the current row; `BB` ends a nested grid                     |
//! | `b`  | New cell or widen the current cell, in the active color          |
//! | `p`  | Prepare a new cell; consecutive `p`s make the row taller         |
//! | `S`  | Nested grid up to the matching `BB`, in the last `b` cell if any |
//! | `i`  | The whole program again, one level deeper (top level only)       |
//! | `r`  | Red                                                              |
//! | `g`  | Green                                                            |
//! | `t`  | Teal                                                             |
//! | `y`  | Yellow                                                           |
//! | `f`  | Fuchsia (no effect)                                              |
//! | `h`  | Lighten subsequent cells by 5%                                   |
//! | `m`  | Reserved mode switch (no effect)                                 |
//! | `n`  | Reserved mode switch (no effect)                                 |
//!
//! Other characters are ignored. Compilation never fails.
//!
//! # Example
//!
//! ```rust
//! use slab_compiler::{Color, compile};
//!
//! let grid = compile("rbSbBB");
//!
//! assert_eq!(grid.rows.len(), 1);
//! let cell = &grid.rows[0].cells[0];
//! assert_eq!(cell.color, Some(Color::rgb(0xDC, 0x26, 0x26)));
//!
//! // The nested program starts without a hue.
//! let nested = cell.nested.as_ref().unwrap();
//! assert_eq!(nested.rows[0].cells[0].color, None);
//! assert_eq!(grid.depth(), 2);
//! ```

pub mod canvas;
pub mod color;
pub mod compiler;
pub mod expand;
mod grid;
mod resolver;
mod scanner;
pub mod token;

pub use canvas::Canvas;
pub use color::{Color, ColorState, Hue};
pub use compiler::{CompileOptions, compile, compile_with};
pub use expand::{Expansion, expand};
pub use grid::{Cell, Grid, Row};
pub use token::{Token, tokenize};
