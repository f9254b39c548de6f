//! Compiler for Slab command strings.
//!
//! Transforms a command string into a tree-structured [`Grid`]. Compilation
//! is total: every input, however malformed, produces a grid.

use log::debug;

use crate::color::ColorState;
use crate::expand::expand;
use crate::grid::Grid;
use crate::scanner::scan;
use crate::token::RECURSE;

/// How a program is compiled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompileOptions {
    /// Rewrite `i` into copies of the program before scanning. Only true for
    /// top-level calls; nested programs always see it off.
    pub allow_expansion: bool,
    /// Color state the program starts from.
    pub inherited: ColorState,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            allow_expansion: true,
            inherited: ColorState::default(),
        }
    }
}

impl CompileOptions {
    /// Options for a nested program starting from `inherited`.
    pub fn nested(inherited: ColorState) -> Self {
        Self {
            allow_expansion: false,
            inherited,
        }
    }
}

/// Compile a top-level Slab program into a [`Grid`].
pub fn compile(input: &str) -> Grid {
    compile_with(input, CompileOptions::default())
}

/// Compile a Slab program with explicit options.
pub fn compile_with(input: &str, options: CompileOptions) -> Grid {
    if input.is_empty() {
        return Grid::default();
    }
    if options.allow_expansion && input.contains(RECURSE) {
        let expansion = expand(input);
        return compile_with(&expansion.program, CompileOptions::nested(options.inherited));
    }
    let grid = scan(input, options.inherited);
    debug!(
        "compiled {} chars into {} row(s), depth {}",
        input.len(),
        grid.rows.len(),
        grid.depth()
    );
    grid
}
