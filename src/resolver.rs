//! Bracket matching for nested programs.
//!
//! An `S` suspends the level being scanned and starts a fresh one for the
//! nested program. The matching `BB` finishes that level and hands its grid
//! back to the suspended parent. Suspended levels live on a heap stack, so
//! nesting depth is limited by memory and not by the call stack. Levels still
//! open when the input runs out are closed innermost first.

use std::mem;

use log::debug;

use crate::color::Color;
use crate::scanner::Level;

/// A level waiting for its nested program to close.
struct Suspended {
    parent: Level,
    /// Color of the cell that will hold the nested grid.
    color: Option<Color>,
}

/// Stack of enclosing levels, outermost first.
#[derive(Default)]
pub(crate) struct Nesting {
    suspended: Vec<Suspended>,
}

impl Nesting {
    /// Number of nested programs currently open.
    pub(crate) fn depth(&self) -> usize {
        self.suspended.len()
    }

    /// Suspend `level` and replace it with an empty level for the nested
    /// program that starts here.
    pub(crate) fn open(&mut self, level: &mut Level) {
        let (color, inherited) = level.enter_nested();
        let parent = mem::replace(level, Level::new(inherited));
        self.suspended.push(Suspended { parent, color });
    }

    /// Finish the innermost nested program and attach its grid to the parent,
    /// which becomes `level` again. Returns false if nothing is open.
    pub(crate) fn close(&mut self, level: &mut Level) -> bool {
        let Some(Suspended { parent, color }) = self.suspended.pop() else {
            return false;
        };
        let nested = mem::replace(level, parent).finish();
        level.attach(color, nested);
        true
    }

    /// Close every nested program still open.
    pub(crate) fn unwind(&mut self, level: &mut Level) {
        if !self.suspended.is_empty() {
            debug!(
                "{} unclosed S, nested bodies run to end of input",
                self.depth()
            );
        }
        while self.close(level) {}
    }
}
