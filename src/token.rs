//! The Slab command alphabet.
//!
//! Every command is a single ASCII character. The doubled row-break `BB` is
//! not a token of its own: the scanner and the nested-program resolver detect
//! it with one character of lookahead.

use phf::{Map, phf_map};

use crate::color::Hue;

pub const ROW_BREAK: char = 'B';
pub const RECURSE: char = 'i';
pub const RAISE: char = 'p';
pub const OPEN: char = 'S';

/// A recognised Slab command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `B` - close the open row; `BB` closes a sub-grid.
    RowBreak,
    /// `b` - new cell or extend the current cell, in the active color.
    Grow,
    /// `i` - self-reference at the top level, a pale `b` anywhere else.
    Recurse,
    /// `p` - raise the row height and prepare a new cell.
    Raise,
    /// `S` - open a nested grid, closed by a matching `BB`.
    Open,
    /// `r`, `g`, `t`, `y`, `f` - select a base hue.
    Hue(Hue),
    /// `h` - lighten subsequent cells by another 5%.
    Lighten,
    /// `m` - reserved mode switch.
    ModeShift,
    /// `n` - reserved mode switch.
    ModeReset,
}

/// Keep in the order of the alphabet table in the crate docs.
static CHAR_TO_TOKEN: Map<char, Token> = phf_map! {
    'B' => Token::RowBreak,
    'b' => Token::Grow,
    'i' => Token::Recurse,
    'p' => Token::Raise,
    'S' => Token::Open,
    'r' => Token::Hue(Hue::Red),
    'g' => Token::Hue(Hue::Green),
    't' => Token::Hue(Hue::Teal),
    'y' => Token::Hue(Hue::Yellow),
    'f' => Token::Hue(Hue::Fuchsia),
    'h' => Token::Lighten,
    'm' => Token::ModeShift,
    'n' => Token::ModeReset,
};

impl Token {
    /// Look up the token for a character. Characters outside the alphabet
    /// yield `None` and are skipped by the scanner.
    pub fn from_char(ch: char) -> Option<Token> {
        CHAR_TO_TOKEN.get(&ch).copied()
    }

    /// True for tokens that only touch the color state.
    pub fn is_color(self) -> bool {
        matches!(self, Token::Hue(_) | Token::Lighten)
    }
}

/// Map a program to its tokens, dropping unrecognised characters.
pub fn tokenize(input: &str) -> impl Iterator<Item = Token> + '_ {
    input.chars().filter_map(Token::from_char)
}
