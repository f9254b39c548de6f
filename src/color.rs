//! Running color state for the scanner.
//!
//! A [`ColorState`] is a base hue plus a lightness multiplier. It is a plain
//! `Copy` value: nested grids receive a copy, so nothing a nested program does
//! to its colors can leak back into the parent or into a sibling.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Amount the lightness multiplier grows per `h` command.
pub const LIGHTEN_STEP: f64 = 0.05;

/// Fixed color painted by a pale `i` growth.
pub const PALE: Color = Color::rgb(0xFF, 0xAA, 0xAA);

/// Color a renderer uses for cells that carry none.
pub const NEUTRAL: Color = Color::rgb(0x9E, 0x9E, 0x9E);

/// An opaque 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend towards white by `multiplier - 1`. A multiplier of 1.0 is the
    /// identity and anything past 2.0 saturates at white.
    pub fn lighten(self, multiplier: f64) -> Color {
        let amount = multiplier - 1.0;
        let blend = |c: u8| {
            let c = f64::from(c);
            (c + (255.0 - c) * amount).round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(blend(self.r), blend(self.g), blend(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            bail!("Invalid color '{}': expected hex digits.", s);
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16);
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i].repeat(2));
                Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => bail!("Invalid color '{}': expected #rgb or #rrggbb.", s),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Base hues selectable from a program.
///
/// The hex values for `Green` and `Teal` lean teal and blue respectively;
/// puzzles are authored against these exact values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Red,
    Green,
    Teal,
    Yellow,
    /// Part of the alphabet but selects nothing.
    Fuchsia,
}

impl Hue {
    /// The base color for this hue, or `None` for hues with no effect.
    pub fn base(self) -> Option<Color> {
        match self {
            Hue::Red => Some(Color::rgb(0xDC, 0x26, 0x26)),
            Hue::Green => Some(Color::rgb(0x0D, 0x94, 0x88)),
            Hue::Teal => Some(Color::rgb(0x25, 0x63, 0xEB)),
            Hue::Yellow => Some(Color::rgb(0xEA, 0xB3, 0x08)),
            Hue::Fuchsia => None,
        }
    }
}

/// Active base color and lightness multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    pub base: Option<Color>,
    pub lightness: f64,
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new(None, 1.0)
    }
}

impl ColorState {
    pub fn new(base: Option<Color>, lightness: f64) -> Self {
        Self { base, lightness }
    }

    /// Apply a hue selector. Hues without a base color leave the state alone.
    pub fn select(&mut self, hue: Hue) {
        if let Some(color) = hue.base() {
            self.base = Some(color);
        }
    }

    /// Raise the lightness multiplier. The base color is untouched, and a
    /// later hue change keeps the accumulated lightness.
    pub fn lighten(&mut self) {
        self.lightness += LIGHTEN_STEP;
    }

    /// Drop the base color, keeping the lightness.
    pub fn clear_hue(&mut self) {
        self.base = None;
    }

    /// The color a newly sized cell gets, if any hue is active.
    pub fn resolve(&self) -> Option<Color> {
        self.base.map(|c| c.lighten(self.lightness))
    }
}
