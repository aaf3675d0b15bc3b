//! Color Model
//!
//! RGBA color used for chat message rendering, with hex parsing and the
//! standard 16-color IRC palette.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// mIRC color codes 0-15
const IRC_PALETTE: [(u8, u8, u8); 16] = [
    (255, 255, 255), // white
    (0, 0, 0),       // black
    (0, 0, 127),     // blue
    (0, 147, 0),     // green
    (255, 0, 0),     // light red
    (127, 0, 0),     // brown
    (156, 0, 156),   // purple
    (252, 127, 0),   // orange
    (255, 255, 0),   // yellow
    (0, 252, 0),     // light green
    (0, 147, 147),   // cyan
    (0, 255, 255),   // light cyan
    (0, 0, 252),     // light blue
    (255, 0, 255),   // pink
    (127, 127, 127), // grey
    (210, 210, 210), // light grey
];

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const LIGHT_GRAY: Color = Color::rgb(210, 210, 210);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create color from hex string (e.g., "#FF0000" or "#FF0000FF")
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        let invalid = || Error::InvalidColor {
            value: hex.to_string(),
        };

        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }

    /// Convert to hex string, omitting alpha when fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Look up an IRC color code (0-15)
    pub fn from_irc_code(code: u8) -> Option<Self> {
        IRC_PALETTE
            .get(code as usize)
            .map(|&(r, g, b)| Self::rgb(r, g, b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::LIGHT_GRAY
    }
}
