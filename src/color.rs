//! 16-bit RGB565 colors and the game palette

use serde::{Deserialize, Serialize};

use crate::consts::RESOLUTION_Y;

/// A packed 5-6-5 color as written to the pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const WHITE: Self = Self(0xFFFF);
    pub const BLACK: Self = Self(0x0000);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);
    pub const CYAN: Self = Self(0x07FF);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const PINK: Self = Self(0xFC18);
    pub const ORANGE: Self = Self(0xFC00);

    /// Pack channels; red and blue are 5 bits, green is 6 bits. Excess bits are masked off.
    #[inline]
    pub const fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self((((r & 0x1F) as u16) << 11) | (((g & 0x3F) as u16) << 5) | (b & 0x1F) as u16)
    }

    /// Unpack into (r, g, b)
    #[inline]
    pub const fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 11) & 0x1F) as u8,
            ((self.0 >> 5) & 0x3F) as u8,
            (self.0 & 0x1F) as u8,
        )
    }
}

/// Sky color at the top row
pub const BACKGROUND: Rgb565 = Rgb565(0x0570);
/// Total blue added between the top and bottom rows
pub const GRADIENT: i32 = 15;
/// Sand
pub const TERRAIN_COLOR: Rgb565 = Rgb565(0xFFB5);
/// Score line, text and banners
pub const CHROME_COLOR: Rgb565 = Rgb565::WHITE;

/// Ball colors, indexed by the lowest set color switch
pub const BALL_PALETTE: [Rgb565; 10] = [
    Rgb565::WHITE,
    Rgb565::RED,
    Rgb565::ORANGE,
    Rgb565::YELLOW,
    Rgb565::GREEN,
    Rgb565::CYAN,
    Rgb565::BLUE,
    Rgb565::MAGENTA,
    Rgb565::PINK,
    Rgb565::BLACK,
];

/// Ball color when no switch (or only switches past the palette) is set
pub const DEFAULT_BALL_COLOR: Rgb565 = Rgb565::RED;

/// Background gradient color for a screen row. Off-screen rows clamp to the nearest edge.
#[inline]
pub fn background(row: i32) -> Rgb565 {
    let row = row.clamp(0, RESOLUTION_Y - 1);
    Rgb565(BACKGROUND.0 + (GRADIENT * row / RESOLUTION_Y) as u16)
}

/// Map the color switch word to a ball color
pub fn ball_color(switches: u32) -> Rgb565 {
    if switches == 0 {
        return DEFAULT_BALL_COLOR;
    }
    BALL_PALETTE
        .get(switches.trailing_zeros() as usize)
        .copied()
        .unwrap_or(DEFAULT_BALL_COLOR)
}
