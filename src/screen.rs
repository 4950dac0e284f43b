// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's monochrome framebuffer

use std::fmt::{Display, Formatter, Result};

/// The built-in hexadecimal font: sixteen 4x5 glyphs, 0 through F
#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// A grid of [Screen::WIDTH] x [Screen::HEIGHT] pixels.
///
/// Pixel `(x, y)` lives at linear index `y * Screen::WIDTH + x`.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    pixels: Vec<bool>,
}

impl Screen {
    /// Width of the screen, in pixels
    pub const WIDTH: usize = 64;
    /// Height of the screen, in pixels
    pub const HEIGHT: usize = 32;
    /// Total number of pixels
    pub const LEN: usize = Self::WIDTH * Self::HEIGHT;
    /// Number of bytes (rows) in one font glyph
    pub const BYTES_PER_GLYPH: usize = 5;

    /// Constructs a blank screen
    pub fn new() -> Self {
        Screen {
            pixels: vec![false; Self::LEN],
        }
    }

    /// Gets the pixel at `(x, y)`, or [None] if off-screen
    /// # Examples
    /// ```rust
    /// # use chip8_vm::prelude::*;
    /// let mut screen = Screen::new();
    /// screen[2 * Screen::WIDTH + 5] = true;
    /// assert_eq!(Some(true), screen.get(5, 2));
    /// assert_eq!(None, screen.get(Screen::WIDTH, 0));
    /// ```
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < Self::WIDTH && y < Self::HEIGHT {
            Some(self.pixels[y * Self::WIDTH + x])
        } else {
            None
        }
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Counts the pixels that are on
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Turns every pixel off
    pub fn reset(&mut self) {
        self.pixels.fill(false);
    }

    /// XORs `on` into the pixel at `index`, returning true if a lit pixel went dark
    #[inline(always)]
    pub fn toggle(&mut self, index: usize, on: bool) -> bool {
        let pixel = &mut self.pixels[index];
        let erased = *pixel && on;
        *pixel ^= on;
        erased
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for Screen {
    type Output = bool;
    fn index(&self, index: usize) -> &bool {
        &self.pixels[index]
    }
}

impl std::ops::IndexMut<usize> for Screen {
    fn index_mut(&mut self, index: usize) -> &mut bool {
        &mut self.pixels[index]
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Screen")
            .field("lit", &self.lit())
            .finish_non_exhaustive()
    }
}

/// Prints the screen using half-block characters, two pixel rows per line
impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for rows in self.pixels.chunks_exact(Self::WIDTH * 2) {
            let (top, bottom) = rows.split_at(Self::WIDTH);
            for (&t, &b) in top.iter().zip(bottom) {
                f.write_str(match (t, b) {
                    (true, true) => "█",
                    (true, false) => "▀",
                    (false, true) => "▄",
                    (false, false) => " ",
                })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
