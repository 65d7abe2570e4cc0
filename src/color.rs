//! B/W Color for EPDs

#[cfg(feature = "graphics")]
use embedded_graphics_core::pixelcolor::{BinaryColor, Gray8, GrayColor, PixelColor};

/// Only for the Black/White-Displays
///
/// On this controller a set bit is drawn white and a cleared bit black.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Black color
    Black,
    /// White color
    #[default]
    White,
}

impl Color {
    /// Get the color encoding of the color for one bit
    pub fn get_bit_value(self) -> u8 {
        match self {
            Color::White => 1u8,
            Color::Black => 0u8,
        }
    }

    /// Gets a full byte of black or white pixels
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::White => 0xff,
            Color::Black => 0x00,
        }
    }

    /// Maps an 8-bit intensity: zero is black, anything else white
    pub fn from_intensity(intensity: u8) -> Self {
        if intensity == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Intensity used when writing this color into a grayscale frame
    pub fn intensity(self) -> u8 {
        self.get_byte_value()
    }
}

#[cfg(feature = "graphics")]
impl PixelColor for Color {
    type Raw = ();
}

#[cfg(feature = "graphics")]
impl From<BinaryColor> for Color {
    fn from(b: BinaryColor) -> Color {
        match b {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<Gray8> for Color {
    fn from(gray: Gray8) -> Color {
        Color::from_intensity(gray.luma())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for Gray8 {
    fn from(color: Color) -> Gray8 {
        Gray8::new(color.intensity())
    }
}
