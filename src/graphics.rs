//! Graphics Support for EPDs

use crate::color::Color;
use crate::error::ConfigError;
use crate::frame::Frame;
use embedded_graphics_core::prelude::*;

/// Display rotation, only 90° increments supported
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Display buffer used for drawing with embedded graphics
///
/// Holds one intensity byte per pixel, the way [`Frame`] expects it, and can
/// be handed to the driver with [`frame()`](Display::frame).
///
/// - WIDTH: width in pixel when display is not rotated
/// - HEIGHT: height in pixel when display is not rotated
/// - PIXELS: `WIDTH * HEIGHT`, redundant until const generic expressions are stabilized
pub struct Display<const WIDTH: u32, const HEIGHT: u32, const PIXELS: usize> {
    pixels: [u8; PIXELS],
    rotation: DisplayRotation,
}

impl<const WIDTH: u32, const HEIGHT: u32, const PIXELS: usize> Default
    for Display<WIDTH, HEIGHT, PIXELS>
{
    /// A white display
    // inline is necessary here to allow heap allocation via Box on stack limited programs
    #[inline(always)]
    fn default() -> Self {
        Self {
            pixels: [Color::White.intensity(); PIXELS],
            rotation: DisplayRotation::default(),
        }
    }
}

/// For use with embedded_grahics
impl<const WIDTH: u32, const HEIGHT: u32, const PIXELS: usize> DrawTarget
    for Display<WIDTH, HEIGHT, PIXELS>
{
    type Color = Color;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.set_pixel(pixel);
        }
        Ok(())
    }
}

/// For use with embedded_grahics
impl<const WIDTH: u32, const HEIGHT: u32, const PIXELS: usize> OriginDimensions
    for Display<WIDTH, HEIGHT, PIXELS>
{
    fn size(&self) -> Size {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => Size::new(WIDTH, HEIGHT),
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => Size::new(HEIGHT, WIDTH),
        }
    }
}

impl<const WIDTH: u32, const HEIGHT: u32, const PIXELS: usize> Display<WIDTH, HEIGHT, PIXELS> {
    /// Row-major intensities, unrotated
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The current content as a frame for [`Epd2in7::draw`](crate::epd2in7::Epd2in7::draw)
    ///
    /// Fails if `PIXELS` is not `WIDTH * HEIGHT`.
    pub fn frame(&self) -> Result<Frame<'_>, ConfigError> {
        Frame::new(WIDTH, HEIGHT, &self.pixels)
    }

    /// Set the display rotation.
    ///
    /// This only concerns future drawing made to it. Anything aready drawn
    /// stays as it is in the buffer.
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Get current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Set a specific pixel color on this display
    pub fn set_pixel(&mut self, pixel: Pixel<Color>) {
        let Pixel(point, color) = pixel;

        // as i32 = never use more than 2 billion pixel per line or per column
        let (width, height) = (WIDTH as i32, HEIGHT as i32);
        let (x, y) = match self.rotation {
            DisplayRotation::Rotate0 => (point.x, point.y),
            DisplayRotation::Rotate90 => (width - 1 - point.y, point.x),
            DisplayRotation::Rotate180 => (width - 1 - point.x, height - 1 - point.y),
            DisplayRotation::Rotate270 => (point.y, height - 1 - point.x),
        };

        // don't do anything in case of out of range
        if x < 0 || x >= width || y < 0 || y >= height {
            return;
        }

        if let Some(value) = self.pixels.get_mut((y * width + x) as usize) {
            *value = color.intensity();
        }
    }
}
