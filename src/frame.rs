//! Grayscale frames and the packed 1-bit buffer the controller reads
//!
//! The controller scans its frame memory column by column of the landscape
//! image, starting at the right edge. [`encode`] therefore mirrors the frame
//! horizontally and walks it column-major, eight pixels per byte, MSB first.
//! Any change to these three rules shows up as a mirrored or garbled panel.

use bit_field::BitField;

use crate::color::Color;
use crate::error::ConfigError;
use crate::rect::Rect;

/// Number of bytes of a packed buffer for `width * height` pixels
pub const fn buffer_len(width: usize, height: usize) -> usize {
    (width * height + 7) / 8
}

/// A grayscale bitmap, one byte of intensity per pixel, stored row by row
///
/// Zero is black, every other value white.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Wraps `width * height` pixels
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self, ConfigError> {
        if pixels.len() != width as usize * height as usize {
            return Err(ConfigError::PixelCount {
                expected: width as usize * height as usize,
                actual: pixels.len(),
            });
        }
        Ok(Frame {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw row-major intensities
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Intensity at (x, y)
    ///
    /// Panics if the coordinates are outside of the frame.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Black/white value at (x, y)
    pub fn color(&self, x: u32, y: u32) -> Color {
        Color::from_intensity(self.pixel(x, y))
    }
}

/// Packs `frame` into `buffer`
///
/// `buffer` must be exactly [`buffer_len`] bytes long and `width * height` a
/// multiple of 8. The source is read mirrored, so output column `x` comes from
/// frame column `width - 1 - x`. For `x` outer and `y` inner, a nonzero pixel
/// sets bit `0x80 >> (y % 8)` of byte `(y + x * height) / 8`, a black one
/// leaves it cleared.
pub fn encode(frame: &Frame<'_>, buffer: &mut [u8]) -> Result<(), ConfigError> {
    let (width, height) = (frame.width as usize, frame.height as usize);
    if (width * height) % 8 != 0 {
        return Err(ConfigError::Dimensions {
            width: frame.width,
            height: frame.height,
        });
    }
    let expected = buffer_len(width, height);
    if buffer.len() != expected {
        return Err(ConfigError::BufferLength {
            expected,
            actual: buffer.len(),
        });
    }

    buffer.fill(Color::Black.get_byte_value());
    for x in 0..width {
        for y in 0..height {
            let color = Color::from_intensity(frame.pixels[y * width + (width - 1 - x)]);
            buffer[(y + x * height) / 8].set_bit(7 - y % 8, color.get_bit_value() == 1);
        }
    }
    Ok(())
}

/// Packs `frame` into a full panel buffer with its top left corner at (`x`, `y`)
///
/// `buffer` holds a packed `panel_width * panel_height` frame, as produced by
/// [`encode`]. Only the bits covered by the window are touched; they are set
/// for white and cleared for black. The window has to be inside the panel and
/// `y` as well as the frame height multiples of 8, so whole bytes change.
pub fn encode_window(
    frame: &Frame<'_>,
    buffer: &mut [u8],
    panel_width: u32,
    panel_height: u32,
    x: u32,
    y: u32,
) -> Result<(), ConfigError> {
    let expected = buffer_len(panel_width as usize, panel_height as usize);
    if buffer.len() != expected {
        return Err(ConfigError::BufferLength {
            expected,
            actual: buffer.len(),
        });
    }
    let window = Rect::new(x, y, frame.width, frame.height);
    if !window.is_byte_aligned() || !Rect::new(0, 0, panel_width, panel_height).contains(window) {
        return Err(ConfigError::Window);
    }

    let (panel_width, panel_height) = (panel_width as usize, panel_height as usize);
    for column in 0..frame.width {
        // mirrored panel column of frame column x + column
        let mirrored = panel_width - 1 - (x + column) as usize;
        for row in 0..frame.height {
            let py = (y + row) as usize;
            let white = frame.color(column, row).get_bit_value() == 1;
            buffer[(py + mirrored * panel_height) / 8].set_bit(7 - py % 8, white);
        }
    }
    Ok(())
}

/// Iterates the packed bytes of `window` out of a full panel buffer, in the
/// order the controller expects them for a partial transmission
pub(crate) fn window_bytes<'b>(
    buffer: &'b [u8],
    panel_width: u32,
    panel_height: u32,
    window: Rect,
) -> impl Iterator<Item = u8> + 'b {
    let first = (panel_width - window.x - window.w) as usize;
    let row_bytes = panel_height as usize / 8;
    let (start, len) = (window.y as usize / 8, window.h as usize / 8);
    (first..first + window.w as usize)
        .flat_map(move |row| buffer[row * row_bytes + start..row * row_bytes + start + len].iter())
        .copied()
}
