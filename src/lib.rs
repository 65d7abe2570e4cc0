//! A simple Driver for the 2.7" IL91874 E-Ink Display via SPI
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1.0.0
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - Chip select is handled by the [`SpiDevice`](embedded_hal::spi::SpiDevice) implementation,
//!   e.g. `embedded_hal_bus::spi::ExclusiveDevice`
//!
//! ### Other....
//!
//! - Buffersize: Wherever a packed buffer is used it always needs to be of the size
//!   [`buffer_len(width, height)`](buffer_len)
//! - Frames are landscape (264x176 by default). The encoder rotates them into the
//!   portrait memory layout of the controller.
//!
//! # Examples
//!
//!```rust, no_run
//!# use embedded_hal_mock::eh1::*;
//!use epd_il91874::{epd2in7::*, prelude::*};
//!#
//!# let spi = spi::Mock::new(&[]);
//!# let busy_in = digital::Mock::new(&[]);
//!# let dc = digital::Mock::new(&[]);
//!# let rst = digital::Mock::new(&[]);
//!# let delay = delay::NoopDelay::new();
//!
//!// Setup EPD
//!let mut epd = Epd2in7::new(spi, busy_in, dc, rst, delay, Config::default()).unwrap();
//!
//!// A grayscale bitmap from your image pipeline, 0 is black, everything else white
//!let pixels = [0xffu8; (WIDTH * HEIGHT) as usize];
//!let frame = Frame::new(WIDTH, HEIGHT, &pixels).unwrap();
//!
//!// Reset, initialise, transmit and refresh
//!epd.draw(&frame).unwrap();
//!
//!// Set the EPD to sleep
//!epd.sleep().unwrap();
//!```
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

#[cfg(feature = "graphics")]
pub mod graphics;

mod traits;

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod rect;

/// Interface for the physical connection between display and the controlling device
mod interface;

pub mod epd2in7;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::frame::buffer_len;

/// Includes everything important besides the chosen Display
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::{Builder, Config};
    pub use crate::error::{ConfigError, ErrorKind};
    pub use crate::frame::{buffer_len, Frame};
    pub use crate::traits::Cancel;
    pub use crate::SPI_MODE;

    #[cfg(feature = "graphics")]
    pub use crate::graphics::{Display, DisplayRotation};
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};
