//! Error types of the driver
use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{digital, spi};

use crate::epd2in7::lut::LutRole;

/// Epd error type
///
/// Generic over the error types of the SPI device and the three GPIO lines.
/// Whatever was sent before a bus or pin error, the controller state is unknown
/// afterwards: reset and initialise again before the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind<SPI, BUSY, DC, RST> {
    /// Encountered an SPI error
    SpiError(SPI),

    /// Encountered an error on Busy GPIO
    BusyError(BUSY),

    /// Encountered an error on DC GPIO
    DcError(DC),

    /// Encountered an error on RST GPIO
    RstError(RST),

    /// Invalid configuration, detected before anything was written to the device
    Config(ConfigError),

    /// The busy line did not report idle within the configured timeout
    Timeout,

    /// The caller cancelled a busy wait or a pause between two steps
    Cancelled,
}

/// [`ErrorKind`] with the error types of concrete HAL implementations filled in
pub type EpdError<SPI, BUSY, DC, RST> = ErrorKind<
    <SPI as spi::ErrorType>::Error,
    <BUSY as digital::ErrorType>::Error,
    <DC as digital::ErrorType>::Error,
    <RST as digital::ErrorType>::Error,
>;

impl<SPI, BUSY, DC, RST> From<ConfigError> for ErrorKind<SPI, BUSY, DC, RST> {
    fn from(err: ConfigError) -> Self {
        ErrorKind::Config(err)
    }
}

impl<SPI, BUSY, DC, RST> Display for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: Debug,
    BUSY: Debug,
    DC: Debug,
    RST: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => write!(f, "SPI write failed: {err:?}"),
            Self::BusyError(err) => write!(f, "reading the busy line failed: {err:?}"),
            Self::DcError(err) => write!(f, "driving the data/command line failed: {err:?}"),
            Self::RstError(err) => write!(f, "driving the reset line failed: {err:?}"),
            Self::Config(err) => Display::fmt(err, f),
            Self::Timeout => write!(f, "display stayed busy past the configured timeout"),
            Self::Cancelled => write!(f, "cancelled by the caller"),
        }
    }
}

/// Configuration errors
///
/// These are always reported before the first byte goes out over the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A waveform table does not have the length its LUT register expects
    LutLength {
        /// Which of the five tables
        role: LutRole,
        /// Required length
        expected: usize,
        /// Length of the offending table
        actual: usize,
    },
    /// A packed buffer has the wrong size for the panel
    BufferLength {
        /// `buffer_len(width, height)`
        expected: usize,
        /// Length of the given buffer
        actual: usize,
    },
    /// Frame dimensions or pixel count do not match
    FrameSize {
        /// Expected (width, height)
        expected: (u32, u32),
        /// Actual (width, height)
        actual: (u32, u32),
    },
    /// Panel dimensions the encoder or the controller can't handle
    Dimensions {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// A partial window is outside of the panel or not byte aligned
    Window,
    /// Pixel slice does not hold `width * height` intensities
    PixelCount {
        /// `width * height`
        expected: usize,
        /// Length of the given slice
        actual: usize,
    },
    /// Reset pulse shorter than the controller requires
    ResetHold(u32),
    /// Settle time around the data planes shorter than the controller requires
    SettleDelay(u32),
    /// The busy poll interval must not be zero
    PollInterval,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LutLength {
                role,
                expected,
                actual,
            } => write!(
                f,
                "{role:?} lookup table has {actual} bytes, {expected} expected"
            ),
            Self::BufferLength { expected, actual } => {
                write!(f, "buffer has {actual} bytes, {expected} expected")
            }
            Self::FrameSize { expected, actual } => write!(
                f,
                "frame is {}x{}, panel is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::Dimensions { width, height } => {
                write!(f, "unsupported panel dimensions {width}x{height}")
            }
            Self::Window => write!(f, "partial window outside of the panel or not aligned"),
            Self::PixelCount { expected, actual } => {
                write!(f, "frame has {actual} pixels, {expected} expected")
            }
            Self::ResetHold(ms) => write!(f, "reset hold of {ms}ms is too short"),
            Self::SettleDelay(ms) => write!(f, "settle delay of {ms}ms is too short"),
            Self::PollInterval => write!(f, "busy poll interval must not be zero"),
        }
    }
}
