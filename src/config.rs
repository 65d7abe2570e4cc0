//! Driver configuration
//!
//! Everything the driver needs to know about the panel and its timing besides
//! the pins themselves, which are handed over as typed `embedded-hal` objects.

use crate::error::ConfigError;
use crate::frame::buffer_len;

/// Frame width of the 2.7" panel in landscape orientation
pub const DEFAULT_WIDTH: u32 = 264;
/// Frame height of the 2.7" panel in landscape orientation
pub const DEFAULT_HEIGHT: u32 = 176;
/// Size of the packed frame store kept by the driver
pub const MAX_BUFFER_LEN: usize = buffer_len(DEFAULT_WIDTH as usize, DEFAULT_HEIGHT as usize);

/// Milliseconds between two reads of the busy line
pub const DEFAULT_BUSY_POLL_INTERVAL_MS: u32 = 100;
/// Give up on the busy line after this many milliseconds
///
/// A full refresh takes around six seconds on this panel.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 30_000;
/// Minimum time the reset line is held low and then high
pub const MIN_RESET_HOLD_MS: u32 = 200;
/// Pause around the data planes of a frame transmission
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 2;
/// The controller needs at least this long around each data plane
pub const MIN_SETTLE_DELAY_MS: u32 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// EPD Configuration
pub struct Config {
    /// Width of a frame in pixels
    pub width: u32,
    /// Height of a frame in pixels, a multiple of 8
    pub height: u32,
    /// Sleep between two polls of the busy line
    pub busy_poll_interval_ms: u32,
    /// Maximum time to wait for the busy line, `None` waits forever
    pub busy_timeout_ms: Option<u32>,
    /// How long the reset line is held in each level
    pub reset_hold_ms: u32,
    /// Pause before and after each data plane
    pub settle_delay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            busy_poll_interval_ms: DEFAULT_BUSY_POLL_INTERVAL_MS,
            busy_timeout_ms: Some(DEFAULT_BUSY_TIMEOUT_MS),
            reset_hold_ms: MIN_RESET_HOLD_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl Config {
    /// Length of a packed frame for these dimensions
    pub fn buffer_len(&self) -> usize {
        buffer_len(self.width as usize, self.height as usize)
    }

    /// Checks the invariants the driver relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        // column-major packing puts every frame column into whole bytes
        if self.width == 0 || self.height == 0 || self.height % 8 != 0 {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.buffer_len() > MAX_BUFFER_LEN {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.reset_hold_ms < MIN_RESET_HOLD_MS {
            return Err(ConfigError::ResetHold(self.reset_hold_ms));
        }
        if self.settle_delay_ms < MIN_SETTLE_DELAY_MS {
            return Err(ConfigError::SettleDelay(self.settle_delay_ms));
        }
        if self.busy_poll_interval_ms == 0 {
            return Err(ConfigError::PollInterval);
        }
        Ok(())
    }
}

/// Builder for [`Config`]
///
/// ```
/// use epd_il91874::config::Builder;
///
/// let config = Builder::new()
///     .busy_timeout_ms(Some(10_000))
///     .reset_hold_ms(250)
///     .build()
///     .unwrap();
/// assert_eq!(config.busy_timeout_ms, Some(10_000));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Starts from the defaults of the 2.7" panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame dimensions in pixels
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Sleep between two polls of the busy line
    pub fn busy_poll_interval_ms(mut self, interval: u32) -> Self {
        self.config.busy_poll_interval_ms = interval;
        self
    }

    /// Upper bound for every busy wait, `None` to wait forever
    pub fn busy_timeout_ms(mut self, timeout: Option<u32>) -> Self {
        self.config.busy_timeout_ms = timeout;
        self
    }

    /// Hold time of each reset level, at least [`MIN_RESET_HOLD_MS`]
    pub fn reset_hold_ms(mut self, hold: u32) -> Self {
        self.config.reset_hold_ms = hold;
        self
    }

    /// Pause before and after each data plane, at least [`MIN_SETTLE_DELAY_MS`]
    pub fn settle_delay_ms(mut self, delay: u32) -> Self {
        self.config.settle_delay_ms = delay;
        self
    }

    /// Validates and returns the configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
