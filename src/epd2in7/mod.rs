//! A simple Driver for the Waveshare 2.7" E-Ink Display (IL91874) via SPI
//!
//! [Documentation](https://www.waveshare.com/wiki/2.7inch_e-Paper_HAT)
//!
//! Every full draw resets the controller, runs the init sequence, loads the
//! LUTs and then streams an all-white "old" plane followed by the new frame,
//! so each refresh starts from a known state.
//!
//! # Example
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
//!let config = Builder::new().busy_timeout_ms(Some(10_000)).build().unwrap();
//!let mut epd = Epd2in7::new(spi, busy_in, dc, rst, delay, config).unwrap();
//!
//!let mut pixels = [0xffu8; (WIDTH * HEIGHT) as usize];
//!// a black bar across the top
//!pixels[..(WIDTH * 16) as usize].fill(0);
//!epd.draw(&Frame::new(WIDTH, HEIGHT, &pixels).unwrap()).unwrap();
//!
//!// redraw only a 64x32 window at (100, 48)
//!let window = [0u8; 64 * 32];
//!epd.quick_draw(&Frame::new(64, 32, &window).unwrap(), 100, 48).unwrap();
//!
//!epd.sleep().unwrap();
//!```

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

use crate::color::Color;
use crate::config::{Config, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_BUFFER_LEN};
use crate::error::{ConfigError, EpdError, ErrorKind};
use crate::frame::{encode, encode_window, window_bytes, Frame};
use crate::interface::DisplayInterface;
use crate::rect::Rect;
use crate::traits::Cancel;

// The Lookup Tables for the Display
mod constants;
use self::constants::*;

pub mod lut;
use self::lut::{LutRole, Waveform};

pub(crate) mod command;
use self::command::Command;

/// Width of a frame, the panel is used in landscape
pub const WIDTH: u32 = DEFAULT_WIDTH;
/// Height of a frame
pub const HEIGHT: u32 = DEFAULT_HEIGHT;
/// Default Background Color
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::White;
const IS_BUSY_LOW: bool = true;

/// Full size grayscale buffer for use with the 2in7 EPD
#[cfg(feature = "graphics")]
pub type Display2in7 = crate::graphics::Display<WIDTH, HEIGHT, { (WIDTH * HEIGHT) as usize }>;

/// Where the driver is within a draw cycle
///
/// A full draw walks `Resetting` through `RefreshRequested` and ends in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Nothing was sent since the driver was created
    #[default]
    Uninitialized,
    /// Reset pulse in progress
    Resetting,
    /// Power, booster and power optimization registers
    PowerConfiguring,
    /// Panel setting, PLL and VCOM after power on
    PanelConfiguring,
    /// Writing the waveform tables
    LutLoading,
    /// Initialised, ready for frame data
    Ready,
    /// Sending the old image plane
    TransmittingOld,
    /// Sending the new image plane
    TransmittingNew,
    /// Refresh issued, waiting for the busy line
    RefreshRequested,
    /// Frame is on the panel
    Idle,
    /// Deep sleep, needs a reset (any draw does one)
    Sleeping,
    /// An operation failed half way, the controller state is unknown
    Faulted,
}

/// Epd2in7 driver
pub struct Epd2in7<SPI, BUSY, DC, RST, DELAY> {
    /// Connection Interface
    interface: DisplayInterface<SPI, BUSY, DC, RST, DELAY>,
    config: Config,
    waveform: Waveform<'static>,
    state: DriverState,
    /// Packed copy of the frame in the controller, valid while `has_frame`
    frame: [u8; MAX_BUFFER_LEN],
    has_frame: bool,
}

impl<SPI, BUSY, DC, RST, DELAY> Epd2in7<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new driver from a SPI device, Busy InputPin, DC and RST OutputPins
    ///
    /// Nothing is sent to the display yet, every draw initialises it.
    pub fn new(
        spi: SPI,
        busy: BUSY,
        dc: DC,
        rst: RST,
        delay: DELAY,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let interface = DisplayInterface::new(spi, busy, dc, rst, delay, &config);

        Ok(Epd2in7 {
            interface,
            config,
            waveform: Waveform::full(),
            state: DriverState::Uninitialized,
            frame: [DEFAULT_BACKGROUND_COLOR.get_byte_value(); MAX_BUFFER_LEN],
            has_frame: false,
        })
    }

    /// Gives back the SPI device, the pins and the delay
    pub fn release(self) -> (SPI, BUSY, DC, RST, DELAY) {
        self.interface.release()
    }

    /// Get the width of the display
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Get the height of the display
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// The configuration the driver was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current position in the draw cycle
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Packed buffer of the frame currently on the panel
    ///
    /// `None` before the first successful draw and after any failure.
    pub fn last_frame(&self) -> Option<&[u8]> {
        self.has_frame
            .then(|| &self.frame[..self.config.buffer_len()])
    }

    /// Replaces the waveform tables used by the following [`init`](Self::init) calls
    ///
    /// The lengths are checked when the tables are loaded.
    pub fn set_waveform(&mut self, waveform: Waveform<'static>) {
        self.waveform = waveform;
    }

    /// Pulses the reset line
    pub fn reset(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.state = DriverState::Resetting;
        let result = self.interface.reset();
        self.guard(result)?;
        // registers are back to their power-on values
        self.state = DriverState::Uninitialized;
        Ok(())
    }

    /// This initialises the EPD and powers it up
    ///
    /// Runs before every full frame. This function calls [reset](Self::reset),
    /// so you don't need to call reset your self when trying to wake your device up
    /// after setting it to sleep.
    pub fn init(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.init_with(&mut || false)
    }

    /// [`init`](Self::init) that can be cancelled while waiting for power on
    pub fn init_with<C: Cancel>(
        &mut self,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        let result = self.init_sequence(cancel);
        self.guard(result)
    }

    /// Loads the five waveform tables into the controller
    ///
    /// Fails with [`ConfigError::LutLength`] before anything is sent if one of
    /// them has the wrong size.
    pub fn set_lut(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.waveform.validate()?;
        let previous = self.state;
        let result = self.load_lut();
        self.guard(result)?;
        self.state = previous;
        Ok(())
    }

    /// Wait until the display has stopped processing data
    ///
    /// Bounded by [`Config::busy_timeout_ms`].
    pub fn wait_until_idle(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.wait_until_idle_with(&mut || false)
    }

    /// Like [`wait_until_idle`](Self::wait_until_idle), but gives up as soon as
    /// `cancel` says so
    pub fn wait_until_idle_with<C: Cancel>(
        &mut self,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        let result = self.wait(cancel);
        self.guard(result)
    }

    /// Draws a full frame
    ///
    /// The frame must have the configured dimensions. Blocks until the panel
    /// has finished refreshing, which takes several seconds.
    pub fn draw(&mut self, frame: &Frame<'_>) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.draw_with(frame, &mut || false)
    }

    /// [`draw`](Self::draw), asking `cancel` before every pause and while the
    /// display is busy
    ///
    /// A cancelled draw fails with [`ErrorKind::Cancelled`] and leaves the
    /// driver [`Faulted`](DriverState::Faulted).
    pub fn draw_with<C: Cancel>(
        &mut self,
        frame: &Frame<'_>,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        if (frame.width(), frame.height()) != (self.config.width, self.config.height) {
            return Err(ConfigError::FrameSize {
                expected: (self.config.width, self.config.height),
                actual: (frame.width(), frame.height()),
            }
            .into());
        }
        let len = self.config.buffer_len();
        encode(frame, &mut self.frame[..len])?;
        self.full_refresh(cancel)
    }

    /// Draws an already packed frame, see [`crate::frame::encode`]
    pub fn draw_buffer(&mut self, buffer: &[u8]) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.draw_buffer_with(buffer, &mut || false)
    }

    /// Cancellable [`draw_buffer`](Self::draw_buffer)
    pub fn draw_buffer_with<C: Cancel>(
        &mut self,
        buffer: &[u8],
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        let len = self.config.buffer_len();
        if buffer.len() != len {
            return Err(ConfigError::BufferLength {
                expected: len,
                actual: buffer.len(),
            }
            .into());
        }
        self.frame[..len].copy_from_slice(buffer);
        self.full_refresh(cancel)
    }

    /// Clears the panel to the background color
    pub fn clear_frame(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.clear_frame_with(&mut || false)
    }

    /// Cancellable [`clear_frame`](Self::clear_frame)
    pub fn clear_frame_with<C: Cancel>(
        &mut self,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.frame.fill(DEFAULT_BACKGROUND_COLOR.get_byte_value());
        self.full_refresh(cancel)
    }

    /// Redraws only the window covered by `frame`, with its top left corner at (`x`, `y`)
    ///
    /// `y` and the frame height have to be multiples of 8. Initialises the
    /// controller first unless a draw just finished. The retained frame is
    /// patched, so [`last_frame`](Self::last_frame) keeps matching the panel.
    pub fn quick_draw(
        &mut self,
        frame: &Frame<'_>,
        x: u32,
        y: u32,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.quick_draw_with(frame, x, y, &mut || false)
    }

    /// Cancellable [`quick_draw`](Self::quick_draw)
    pub fn quick_draw_with<C: Cancel>(
        &mut self,
        frame: &Frame<'_>,
        x: u32,
        y: u32,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        let window = Rect::new(x, y, frame.width(), frame.height());
        let panel = Rect::new(0, 0, self.config.width, self.config.height);
        if !window.is_byte_aligned() || !panel.contains(window) {
            return Err(ConfigError::Window.into());
        }
        let len = self.config.buffer_len();
        encode_window(
            frame,
            &mut self.frame[..len],
            self.config.width,
            self.config.height,
            x,
            y,
        )?;

        let result = self.partial_refresh(window, cancel);
        self.guard(result)
    }

    /// Let the device enter deep-sleep mode to save power.
    ///
    /// The deep sleep mode returns to standby with a hardware reset, the next
    /// draw takes care of that.
    pub fn sleep(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.sleep_with(&mut || false)
    }

    /// Cancellable [`sleep`](Self::sleep)
    pub fn sleep_with<C: Cancel>(
        &mut self,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        let result = self.sleep_sequence(cancel);
        self.guard(result)
    }

    /// Wakes the device up from sleep
    pub fn wake_up(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.init()
    }

    fn init_sequence<C: Cancel>(
        &mut self,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.waveform.validate()?;
        debug!("init from {:?}", self.state);

        self.state = DriverState::Resetting;
        self.interface.reset()?;

        self.state = DriverState::PowerConfiguring;
        self.interface
            .cmd_with_data(Command::PowerSetting, &POWER_SETTING)?;
        self.interface
            .cmd_with_data(Command::BoosterSoftStart, &BOOSTER_SOFT_START)?;
        for register in POWER_OPTIMIZATION.iter() {
            self.interface
                .cmd_with_data(Command::PowerOptimization, register)?;
        }
        self.interface
            .cmd_with_data(Command::PartialDisplayRefresh, &[PARTIAL_MODE_OFF])?;
        self.interface.cmd(Command::PowerOn)?;
        // panel registers are ignored until the charge pumps are up
        self.wait(cancel)?;

        self.state = DriverState::PanelConfiguring;
        self.interface
            .cmd_with_data(Command::PanelSetting, &[PANEL_SETTING])?;
        self.interface
            .cmd_with_data(Command::PllControl, &[PLL_CONTROL])?;
        self.interface
            .cmd_with_data(Command::VcmDcSetting, &[VCM_DC_SETTING])?;
        self.settle(cancel)?;

        self.load_lut()?;
        self.state = DriverState::Ready;
        Ok(())
    }

    fn load_lut(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.state = DriverState::LutLoading;
        let waveform = self.waveform;
        for role in LutRole::ALL {
            self.interface
                .cmd_with_data(role.command(), waveform.table(role))?;
        }
        Ok(())
    }

    /// Init, both planes, refresh
    fn full_refresh<C: Cancel>(
        &mut self,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        // the store no longer matches the panel until the refresh is through
        self.has_frame = false;
        let result = self
            .init_sequence(cancel)
            .and_then(|()| self.transmit(cancel));
        self.guard(result)?;
        self.has_frame = true;
        debug!("frame drawn");
        Ok(())
    }

    fn transmit<C: Cancel>(&mut self, cancel: &mut C) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        let len = self.config.buffer_len();

        self.state = DriverState::TransmittingOld;
        self.interface.cmd(Command::DataStartTransmission1)?;
        self.settle(cancel)?;
        // a white old plane forces a complete redraw instead of a delta
        self.interface
            .data_x_times(Color::White.get_byte_value(), len as u32)?;
        self.settle(cancel)?;

        self.state = DriverState::TransmittingNew;
        self.interface.cmd(Command::DataStartTransmission2)?;
        self.settle(cancel)?;
        self.interface.data(&self.frame[..len])?;
        self.settle(cancel)?;

        self.state = DriverState::RefreshRequested;
        trace!("refresh of {} bytes", len);
        self.interface.cmd(Command::DisplayRefresh)?;
        self.wait(cancel)?;
        self.state = DriverState::Idle;
        Ok(())
    }

    fn partial_refresh<C: Cancel>(
        &mut self,
        window: Rect,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        if !matches!(self.state, DriverState::Idle | DriverState::Ready) {
            self.init_sequence(cancel)?;
        }
        let header = self.window_header(window);
        let (width, height) = (self.config.width, self.config.height);
        let len = self.config.buffer_len();
        trace!("partial refresh of {:?}", window);

        self.state = DriverState::TransmittingNew;
        self.interface
            .cmd_with_data(Command::PartialDataStartTransmission2, &header)?;
        self.settle(cancel)?;
        self.interface
            .data_iter(window_bytes(&self.frame[..len], width, height, window))?;
        self.settle(cancel)?;

        self.state = DriverState::RefreshRequested;
        self.interface
            .cmd_with_data(Command::PartialDisplayRefresh, &header)?;
        self.wait(cancel)?;
        self.state = DriverState::Idle;
        Ok(())
    }

    /// Window in controller coordinates: the source axis runs along the frame
    /// rows, the gate axis along the mirrored frame columns.
    fn window_header(&self, window: Rect) -> [u8; 8] {
        // the window was checked to lie inside the panel: no underflow, high bytes fit
        let (source, source_len) = (window.y, window.h);
        let (gate, gate_len) = (self.config.width - window.x - window.w, window.w);
        [
            (source >> 8) as u8,
            (source & 0xf8) as u8,
            (gate >> 8) as u8,
            (gate & 0xff) as u8,
            (source_len >> 8) as u8,
            (source_len & 0xf8) as u8,
            (gate_len >> 8) as u8,
            (gate_len & 0xff) as u8,
        ]
    }

    fn sleep_sequence<C: Cancel>(
        &mut self,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.wait(cancel)?;
        self.interface
            .cmd_with_data(Command::VcomAndDataIntervalSetting, &[VCOM_DATA_INTERVAL_SLEEP])?;
        self.interface.cmd(Command::PowerOff)?;
        self.wait(cancel)?;
        self.interface
            .cmd_with_data(Command::DeepSleep, &[DEEP_SLEEP_CHECK_CODE])?;
        debug!("deep sleep");
        self.state = DriverState::Sleeping;
        Ok(())
    }

    fn wait<C: Cancel>(&mut self, cancel: &mut C) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.interface.wait_until_idle(IS_BUSY_LOW, cancel)
    }

    /// Settle delay between two steps of a transmission
    fn settle<C: Cancel>(&mut self, cancel: &mut C) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        if cancel.is_cancelled() {
            warn!("cancelled while {:?}", self.state);
            return Err(ErrorKind::Cancelled);
        }
        self.interface.delay_ms(self.config.settle_delay_ms);
        Ok(())
    }

    /// Marks the driver as faulted when something went wrong on the wire.
    /// Configuration errors are raised before any write and leave it untouched.
    fn guard<T>(
        &mut self,
        result: Result<T, EpdError<SPI, BUSY, DC, RST>>,
    ) -> Result<T, EpdError<SPI, BUSY, DC, RST>> {
        if let Err(err) = &result {
            if !matches!(err, ErrorKind::Config(_)) {
                warn!("aborted while {:?}", self.state);
                self.state = DriverState::Faulted;
                self.has_frame = false;
            }
        }
        result
    }
}
