use crate::config::Config;
use crate::error::{EpdError, ErrorKind};
use crate::traits::{Cancel, Command};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// The Connection Interface of all (?) Waveshare EPD-Devices
///
/// Every byte goes out as its own SPI write, with chip select toggled
/// around it by the SPI device.
pub(crate) struct DisplayInterface<SPI, BUSY, DC, RST, DELAY> {
    /// SPI, chip select is driven by the device
    spi: SPI,
    /// Low for busy, Wait until display is ready!
    busy: BUSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    delay: DELAY,
    /// number of ms the idle loop should sleep on
    poll_interval_ms: u32,
    busy_timeout_ms: Option<u32>,
    reset_hold_ms: u32,
}

impl<SPI, BUSY, DC, RST, DELAY> DisplayInterface<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new `DisplayInterface` struct
    pub fn new(spi: SPI, busy: BUSY, dc: DC, rst: RST, delay: DELAY, config: &Config) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
            poll_interval_ms: config.busy_poll_interval_ms,
            busy_timeout_ms: config.busy_timeout_ms,
            reset_hold_ms: config.reset_hold_ms,
        }
    }

    /// Hands the hardware back
    pub(crate) fn release(self) -> (SPI, BUSY, DC, RST, DELAY) {
        (self.spi, self.busy, self.dc, self.rst, self.delay)
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub(crate) fn cmd<T: Command>(
        &mut self,
        command: T,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        // low for commands
        self.dc.set_low().map_err(ErrorKind::DcError)?;

        // Transfer the command over spi
        self.write(command.address())
    }

    /// Basic function for sending an array of u8-values of data over spi
    ///
    /// Enables direct interaction with the device with the help of [cmd()](DisplayInterface::cmd())
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.data_iter(data.iter().copied())
    }

    /// Sends every byte of an iterator as data
    pub(crate) fn data_iter<I>(&mut self, data: I) -> Result<(), EpdError<SPI, BUSY, DC, RST>>
    where
        I: IntoIterator<Item = u8>,
    {
        // high for data
        self.dc.set_high().map_err(ErrorKind::DcError)?;
        for val in data {
            self.write(val)?;
        }
        Ok(())
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub(crate) fn cmd_with_data<T: Command>(
        &mut self,
        command: T,
        data: &[u8],
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    pub(crate) fn data_x_times(
        &mut self,
        val: u8,
        repetitions: u32,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.data_iter((0..repetitions).map(|_| val))
    }

    fn write(&mut self, byte: u8) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.spi.write(&[byte]).map_err(ErrorKind::SpiError)
    }

    /// Waits until device isn't busy anymore
    ///
    /// This is normally handled by the more complicated commands themselves,
    /// but in the case you send data and commands directly you might need to check
    /// if the device is still busy
    ///
    /// is_busy_low
    ///
    ///  - TRUE for the IL91874 (low: busy, high: idle)
    ///  - FALSE for controllers signalling busy with a high level
    ///
    /// Polls every `poll_interval_ms`. Fails with [`ErrorKind::Timeout`] once the
    /// accumulated sleep reaches the configured timeout and with
    /// [`ErrorKind::Cancelled`] as soon as `cancel` fires.
    pub(crate) fn wait_until_idle<C: Cancel>(
        &mut self,
        is_busy_low: bool,
        cancel: &mut C,
    ) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        let mut waited_ms: u32 = 0;
        while self.is_busy(is_busy_low)? {
            if cancel.is_cancelled() {
                warn!("busy wait cancelled after {}ms", waited_ms);
                return Err(ErrorKind::Cancelled);
            }
            if let Some(timeout) = self.busy_timeout_ms {
                if waited_ms >= timeout {
                    warn!("display still busy after {}ms", waited_ms);
                    return Err(ErrorKind::Timeout);
                }
            }
            self.delay.delay_ms(self.poll_interval_ms);
            waited_ms = waited_ms.saturating_add(self.poll_interval_ms);
        }
        trace!("display idle after {}ms", waited_ms);
        Ok(())
    }

    /// Checks if device is still busy
    pub(crate) fn is_busy(&mut self, is_busy_low: bool) -> Result<bool, EpdError<SPI, BUSY, DC, RST>> {
        if is_busy_low {
            self.busy.is_low().map_err(ErrorKind::BusyError)
        } else {
            self.busy.is_high().map_err(ErrorKind::BusyError)
        }
    }

    pub(crate) fn delay_ms(&mut self, duration: u32) {
        self.delay.delay_ms(duration)
    }

    /// Resets the device.
    ///
    /// Pulls the reset line low and then high again, holding each level for
    /// the configured time (200ms at least).
    pub(crate) fn reset(&mut self) -> Result<(), EpdError<SPI, BUSY, DC, RST>> {
        self.rst.set_low().map_err(ErrorKind::RstError)?;
        self.delay.delay_ms(self.reset_hold_ms);
        self.rst.set_high().map_err(ErrorKind::RstError)?;
        self.delay.delay_ms(self.reset_hold_ms);
        Ok(())
    }
}
