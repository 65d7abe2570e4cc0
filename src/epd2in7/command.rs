//! SPI Commands for the 2.7" IL91874 E-Ink Display
use crate::traits;

/// IL91874 commands
///
/// The addresses are fixed by the controller datasheet. Most of them are
/// never sent by the driver but kept so the table stays complete.
#[allow(dead_code)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Resolution, LUT source (OTP or registers), scan directions, booster switch
    PanelSetting = 0x00,
    /// VDS/VDG enable, VCOM and gate voltage levels, VDH, VDL, VDHR
    PowerSetting = 0x01,
    PowerOff = 0x02,
    PowerOffSequenceSetting = 0x03,
    /// Turns the charge pumps on, the busy line goes low until they are stable
    PowerOn = 0x04,
    PowerOnMeasure = 0x05,
    /// Soft start timing of the three boosters
    BoosterSoftStart = 0x06,
    /// Only accepted with the check code `0xA5`; leaving it needs a hardware reset
    DeepSleep = 0x07,
    /// "Old" image plane, the controller refreshes differentially against it
    DataStartTransmission1 = 0x10,
    DataStop = 0x11,
    /// Drives the panel from frame memory and LUTs, busy stays low until done
    DisplayRefresh = 0x12,
    /// "New" image plane
    DataStartTransmission2 = 0x13,
    PartialDataStartTransmission1 = 0x14,
    /// "New" image data for a window, preceded by an 8 byte window header
    PartialDataStartTransmission2 = 0x15,
    /// With a window header: refreshes only that window.
    /// With a single `0x00`: partial mode off.
    PartialDisplayRefresh = 0x16,
    LutForVcom = 0x20,
    LutWhiteToWhite = 0x21,
    LutBlackToWhite = 0x22,
    LutWhiteToBlack = 0x23,
    LutBlackToBlack = 0x24,
    /// Frame rate, `0x3a` is 100Hz
    PllControl = 0x30,
    TemperatureSensor = 0x40,
    TemperatureSensorCalibration = 0x41,
    TemperatureSensorWrite = 0x42,
    TemperatureSensorRead = 0x43,
    /// Border output and data polarity
    VcomAndDataIntervalSetting = 0x50,
    LowPowerDetection = 0x51,
    TconSetting = 0x60,
    ResolutionSetting = 0x61,
    SourceAndGateSetting = 0x62,
    GetStatus = 0x71,
    AutoMeasurementVcom = 0x80,
    ReadVcomValue = 0x81,
    VcmDcSetting = 0x82,
    ProgramMode = 0xA0,
    ActiveProgramming = 0xA1,
    ReadOtp = 0xA2,
    /// Undocumented register bank, takes a sub-register and a value
    PowerOptimization = 0xF8,
}

impl Command {
    #[cfg(test)]
    pub(crate) const ALL: [Command; 38] = [
        Command::PanelSetting,
        Command::PowerSetting,
        Command::PowerOff,
        Command::PowerOffSequenceSetting,
        Command::PowerOn,
        Command::PowerOnMeasure,
        Command::BoosterSoftStart,
        Command::DeepSleep,
        Command::DataStartTransmission1,
        Command::DataStop,
        Command::DisplayRefresh,
        Command::DataStartTransmission2,
        Command::PartialDataStartTransmission1,
        Command::PartialDataStartTransmission2,
        Command::PartialDisplayRefresh,
        Command::LutForVcom,
        Command::LutWhiteToWhite,
        Command::LutBlackToWhite,
        Command::LutWhiteToBlack,
        Command::LutBlackToBlack,
        Command::PllControl,
        Command::TemperatureSensor,
        Command::TemperatureSensorCalibration,
        Command::TemperatureSensorWrite,
        Command::TemperatureSensorRead,
        Command::VcomAndDataIntervalSetting,
        Command::LowPowerDetection,
        Command::TconSetting,
        Command::ResolutionSetting,
        Command::SourceAndGateSetting,
        Command::GetStatus,
        Command::AutoMeasurementVcom,
        Command::ReadVcomValue,
        Command::VcmDcSetting,
        Command::ProgramMode,
        Command::ActiveProgramming,
        Command::ReadOtp,
        Command::PowerOptimization,
    ];
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Command as CommandTrait;

    #[test]
    fn addresses_are_unique() {
        let mut seen = [false; 256];
        for command in Command::ALL {
            let address = command.address() as usize;
            assert!(!seen[address], "{command:?} shares its address");
            seen[address] = true;
        }
    }

    #[test]
    fn lut_commands_are_consecutive() {
        let luts = [
            Command::LutForVcom,
            Command::LutWhiteToWhite,
            Command::LutBlackToWhite,
            Command::LutWhiteToBlack,
            Command::LutBlackToBlack,
        ];
        for pair in luts.windows(2) {
            assert_eq!(pair[0].address() + 1, pair[1].address());
        }
    }
}
