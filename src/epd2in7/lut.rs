//! Waveform lookup tables
//!
//! The panel is driven with register LUTs (`PANEL_SETTING` selects them over
//! the ones in OTP), so all five have to be loaded before every refresh.

use super::command::Command;
use super::constants::{LUT_BB, LUT_BW, LUT_VCOM_DC, LUT_WB, LUT_WW};
use crate::error::ConfigError;

/// The five LUT registers of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutRole {
    /// VCOM waveform
    Vcom,
    /// White to white transition
    WhiteToWhite,
    /// Black to white transition
    BlackToWhite,
    /// White to black transition
    WhiteToBlack,
    /// Black to black transition
    BlackToBlack,
}

impl LutRole {
    /// All roles, in the order they are programmed
    pub const ALL: [LutRole; 5] = [
        LutRole::Vcom,
        LutRole::WhiteToWhite,
        LutRole::BlackToWhite,
        LutRole::WhiteToBlack,
        LutRole::BlackToBlack,
    ];

    /// Number of bytes the register takes
    ///
    /// Seven phases of six bytes each, the VCOM table has two more in front.
    pub const fn expected_len(self) -> usize {
        match self {
            LutRole::Vcom => 44,
            _ => 42,
        }
    }

    pub(crate) fn command(self) -> Command {
        match self {
            LutRole::Vcom => Command::LutForVcom,
            LutRole::WhiteToWhite => Command::LutWhiteToWhite,
            LutRole::BlackToWhite => Command::LutBlackToWhite,
            LutRole::WhiteToBlack => Command::LutWhiteToBlack,
            LutRole::BlackToBlack => Command::LutBlackToBlack,
        }
    }
}

/// A full set of waveform tables, one per [`LutRole`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waveform<'a> {
    /// VCOM table, 44 bytes
    pub vcom: &'a [u8],
    /// White to white, 42 bytes
    pub white_to_white: &'a [u8],
    /// Black to white, 42 bytes
    pub black_to_white: &'a [u8],
    /// White to black, 42 bytes
    pub white_to_black: &'a [u8],
    /// Black to black, 42 bytes
    pub black_to_black: &'a [u8],
}

impl Waveform<'static> {
    /// The vendor full refresh waveform
    ///
    /// The white to black register gets the "bb" table and the black to black
    /// register the "wb" table, the way the vendor code loads them.
    pub fn full() -> Self {
        Waveform {
            vcom: &LUT_VCOM_DC,
            white_to_white: &LUT_WW,
            black_to_white: &LUT_BW,
            white_to_black: &LUT_BB,
            black_to_black: &LUT_WB,
        }
    }
}

impl Default for Waveform<'static> {
    fn default() -> Self {
        Waveform::full()
    }
}

impl<'a> Waveform<'a> {
    /// Table for one register
    pub fn table(&self, role: LutRole) -> &'a [u8] {
        match role {
            LutRole::Vcom => self.vcom,
            LutRole::WhiteToWhite => self.white_to_white,
            LutRole::BlackToWhite => self.black_to_white,
            LutRole::WhiteToBlack => self.white_to_black,
            LutRole::BlackToBlack => self.black_to_black,
        }
    }

    /// Checks every table against the length of its register
    pub fn validate(&self) -> Result<(), ConfigError> {
        for role in LutRole::ALL {
            let actual = self.table(role).len();
            if actual != role.expected_len() {
                return Err(ConfigError::LutLength {
                    role,
                    expected: role.expected_len(),
                    actual,
                });
            }
        }
        Ok(())
    }
}
