//! Register values and waveform tables of the 2.7" panel
//!
//! All of these come from the panel vendor and are sent verbatim.

/// VDS_EN, VDG_EN / VCOM_HV, VGHL_LV / VDH / VDL / VDHR
pub(crate) const POWER_SETTING: [u8; 5] = [0x03, 0x00, 0x2b, 0x2b, 0x09];
pub(crate) const BOOSTER_SOFT_START: [u8; 3] = [0x07, 0x07, 0x17];
/// (sub-register, value) pairs for the power optimization bank
pub(crate) const POWER_OPTIMIZATION: [[u8; 2]; 7] = [
    [0x60, 0xa5],
    [0x89, 0xa5],
    [0x90, 0x00],
    [0x93, 0x2a],
    [0xa0, 0xa5],
    [0xa1, 0x00],
    [0x73, 0x41],
];
pub(crate) const PARTIAL_MODE_OFF: u8 = 0x00;
/// KW mode, LUT from registers
pub(crate) const PANEL_SETTING: u8 = 0xaf;
/// 100Hz
pub(crate) const PLL_CONTROL: u8 = 0x3a;
pub(crate) const VCM_DC_SETTING: u8 = 0x12;

pub(crate) const VCOM_DATA_INTERVAL_SLEEP: u8 = 0xf7;
pub(crate) const DEEP_SLEEP_CHECK_CODE: u8 = 0xa5;

#[rustfmt::skip]
pub(crate) const LUT_VCOM_DC: [u8; 44] = [
    0x00, 0x00,
    0x00, 0x08, 0x00, 0x00, 0x00, 0x02,
    0x60, 0x28, 0x28, 0x00, 0x00, 0x01,
    0x00, 0x14, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x12, 0x12, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_WW: [u8; 42] = [
    0x40, 0x08, 0x00, 0x00, 0x00, 0x02,
    0x90, 0x28, 0x28, 0x00, 0x00, 0x01,
    0x40, 0x14, 0x00, 0x00, 0x00, 0x01,
    0xA0, 0x12, 0x12, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_BW: [u8; 42] = [
    0x40, 0x08, 0x00, 0x00, 0x00, 0x02,
    0x90, 0x28, 0x28, 0x00, 0x00, 0x01,
    0x40, 0x14, 0x00, 0x00, 0x00, 0x01,
    0xA0, 0x12, 0x12, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_BB: [u8; 42] = [
    0x80, 0x08, 0x00, 0x00, 0x00, 0x02,
    0x90, 0x28, 0x28, 0x00, 0x00, 0x01,
    0x80, 0x14, 0x00, 0x00, 0x00, 0x01,
    0x50, 0x12, 0x12, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_WB: [u8; 42] = [
    0x80, 0x08, 0x00, 0x00, 0x00, 0x02,
    0x90, 0x28, 0x28, 0x00, 0x00, 0x01,
    0x80, 0x14, 0x00, 0x00, 0x00, 0x01,
    0x50, 0x12, 0x12, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];
