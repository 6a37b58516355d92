//! Gorb output report encodings.
//!
//! The hardware accepts two fixed-layout output reports, both with
//! report ID 0x00:
//! - set-DPI: `[0x00, 0x02, dpi_lo, dpi_hi]` (little-endian 16-bit DPI)
//! - macro:   `[0x00, 0x03, dx_lo, dx_hi, dy_lo, dy_hi, buttons]`
//!
//! These layouts are the binary contract with the device and must be
//! reproduced byte for byte.

use crate::error::{Error, Result};

/// Report ID shared by both commands.
pub const REPORT_ID: u8 = 0x00;
/// Subcode for the set-DPI report.
pub const SUBCODE_SET_DPI: u8 = 0x02;
/// Subcode for the macro report.
pub const SUBCODE_MACRO: u8 = 0x03;

/// Lowest DPI the sensor accepts.
pub const DPI_MIN: u16 = 50;
/// Highest DPI the sensor accepts.
pub const DPI_MAX: u16 = 26_000;

/// Set-DPI report length.
pub const SET_DPI_LEN: usize = 4;
/// Macro report length.
pub const MACRO_LEN: usize = 7;

/// Clamp a requested DPI into the sensor's accepted range.
///
/// Out-of-range requests are clamped, never rejected.
pub fn clamp_dpi(raw: i64) -> u16 {
    raw.clamp(DPI_MIN as i64, DPI_MAX as i64) as u16
}

/// Encode a set-DPI report. Returns the report and the clamped DPI
/// actually sent.
pub fn encode_set_dpi(raw: i64) -> ([u8; SET_DPI_LEN], u16) {
    let dpi = clamp_dpi(raw);
    let report = [
        REPORT_ID,
        SUBCODE_SET_DPI,
        (dpi & 0xFF) as u8,
        (dpi >> 8) as u8,
    ];
    (report, dpi)
}

/// Parse a macro buttons token into the report's bitmask byte.
///
/// The token is a string of `0`/`1` characters: shorter than 8 chars it
/// is left-padded with `0`, longer it is truncated to the first 8, then
/// parsed base-2. An absent token is bitmask 0.
pub fn parse_button_bits(token: Option<&str>) -> Result<u8> {
    let Some(token) = token else {
        return Ok(0);
    };

    let normalized: String = if token.len() > 8 {
        token.chars().take(8).collect()
    } else {
        format!("{token:0>8}")
    };

    u8::from_str_radix(&normalized, 2)
        .map_err(|_| Error::Parse(format!("invalid button bits: {token:?}")))
}

/// Encode a macro report from signed deltas and an optional buttons token.
///
/// `dx`/`dy` are split into little-endian 16-bit values as `v & 0xFF`,
/// `(v >> 8) & 0xFF`; values outside 16 bits wrap.
pub fn encode_macro(dx: i64, dy: i64, buttons: Option<&str>) -> Result<[u8; MACRO_LEN]> {
    let bits = parse_button_bits(buttons)?;
    Ok([
        REPORT_ID,
        SUBCODE_MACRO,
        (dx & 0xFF) as u8,
        ((dx >> 8) & 0xFF) as u8,
        (dy & 0xFF) as u8,
        ((dy >> 8) & 0xFF) as u8,
        bits,
    ])
}
