//! USB vendor / product identifier parsing.
//!
//! Operators copy IDs from `lsusb` (`04b8:0202`), Windows Device Manager
//! (`VID_04B8`) or vendor manuals (`0x04B8`, sometimes decimal `1208`).  The
//! form accepts the `0x`-prefixed hex and plain decimal spellings.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsbIdError {
    #[error("USB identifier is empty")]
    Empty,

    #[error("USB identifier '{0}' is not a hex (0x04B8) or decimal number")]
    NotANumber(String),

    #[error("USB identifier '{0}' does not fit in 16 bits")]
    OutOfRange(String),
}

/// Parses a USB vendor or product identifier.
///
/// # Errors
///
/// Returns [`UsbIdError::Empty`] for blank input, [`UsbIdError::NotANumber`]
/// for anything that is neither `0x`-hex nor decimal, and
/// [`UsbIdError::OutOfRange`] for values above `0xFFFF`.
///
/// # Example
///
/// ```rust
/// use posdev_core::parse_usb_id;
///
/// assert_eq!(parse_usb_id("0x04B8"), parse_usb_id("1208"));
/// ```
pub fn parse_usb_id(input: &str) -> Result<u16, UsbIdError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UsbIdError::Empty);
    }

    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(UsbIdError::NotANumber(trimmed.to_string()));
    }

    let value = u32::from_str_radix(digits, radix)
        .map_err(|_| UsbIdError::OutOfRange(trimmed.to_string()))?;
    u16::try_from(value).map_err(|_| UsbIdError::OutOfRange(trimmed.to_string()))
}

/// Renders an identifier the way vendor manuals print it: `0x04B8`.
pub fn format_usb_id(id: u16) -> String {
    format!("0x{id:04X}")
}
