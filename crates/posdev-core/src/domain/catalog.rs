//! Static option catalogs shown in the device forms' dropdowns.
//!
//! Every catalog is either a constant slice (numeric choices such as baud
//! rates) or a small enum with an `ALL` list in display order and a `label()`
//! for the UI.  The validator uses the same tables, so a value the dropdown
//! cannot produce is also rejected when it arrives in a hand-edited record.

use serde::{Deserialize, Serialize};

// ── Serial line parameters ────────────────────────────────────────────────────

/// Baud rates offered for serial devices, slowest first.
pub const BAUD_RATES: &[u32] = &[1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

/// Data bits per serial character.
pub const DATA_BITS: &[u8] = &[5, 6, 7, 8];

/// Stop bits after each serial character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StopBits {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "1.5")]
    OneAndHalf,
    #[serde(rename = "2")]
    Two,
}

impl StopBits {
    pub const ALL: [StopBits; 3] = [StopBits::One, StopBits::OneAndHalf, StopBits::Two];

    pub fn label(self) -> &'static str {
        match self {
            StopBits::One => "1",
            StopBits::OneAndHalf => "1.5",
            StopBits::Two => "2",
        }
    }
}

/// Serial parity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
    Mark,
    Space,
}

impl Parity {
    pub const ALL: [Parity; 5] = [
        Parity::None,
        Parity::Odd,
        Parity::Even,
        Parity::Mark,
        Parity::Space,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Parity::None => "None",
            Parity::Odd => "Odd",
            Parity::Even => "Even",
            Parity::Mark => "Mark",
            Parity::Space => "Space",
        }
    }
}

/// Serial flow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowControl {
    #[default]
    None,
    /// XON/XOFF.
    Software,
    /// RTS/CTS.
    Hardware,
}

impl FlowControl {
    pub const ALL: [FlowControl; 3] = [FlowControl::None, FlowControl::Software, FlowControl::Hardware];

    pub fn label(self) -> &'static str {
        match self {
            FlowControl::None => "None",
            FlowControl::Software => "XON/XOFF",
            FlowControl::Hardware => "RTS/CTS",
        }
    }
}

// ── Barcode symbologies ───────────────────────────────────────────────────────

/// Barcode symbologies a scanner can be told to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    Ean8,
    Ean13,
    UpcA,
    UpcE,
    Code39,
    Code93,
    Code128,
    Itf,
    Codabar,
    Qr,
    DataMatrix,
    Pdf417,
}

impl Symbology {
    pub const ALL: [Symbology; 12] = [
        Symbology::Ean8,
        Symbology::Ean13,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Code39,
        Symbology::Code93,
        Symbology::Code128,
        Symbology::Itf,
        Symbology::Codabar,
        Symbology::Qr,
        Symbology::DataMatrix,
        Symbology::Pdf417,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Symbology::Ean8 => "EAN-8",
            Symbology::Ean13 => "EAN-13",
            Symbology::UpcA => "UPC-A",
            Symbology::UpcE => "UPC-E",
            Symbology::Code39 => "Code 39",
            Symbology::Code93 => "Code 93",
            Symbology::Code128 => "Code 128",
            Symbology::Itf => "Interleaved 2 of 5",
            Symbology::Codabar => "Codabar",
            Symbology::Qr => "QR Code",
            Symbology::DataMatrix => "Data Matrix",
            Symbology::Pdf417 => "PDF417",
        }
    }

    /// Returns `true` for two-dimensional codes, which need an imager rather
    /// than a laser scanner.
    pub fn is_two_dimensional(self) -> bool {
        matches!(self, Symbology::Qr | Symbology::DataMatrix | Symbology::Pdf417)
    }
}

// ── Paper ─────────────────────────────────────────────────────────────────────

/// Paper roll or sheet a printer is loaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[serde(rename = "58mm")]
    Mm58,
    #[default]
    #[serde(rename = "80mm")]
    Mm80,
    #[serde(rename = "label_4x6")]
    Label4x6,
    #[serde(rename = "a4")]
    A4,
}

impl PaperSize {
    pub const ALL: [PaperSize; 4] = [PaperSize::Mm58, PaperSize::Mm80, PaperSize::Label4x6, PaperSize::A4];

    pub fn label(self) -> &'static str {
        match self {
            PaperSize::Mm58 => "58 mm roll",
            PaperSize::Mm80 => "80 mm roll",
            PaperSize::Label4x6 => "4\u{d7}6 in label",
            PaperSize::A4 => "A4 sheet",
        }
    }

    /// Characters per line in the printer's default font.
    ///
    /// Label and sheet media are laid out by the backend, so they report `0`.
    pub fn default_characters_per_line(self) -> u8 {
        match self {
            PaperSize::Mm58 => 32,
            PaperSize::Mm80 => 48,
            PaperSize::Label4x6 | PaperSize::A4 => 0,
        }
    }
}

// ── Weight ────────────────────────────────────────────────────────────────────

/// Unit a scale reports weights in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    G,
    Lb,
    Oz,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 4] = [WeightUnit::Kg, WeightUnit::G, WeightUnit::Lb, WeightUnit::Oz];

    pub fn label(self) -> &'static str {
        match self {
            WeightUnit::Kg => "Kilograms",
            WeightUnit::G => "Grams",
            WeightUnit::Lb => "Pounds",
            WeightUnit::Oz => "Ounces",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baud_rates_are_sorted_and_include_9600() {
        assert!(BAUD_RATES.windows(2).all(|w| w[0] < w[1]));
        assert!(BAUD_RATES.contains(&9600));
    }

    #[test]
    fn test_paper_size_serializes_with_millimetre_names() {
        // Arrange / Act
        let json = serde_json::to_string(&PaperSize::Mm58).unwrap();

        // Assert
        assert_eq!(json, "\"58mm\"");
    }

    #[test]
    fn test_paper_size_characters_per_line() {
        assert_eq!(PaperSize::Mm58.default_characters_per_line(), 32);
        assert_eq!(PaperSize::Mm80.default_characters_per_line(), 48);
        assert_eq!(PaperSize::A4.default_characters_per_line(), 0);
    }

    #[test]
    fn test_symbology_snake_case_names() {
        let json = serde_json::to_string(&[Symbology::UpcA, Symbology::DataMatrix]).unwrap();
        assert_eq!(json, r#"["upc_a","data_matrix"]"#);
    }

    #[test]
    fn test_symbology_two_dimensional_flags() {
        let two_d: Vec<_> = Symbology::ALL
            .iter()
            .filter(|s| s.is_two_dimensional())
            .collect();
        assert_eq!(two_d.len(), 3);
    }

    #[test]
    fn test_stop_bits_deserialize_from_numeric_strings() {
        let bits: StopBits = serde_json::from_str("\"1.5\"").unwrap();
        assert_eq!(bits, StopBits::OneAndHalf);
        assert_eq!(bits.label(), "1.5");
    }

    #[test]
    fn test_unknown_weight_unit_is_rejected() {
        let result: Result<WeightUnit, _> = serde_json::from_str("\"stone\"");
        assert!(result.is_err());
    }
}
