//! Device tags and peripheral-specific configuration payloads.
//!
//! [`DeviceType`] is the tag edited by the form's "Type" dropdown and
//! [`DeviceConfig`] holds the settings of that kind of peripheral.  Each
//! payload is a flat record of primitive fields; the few fields an operator
//! must choose explicitly (printer mode, scale unit) are `Option`s so that a
//! fresh skeleton can be told apart from a completed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::{PaperSize, Symbology, WeightUnit};
use super::device::ParseTagError;

/// Category of physical peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Printer,
    Scanner,
    Scale,
    /// Cash drawer.
    Drawer,
    /// Card payment terminal.
    Payment,
    /// Customer-facing pole or line display.
    Display,
}

impl DeviceType {
    /// Every device type, in the order the form lists them.
    pub const ALL: [DeviceType; 6] = [
        DeviceType::Printer,
        DeviceType::Scanner,
        DeviceType::Scale,
        DeviceType::Drawer,
        DeviceType::Payment,
        DeviceType::Display,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Printer => "printer",
            DeviceType::Scanner => "scanner",
            DeviceType::Scale => "scale",
            DeviceType::Drawer => "drawer",
            DeviceType::Payment => "payment",
            DeviceType::Display => "display",
        }
    }

    /// Dotted-path prefix of this tag's payload in the persisted record.
    pub fn config_field(self) -> &'static str {
        match self {
            DeviceType::Printer => "printer_config",
            DeviceType::Scanner => "scanner_config",
            DeviceType::Scale => "scale_config",
            DeviceType::Drawer => "drawer_config",
            DeviceType::Payment => "payment_config",
            DeviceType::Display => "display_config",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError::UnknownDeviceType(s.to_string()))
    }
}

// ── Printer ───────────────────────────────────────────────────────────────────

/// Printer sub-shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterMode {
    /// Front-of-house receipt printer.
    Thermal,
    /// Kitchen order ticket printer bound to a preparation station.
    Kot,
    /// Spooled network printer (office / label queue).
    Network,
}

impl PrinterMode {
    pub const ALL: [PrinterMode; 3] = [PrinterMode::Thermal, PrinterMode::Kot, PrinterMode::Network];

    pub fn label(self) -> &'static str {
        match self {
            PrinterMode::Thermal => "Receipt (thermal)",
            PrinterMode::Kot => "Kitchen order ticket",
            PrinterMode::Network => "Network printer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    pub mode: Option<PrinterMode>,
    pub paper_size: PaperSize,
    pub characters_per_line: u8,
    pub auto_cut: bool,
    pub open_drawer_after_print: bool,
    pub copies: u8,
    /// Preparation station name; required for [`PrinterMode::Kot`].
    pub kitchen_station: String,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            mode: None,
            paper_size: PaperSize::Mm80,
            characters_per_line: PaperSize::Mm80.default_characters_per_line(),
            auto_cut: true,
            open_drawer_after_print: false,
            copies: 1,
            kitchen_station: String::new(),
        }
    }
}

// ── Scanner ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    #[default]
    Trigger,
    Continuous,
    Presentation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub symbologies: Vec<Symbology>,
    pub scan_mode: ScanMode,
    pub prefix: String,
    pub suffix: String,
    pub beep_on_scan: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            symbologies: vec![Symbology::Ean13, Symbology::UpcA, Symbology::Code128],
            scan_mode: ScanMode::Trigger,
            prefix: String::new(),
            suffix: "\r".to_string(),
            beep_on_scan: true,
        }
    }
}

// ── Scale ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub unit: Option<WeightUnit>,
    pub decimal_places: u8,
    pub auto_tare: bool,
    pub stable_reading_timeout_ms: u32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            unit: None,
            decimal_places: 3,
            auto_tare: false,
            stable_reading_timeout_ms: 2_000,
        }
    }
}

// ── Drawer ────────────────────────────────────────────────────────────────────

/// Drawer-kick connector pins an ESC/POS printer can pulse.
pub const DRAWER_KICK_PINS: &[u8] = &[2, 5];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub kick_pin: u8,
    pub pulse_duration_ms: u16,
    pub detect_open_state: bool,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            kick_pin: 2,
            pulse_duration_ms: 120,
            detect_open_state: true,
        }
    }
}

// ── Payment ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Acquirer / terminal integration name, e.g. `"adyen"`.
    pub provider: String,
    pub merchant_id: String,
    pub terminal_id: String,
    /// ISO 4217 code.
    pub currency: String,
    pub transaction_timeout_secs: u32,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            provider: String::new(),
            merchant_id: String::new(),
            terminal_id: String::new(),
            currency: "USD".to_string(),
            transaction_timeout_secs: 60,
        }
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub lines: u8,
    pub columns: u8,
    pub welcome_message: String,
    pub brightness_percent: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            lines: 2,
            columns: 20,
            welcome_message: String::new(),
            brightness_percent: 100,
        }
    }
}

// ── Sum type ──────────────────────────────────────────────────────────────────

/// The populated peripheral payload; the variant is the device tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceConfig {
    Printer(PrinterConfig),
    Scanner(ScannerConfig),
    Scale(ScaleConfig),
    Drawer(DrawerConfig),
    Payment(PaymentConfig),
    Display(DisplayConfig),
}

impl DeviceConfig {
    /// The tag this payload belongs to.
    pub fn device_type(&self) -> DeviceType {
        match self {
            DeviceConfig::Printer(_) => DeviceType::Printer,
            DeviceConfig::Scanner(_) => DeviceType::Scanner,
            DeviceConfig::Scale(_) => DeviceType::Scale,
            DeviceConfig::Drawer(_) => DeviceType::Drawer,
            DeviceConfig::Payment(_) => DeviceType::Payment,
            DeviceConfig::Display(_) => DeviceType::Display,
        }
    }
}
