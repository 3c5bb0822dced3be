//! Field-level validation of a device draft.
//!
//! [`validate`] walks the draft in form order and records one message per
//! failing field, keyed by the field's dotted path in the persisted record
//! (`"network_config.port"`, `"printer_config.mode"`, ...).  The form shows
//! each message next to its input and a short summary in a toast.
//!
//! Validation is synchronous and side-effect free.  An empty [`FieldErrors`]
//! means the draft may be submitted.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::catalog::{BAUD_RATES, DATA_BITS};
use super::compat::is_compatible;
use super::connection::{
    AidlConfig, BluetoothConfig, ConnectionConfig, NetworkConfig, SerialConfig, UsbConfig,
};
use super::device::Device;
use super::peripheral::{
    DeviceConfig, DisplayConfig, DrawerConfig, PaymentConfig, PrinterConfig, PrinterMode,
    ScaleConfig, ScannerConfig, DRAWER_KICK_PINS,
};
use super::usb_id::parse_usb_id;

static MAC_ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{2}(?:(?::[0-9A-Fa-f]{2}){5}|(?:-[0-9A-Fa-f]{2}){5})$").unwrap()
});

static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .unwrap()
});

static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

// ── Error map ─────────────────────────────────────────────────────────────────

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path, e.g. `"bluetooth_config.mac_address"`.
    pub path: String,
    pub message: String,
}

/// Insertion-ordered map from dotted field path to message.
///
/// Order follows the form, so the first entries are the ones the operator
/// sees first.  Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `path`.  The first message for a path wins.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        let path = path.into();
        if !self.contains(&path) {
            self.entries.push(FieldError {
                path,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }

    /// Drops every error under `prefix` (the prefix itself or `prefix.*`).
    pub fn clear_prefix(&mut self, prefix: &str) {
        self.entries.retain(|e| {
            e.path != prefix
                && !e
                    .path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.'))
        });
    }

    /// The first `limit` messages, for the toast shown on a rejected submit.
    pub fn summary(&self, limit: usize) -> Vec<String> {
        self.entries
            .iter()
            .take(limit)
            .map(|e| e.message.clone())
            .collect()
    }
}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(&e.path, &e.message)?;
        }
        map.end()
    }
}

// ── Validator ─────────────────────────────────────────────────────────────────

/// Validates a device draft.
///
/// # Example
///
/// ```rust
/// use posdev_core::{validate, Device};
///
/// let errors = validate(&Device::new(""));
/// assert_eq!(errors.get("id"), Some("Device ID is required"));
/// assert!(errors.contains("type"));
/// assert!(errors.contains("connection_type"));
/// ```
pub fn validate(device: &Device) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if device.id.trim().is_empty() {
        errors.insert("id", "Device ID is required");
    }
    if device.device.is_none() {
        errors.insert("type", "Device type is required");
    }
    if device.connection.is_none() {
        errors.insert("connection_type", "Connection type is required");
    }

    if let Some(connection) = &device.connection {
        validate_connection(connection, &mut errors);
    }

    match &device.device {
        Some(DeviceConfig::Printer(cfg)) => validate_printer(cfg, &mut errors),
        Some(DeviceConfig::Scanner(cfg)) => validate_scanner(cfg, &mut errors),
        Some(DeviceConfig::Scale(cfg)) => validate_scale(cfg, &mut errors),
        Some(DeviceConfig::Drawer(cfg)) => validate_drawer(cfg, &mut errors),
        Some(DeviceConfig::Payment(cfg)) => validate_payment(cfg, &mut errors),
        Some(DeviceConfig::Display(cfg)) => validate_display(cfg, &mut errors),
        None => {}
    }

    if let (Some(device_type), Some(connection_type)) =
        (device.device_type(), device.connection_type())
    {
        if !is_compatible(device_type, connection_type) {
            errors.insert(
                "connection_type",
                format!("A {device_type} cannot use a {connection_type} connection"),
            );
        }
    }

    errors
}

/// Validates only the transport part of a draft, as the "Test connection"
/// button does.
pub fn validate_connection(connection: &ConnectionConfig, errors: &mut FieldErrors) {
    match connection {
        ConnectionConfig::Network(cfg) => validate_network(cfg, errors),
        ConnectionConfig::Bluetooth(cfg) => validate_bluetooth(cfg, errors),
        ConnectionConfig::Usb(cfg) => validate_usb(cfg, errors),
        ConnectionConfig::Serial(cfg) => validate_serial(cfg, errors),
        ConnectionConfig::Aidl(cfg) => validate_aidl(cfg, errors),
    }
}

fn validate_network(cfg: &NetworkConfig, errors: &mut FieldErrors) {
    // Surrounding whitespace would reach the backend verbatim.
    if cfg.ip_address.trim().is_empty() {
        errors.insert("network_config.ip_address", "IP address is required");
    } else if !is_valid_host(&cfg.ip_address) {
        errors.insert(
            "network_config.ip_address",
            "IP address must be a valid IPv4/IPv6 address or hostname",
        );
    }

    match cfg.port {
        None => errors.insert("network_config.port", "Port is required"),
        Some(0) => errors.insert("network_config.port", "Port must be between 1 and 65535"),
        Some(_) => {}
    }

    if cfg.connect_timeout_ms == 0 {
        errors.insert(
            "network_config.connect_timeout_ms",
            "Connect timeout must be greater than zero",
        );
    }
    if cfg.read_timeout_ms == 0 {
        errors.insert(
            "network_config.read_timeout_ms",
            "Read timeout must be greater than zero",
        );
    }
}

/// Accepts IP literals and RFC 1123 hostnames.  Dotted all-numeric strings
/// must be real IPv4 addresses, so `"999.1.1.1"` is rejected.
fn is_valid_host(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    let numeric = host.chars().all(|c| c.is_ascii_digit() || c == '.');
    !numeric && host.len() <= 253 && HOSTNAME_RE.is_match(host)
}

fn validate_bluetooth(cfg: &BluetoothConfig, errors: &mut FieldErrors) {
    if cfg.mac_address.trim().is_empty() {
        errors.insert("bluetooth_config.mac_address", "MAC address is required");
    } else if !MAC_ADDRESS_RE.is_match(&cfg.mac_address) {
        errors.insert(
            "bluetooth_config.mac_address",
            "MAC address must look like AA:BB:CC:DD:EE:FF",
        );
    }
}

fn validate_usb(cfg: &UsbConfig, errors: &mut FieldErrors) {
    for (path, label, value) in [
        ("usb_config.vendor_id", "Vendor ID", &cfg.vendor_id),
        ("usb_config.product_id", "Product ID", &cfg.product_id),
    ] {
        if value.trim().is_empty() {
            errors.insert(path, format!("{label} is required"));
        } else if let Err(e) = parse_usb_id(value) {
            errors.insert(path, format!("{label} is invalid: {e}"));
        }
    }
}

fn validate_serial(cfg: &SerialConfig, errors: &mut FieldErrors) {
    if !BAUD_RATES.contains(&cfg.baud_rate) {
        errors.insert(
            "serial_config.baud_rate",
            format!("Baud rate {} is not supported", cfg.baud_rate),
        );
    }
    if !DATA_BITS.contains(&cfg.data_bits) {
        errors.insert(
            "serial_config.data_bits",
            format!("Data bits must be 5-8, got {}", cfg.data_bits),
        );
    }
}

fn validate_aidl(cfg: &AidlConfig, errors: &mut FieldErrors) {
    if cfg.package_name.trim().is_empty() {
        errors.insert("aidl_config.package_name", "AIDL package name is required");
    }
}

fn validate_printer(cfg: &PrinterConfig, errors: &mut FieldErrors) {
    match cfg.mode {
        None => errors.insert("printer_config.mode", "Printer mode is required"),
        Some(PrinterMode::Kot) if cfg.kitchen_station.trim().is_empty() => errors.insert(
            "printer_config.kitchen_station",
            "Kitchen station is required for KOT printers",
        ),
        Some(_) => {}
    }
    if cfg.copies == 0 {
        errors.insert("printer_config.copies", "Copies must be at least 1");
    }
}

fn validate_scanner(cfg: &ScannerConfig, errors: &mut FieldErrors) {
    if cfg.symbologies.is_empty() {
        errors.insert(
            "scanner_config.symbologies",
            "Select at least one barcode symbology",
        );
    }
}

fn validate_scale(cfg: &ScaleConfig, errors: &mut FieldErrors) {
    if cfg.unit.is_none() {
        errors.insert("scale_config.unit", "Scale unit is required");
    }
}

fn validate_drawer(cfg: &DrawerConfig, errors: &mut FieldErrors) {
    if !DRAWER_KICK_PINS.contains(&cfg.kick_pin) {
        errors.insert("drawer_config.kick_pin", "Drawer kick pin must be 2 or 5");
    }
}

fn validate_payment(cfg: &PaymentConfig, errors: &mut FieldErrors) {
    if cfg.provider.trim().is_empty() {
        errors.insert("payment_config.provider", "Payment provider is required");
    }
    if !CURRENCY_RE.is_match(&cfg.currency) {
        errors.insert(
            "payment_config.currency",
            "Currency must be a three-letter ISO code",
        );
    }
}

fn validate_display(cfg: &DisplayConfig, errors: &mut FieldErrors) {
    if cfg.lines == 0 {
        errors.insert("display_config.lines", "Display must have at least one line");
    }
    if cfg.columns == 0 {
        errors.insert(
            "display_config.columns",
            "Display must have at least one column",
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
