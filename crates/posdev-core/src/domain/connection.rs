//! Connection tags and transport-specific configuration payloads.
//!
//! A device is reached over exactly one transport.  [`ConnectionType`] is the
//! tag the form's "Connection" dropdown edits; [`ConnectionConfig`] carries the
//! settings that only make sense for that tag.  Because the payload *is* the
//! tag (one enum variant per transport), a USB device can never carry a stale
//! IP address.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::{FlowControl, Parity, StopBits};
use super::device::ParseTagError;

/// Transport used to reach a peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Network,
    Bluetooth,
    Usb,
    Serial,
    /// Android service bound on the terminal (e.g. a built-in printer).
    Aidl,
}

impl ConnectionType {
    /// Every connection type, in the order the form lists them.
    pub const ALL: [ConnectionType; 5] = [
        ConnectionType::Network,
        ConnectionType::Bluetooth,
        ConnectionType::Usb,
        ConnectionType::Serial,
        ConnectionType::Aidl,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionType::Network => "network",
            ConnectionType::Bluetooth => "bluetooth",
            ConnectionType::Usb => "usb",
            ConnectionType::Serial => "serial",
            ConnectionType::Aidl => "aidl",
        }
    }

    /// Dotted-path prefix of this tag's payload in the persisted record.
    pub fn config_field(self) -> &'static str {
        match self {
            ConnectionType::Network => "network_config",
            ConnectionType::Bluetooth => "bluetooth_config",
            ConnectionType::Usb => "usb_config",
            ConnectionType::Serial => "serial_config",
            ConnectionType::Aidl => "aidl_config",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError::UnknownConnectionType(s.to_string()))
    }
}

// ── Payloads ──────────────────────────────────────────────────────────────────

/// Application protocol spoken over a network socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkProtocol {
    /// Raw TCP (ESC/POS on port 9100 and friends).
    #[default]
    Tcp,
    Udp,
    Http,
}

/// LAN / Wi-Fi settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// IPv4/IPv6 literal or hostname.
    pub ip_address: String,
    /// `None` until the operator enters a port.
    pub port: Option<u16>,
    pub protocol: NetworkProtocol,
    pub connect_timeout_ms: u32,
    pub read_timeout_ms: u32,
    /// Keepalive probe interval; `0` disables the heartbeat.
    pub heartbeat_interval_secs: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ip_address: String::new(),
            port: Some(9100),
            protocol: NetworkProtocol::Tcp,
            connect_timeout_ms: 5_000,
            read_timeout_ms: 10_000,
            heartbeat_interval_secs: 30,
        }
    }
}

/// Bluetooth Classic settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BluetoothConfig {
    pub mac_address: String,
    pub service_uuid: String,
    pub paired: bool,
}

/// Serial Port Profile UUID used by virtually every Bluetooth receipt printer.
pub const SPP_SERVICE_UUID: &str = "00001101-0000-1000-8000-00805F9B34FB";

impl Default for BluetoothConfig {
    fn default() -> Self {
        Self {
            mac_address: String::new(),
            service_uuid: SPP_SERVICE_UUID.to_string(),
            paired: false,
        }
    }
}

/// USB settings.
///
/// The identifiers are stored as typed, e.g. `"0x04B8"` or `"1208"`; see
/// [`crate::domain::usb_id::parse_usb_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsbConfig {
    pub vendor_id: String,
    pub product_id: String,
    /// Optional OS device node, e.g. `/dev/usb/lp0`.
    pub device_path: String,
}

/// RS-232 settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: StopBits,
    pub parity: Parity,
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: 8,
            stop_bits: StopBits::One,
            parity: Parity::None,
            flow_control: FlowControl::None,
        }
    }
}

/// Android AIDL service binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AidlConfig {
    pub package_name: String,
    pub service_name: String,
    pub interface_descriptor: String,
}

/// The populated connection payload; the variant is the connection tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionConfig {
    Network(NetworkConfig),
    Bluetooth(BluetoothConfig),
    Usb(UsbConfig),
    Serial(SerialConfig),
    Aidl(AidlConfig),
}

impl ConnectionConfig {
    /// The tag this payload belongs to.
    pub fn connection_type(&self) -> ConnectionType {
        match self {
            ConnectionConfig::Network(_) => ConnectionType::Network,
            ConnectionConfig::Bluetooth(_) => ConnectionType::Bluetooth,
            ConnectionConfig::Usb(_) => ConnectionType::Usb,
            ConnectionConfig::Serial(_) => ConnectionType::Serial,
            ConnectionConfig::Aidl(_) => ConnectionType::Aidl,
        }
    }
}
