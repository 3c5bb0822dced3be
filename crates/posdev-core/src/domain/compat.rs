//! Device-type / connection-type compatibility and default skeletons.
//!
//! The table below is fixed: it reflects which transports real peripherals of
//! each kind ship with.  The form uses it to populate the "Connection"
//! dropdown, and the variant switch uses it to drop a transport that the new
//! device type cannot use.
//!
//! ```text
//!            network  bluetooth  usb  serial  aidl
//! printer       x         x       x     x      x
//! scanner                 x       x     x
//! scale         x                 x     x
//! drawer                          x     x
//! payment       x         x       x     x      x
//! display       x                 x     x
//! ```

use super::connection::{
    AidlConfig, BluetoothConfig, ConnectionConfig, ConnectionType, NetworkConfig, SerialConfig,
    UsbConfig,
};
use super::peripheral::{
    DeviceConfig, DeviceType, DisplayConfig, DrawerConfig, PaymentConfig, PrinterConfig,
    ScaleConfig, ScannerConfig,
};

use ConnectionType::{Aidl, Bluetooth, Network, Serial, Usb};

const PRINTER: &[ConnectionType] = &[Network, Usb, Bluetooth, Serial, Aidl];
const SCANNER: &[ConnectionType] = &[Usb, Bluetooth, Serial];
const SCALE: &[ConnectionType] = &[Usb, Serial, Network];
const DRAWER: &[ConnectionType] = &[Usb, Serial];
const PAYMENT: &[ConnectionType] = &[Network, Bluetooth, Usb, Serial, Aidl];
const DISPLAY: &[ConnectionType] = &[Usb, Serial, Network];

/// Returns the connection types `device_type` may use, in dropdown order.
pub fn compatible_connections(device_type: DeviceType) -> &'static [ConnectionType] {
    match device_type {
        DeviceType::Printer => PRINTER,
        DeviceType::Scanner => SCANNER,
        DeviceType::Scale => SCALE,
        DeviceType::Drawer => DRAWER,
        DeviceType::Payment => PAYMENT,
        DeviceType::Display => DISPLAY,
    }
}

/// Same as [`compatible_connections`], returning an empty list when no
/// device type is selected.
pub fn compatible_connections_for(device_type: Option<DeviceType>) -> &'static [ConnectionType] {
    match device_type {
        Some(t) => compatible_connections(t),
        None => &[],
    }
}

/// Looks the table up by wire name.  Unknown names yield an empty list.
pub fn compatible_connections_named(device_type: &str) -> &'static [ConnectionType] {
    compatible_connections_for(device_type.parse().ok())
}

pub fn is_compatible(device_type: DeviceType, connection_type: ConnectionType) -> bool {
    compatible_connections(device_type).contains(&connection_type)
}

// ── Skeletons ─────────────────────────────────────────────────────────────────

impl ConnectionType {
    /// The payload installed when the operator selects this transport.
    pub fn default_config(self) -> ConnectionConfig {
        match self {
            Network => ConnectionConfig::Network(NetworkConfig::default()),
            Bluetooth => ConnectionConfig::Bluetooth(BluetoothConfig::default()),
            Usb => ConnectionConfig::Usb(UsbConfig::default()),
            Serial => ConnectionConfig::Serial(SerialConfig::default()),
            Aidl => ConnectionConfig::Aidl(AidlConfig::default()),
        }
    }

    /// Port pre-filled in the form, for transports that have one.
    pub fn default_port(self) -> Option<u16> {
        match self.default_config() {
            ConnectionConfig::Network(cfg) => cfg.port,
            _ => None,
        }
    }
}

impl DeviceType {
    /// The payload installed when the operator selects this device type.
    pub fn default_config(self) -> DeviceConfig {
        match self {
            DeviceType::Printer => DeviceConfig::Printer(PrinterConfig::default()),
            DeviceType::Scanner => DeviceConfig::Scanner(ScannerConfig::default()),
            DeviceType::Scale => DeviceConfig::Scale(ScaleConfig::default()),
            DeviceType::Drawer => DeviceConfig::Drawer(DrawerConfig::default()),
            DeviceType::Payment => DeviceConfig::Payment(PaymentConfig::default()),
            DeviceType::Display => DeviceConfig::Display(DisplayConfig::default()),
        }
    }
}
