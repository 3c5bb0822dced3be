//! The device record exchanged with the backend.
//!
//! The REST API stores devices as a flat JSON object: two tag fields plus one
//! optional object per possible payload.  Only the payloads matching the tags
//! are meant to be present:
//!
//! ```json
//! {
//!   "id": "dev-17",
//!   "name": "Deli scale",
//!   "type": "scale",
//!   "connection_type": "usb",
//!   "enabled": true,
//!   "usb_config":   { "vendor_id": "0x0EB8", "product_id": "0xF000", "device_path": "" },
//!   "scale_config": { "unit": "kg", "decimal_places": 3, ... }
//! }
//! ```
//!
//! [`DeviceRecord`] mirrors that object field for field.  Converting into a
//! [`Device`] ([`Device::hydrate`]) keeps only the payloads that match the
//! tags; converting back ([`Device::to_record`]) writes exactly one payload
//! of each kind.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::connection::{
    AidlConfig, BluetoothConfig, ConnectionConfig, ConnectionType, NetworkConfig, SerialConfig,
    UsbConfig,
};
use super::device::Device;
use super::peripheral::{
    DeviceConfig, DeviceType, DisplayConfig, DrawerConfig, PaymentConfig, PrinterConfig,
    ScaleConfig, ScannerConfig,
};

fn default_true() -> bool {
    true
}

/// Persisted JSON shape of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_config: Option<NetworkConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bluetooth_config: Option<BluetoothConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usb_config: Option<UsbConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_config: Option<SerialConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aidl_config: Option<AidlConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printer_config: Option<PrinterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanner_config: Option<ScannerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_config: Option<ScaleConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawer_config: Option<DrawerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_config: Option<PaymentConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_config: Option<DisplayConfig>,
}

impl DeviceRecord {
    /// Payload field names that are present but do not match the tags.
    pub fn stray_variants(&self) -> Vec<&'static str> {
        let present_connections = [
            (ConnectionType::Network, self.network_config.is_some()),
            (ConnectionType::Bluetooth, self.bluetooth_config.is_some()),
            (ConnectionType::Usb, self.usb_config.is_some()),
            (ConnectionType::Serial, self.serial_config.is_some()),
            (ConnectionType::Aidl, self.aidl_config.is_some()),
        ];
        let present_devices = [
            (DeviceType::Printer, self.printer_config.is_some()),
            (DeviceType::Scanner, self.scanner_config.is_some()),
            (DeviceType::Scale, self.scale_config.is_some()),
            (DeviceType::Drawer, self.drawer_config.is_some()),
            (DeviceType::Payment, self.payment_config.is_some()),
            (DeviceType::Display, self.display_config.is_some()),
        ];

        let stray_connections = present_connections
            .into_iter()
            .filter(|(t, present)| *present && Some(*t) != self.connection_type)
            .map(|(t, _)| t.config_field());
        let stray_devices = present_devices
            .into_iter()
            .filter(|(t, present)| *present && Some(*t) != self.device_type)
            .map(|(t, _)| t.config_field());

        stray_connections.chain(stray_devices).collect()
    }

    fn take_connection(&mut self) -> Option<ConnectionConfig> {
        let tag = self.connection_type?;
        let payload = match tag {
            ConnectionType::Network => self.network_config.take().map(ConnectionConfig::Network),
            ConnectionType::Bluetooth => {
                self.bluetooth_config.take().map(ConnectionConfig::Bluetooth)
            }
            ConnectionType::Usb => self.usb_config.take().map(ConnectionConfig::Usb),
            ConnectionType::Serial => self.serial_config.take().map(ConnectionConfig::Serial),
            ConnectionType::Aidl => self.aidl_config.take().map(ConnectionConfig::Aidl),
        };
        Some(payload.unwrap_or_else(|| tag.default_config()))
    }

    fn take_device(&mut self) -> Option<DeviceConfig> {
        let tag = self.device_type?;
        let payload = match tag {
            DeviceType::Printer => self.printer_config.take().map(DeviceConfig::Printer),
            DeviceType::Scanner => self.scanner_config.take().map(DeviceConfig::Scanner),
            DeviceType::Scale => self.scale_config.take().map(DeviceConfig::Scale),
            DeviceType::Drawer => self.drawer_config.take().map(DeviceConfig::Drawer),
            DeviceType::Payment => self.payment_config.take().map(DeviceConfig::Payment),
            DeviceType::Display => self.display_config.take().map(DeviceConfig::Display),
        };
        Some(payload.unwrap_or_else(|| tag.default_config()))
    }
}

impl Device {
    /// Builds a draft from a fetched record.
    ///
    /// The payload matching each tag is kept; a tag without a payload gets
    /// the tag's skeleton.  Payloads that do not match a tag are discarded
    /// and logged.
    pub fn hydrate(mut record: DeviceRecord) -> Device {
        let stray = record.stray_variants();
        if !stray.is_empty() {
            warn!(
                device_id = %record.id,
                discarded = ?stray,
                "record carries payloads that do not match its tags"
            );
        }

        let connection = record.take_connection();
        let device = record.take_device();
        Device {
            id: record.id,
            name: record.name,
            enabled: record.enabled,
            device,
            connection,
        }
    }

    /// Serializes the draft into the backend's record shape.
    pub fn to_record(&self) -> DeviceRecord {
        let mut record = DeviceRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            device_type: self.device_type(),
            connection_type: self.connection_type(),
            enabled: self.enabled,
            ..DeviceRecord::default()
        };

        match self.connection.clone() {
            Some(ConnectionConfig::Network(cfg)) => record.network_config = Some(cfg),
            Some(ConnectionConfig::Bluetooth(cfg)) => record.bluetooth_config = Some(cfg),
            Some(ConnectionConfig::Usb(cfg)) => record.usb_config = Some(cfg),
            Some(ConnectionConfig::Serial(cfg)) => record.serial_config = Some(cfg),
            Some(ConnectionConfig::Aidl(cfg)) => record.aidl_config = Some(cfg),
            None => {}
        }

        match self.device.clone() {
            Some(DeviceConfig::Printer(cfg)) => record.printer_config = Some(cfg),
            Some(DeviceConfig::Scanner(cfg)) => record.scanner_config = Some(cfg),
            Some(DeviceConfig::Scale(cfg)) => record.scale_config = Some(cfg),
            Some(DeviceConfig::Drawer(cfg)) => record.drawer_config = Some(cfg),
            Some(DeviceConfig::Payment(cfg)) => record.payment_config = Some(cfg),
            Some(DeviceConfig::Display(cfg)) => record.display_config = Some(cfg),
            None => {}
        }

        record
    }
}

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        Device::hydrate(record)
    }
}

impl From<&Device> for DeviceRecord {
    fn from(device: &Device) -> Self {
        device.to_record()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
