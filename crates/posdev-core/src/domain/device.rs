//! The hardware device draft edited by the device form.
//!
//! A [`Device`] is identity (`id`, `name`, `enabled`) plus at most one
//! peripheral payload and at most one connection payload.  The tags are not
//! stored separately: [`Device::device_type`] and [`Device::connection_type`]
//! read them off the populated variant, so a draft can never claim to be a
//! scale while carrying printer settings.
//!
//! # Lifecycle
//!
//! ```text
//! Device::new()  ──┐
//!                  ├──►  edits / tag switches  ──►  validate()  ──►  to_record()
//! Device::hydrate()┘
//! ```

use thiserror::Error;

use super::connection::{ConnectionConfig, ConnectionType};
use super::peripheral::{DeviceConfig, DeviceType};
use super::transition::{switch_connection_type, switch_device_type};

/// Error returned when a tag name is not one of the known values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTagError {
    #[error("unknown device type: {0}")]
    UnknownDeviceType(String),

    #[error("unknown connection type: {0}")]
    UnknownConnectionType(String),
}

/// In-memory device draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Backend identifier.  Required on submit.
    pub id: String,
    /// Display name shown in the device list.
    pub name: String,
    pub enabled: bool,
    /// Peripheral payload; `None` until a device type is chosen.
    pub device: Option<DeviceConfig>,
    /// Transport payload; `None` until a connection type is chosen.
    pub connection: Option<ConnectionConfig>,
}

impl Device {
    /// Creates an empty, enabled draft with no tags selected.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            enabled: true,
            device: None,
            connection: None,
        }
    }

    pub fn device_type(&self) -> Option<DeviceType> {
        self.device.as_ref().map(DeviceConfig::device_type)
    }

    pub fn connection_type(&self) -> Option<ConnectionType> {
        self.connection.as_ref().map(ConnectionConfig::connection_type)
    }

    /// In-place form of [`switch_device_type`].
    pub fn set_device_type(&mut self, device_type: Option<DeviceType>) {
        let current = std::mem::take(self);
        *self = switch_device_type(current, device_type);
    }

    /// In-place form of [`switch_connection_type`].
    pub fn set_connection_type(&mut self, connection_type: Option<ConnectionType>) {
        let current = std::mem::take(self);
        *self = switch_connection_type(current, connection_type);
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new(String::new())
    }
}
