//! Tag switches on the device draft.
//!
//! Both functions take the old draft by value and return the new one; nothing
//! else is touched.  The draft keeps its identity fields across a switch.
//!
//! # Rules
//!
//! - Switching the device type replaces the peripheral payload with the new
//!   type's skeleton.  If the current transport is not in the new type's
//!   compatibility list, the transport is dropped as well.
//! - Switching the connection type replaces the transport payload with the
//!   new type's skeleton, unless a device type is selected that cannot use
//!   that transport, in which case the connection is left unset.
//! - Passing `None` clears the corresponding payload.

use tracing::debug;

use super::compat::is_compatible;
use super::connection::ConnectionType;
use super::device::Device;
use super::peripheral::DeviceType;

/// Returns `device` with its peripheral payload reset for `new_type`.
pub fn switch_device_type(mut device: Device, new_type: Option<DeviceType>) -> Device {
    let old_type = device.device_type();
    device.device = new_type.map(DeviceType::default_config);

    if let (Some(device_type), Some(connection_type)) = (new_type, device.connection_type()) {
        if !is_compatible(device_type, connection_type) {
            debug!(
                device_id = %device.id,
                %device_type,
                %connection_type,
                "dropping connection incompatible with new device type"
            );
            device.connection = None;
        }
    }

    debug!(device_id = %device.id, ?old_type, ?new_type, "device type switched");
    device
}

/// Returns `device` with its transport payload reset for `new_type`.
pub fn switch_connection_type(mut device: Device, new_type: Option<ConnectionType>) -> Device {
    let old_type = device.connection_type();
    let allowed = match (device.device_type(), new_type) {
        (Some(device_type), Some(connection_type)) => is_compatible(device_type, connection_type),
        _ => true,
    };

    device.connection = if allowed {
        new_type.map(ConnectionType::default_config)
    } else {
        debug!(
            device_id = %device.id,
            device_type = ?device.device_type(),
            ?new_type,
            "connection type not usable by device type; leaving unset"
        );
        None
    };

    debug!(device_id = %device.id, ?old_type, ?new_type, "connection type switched");
    device
}
