//! # posdev-core
//!
//! Shared library for the POS back-office console containing the hardware
//! device configuration model: the device and connection tags, their typed
//! configuration payloads, the static option catalogs, the tag compatibility
//! table and the field-level validator.
//!
//! It has zero dependencies on HTTP clients, UI frameworks, or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! A point-of-sale terminal talks to many peripherals: receipt printers,
//! barcode scanners, weighing scales, cash drawers, payment terminals and
//! customer displays.  Each of those is reached over some transport: a LAN
//! socket, Bluetooth, USB, an RS-232 serial line, or an Android AIDL service
//! bound on the terminal itself.
//!
//! The back office does not talk to the hardware.  It edits a *description*
//! of each device that a separate backend uses later.  This crate defines:
//!
//! - **`domain::device`** – The [`Device`] draft: identity plus one optional
//!   device payload and one optional connection payload.
//!
//! - **`domain::compat`** – Which transports each device type may use, and the
//!   default payload ("skeleton") for every tag.
//!
//! - **`domain::transition`** – What happens to the draft when the operator
//!   switches the device type or connection type in the form.
//!
//! - **`domain::validate`** – The field-level checks run on submit.
//!
//! - **`domain::record`** – The flat JSON object exchanged with the backend.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `posdev_core::Device` instead of `posdev_core::domain::device::Device`.
pub use domain::compat::{compatible_connections, compatible_connections_named, is_compatible};
pub use domain::connection::{ConnectionConfig, ConnectionType};
pub use domain::device::{Device, ParseTagError};
pub use domain::peripheral::{DeviceConfig, DeviceType};
pub use domain::record::DeviceRecord;
pub use domain::transition::{switch_connection_type, switch_device_type};
pub use domain::usb_id::{format_usb_id, parse_usb_id, UsbIdError};
pub use domain::validate::{validate, FieldError, FieldErrors};
