//! Domain entities for the device configuration model.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application is the **domain**.  Domain code
//! holds the rules that make the system what it is (here: which settings a
//! receipt printer on a USB cable needs, and when a draft is complete enough
//! to send to the backend).  It never opens sockets, reads files, or awaits
//! futures, so every rule can be unit-tested in isolation.
//!
//! The console crate depends on this layer; this layer never depends on it.

/// Static option tables (baud rates, symbologies, paper sizes, ...).
pub mod catalog;

/// Device-type to connection-type compatibility and default skeletons.
pub mod compat;

/// Connection tags and their transport-specific payloads.
pub mod connection;

/// The device draft edited by the form.
pub mod device;

/// Device tags and their peripheral-specific payloads.
pub mod peripheral;

/// Flat JSON shape persisted by the backend.
pub mod record;

/// Tag switches that keep one payload per tag.
pub mod transition;

/// USB vendor/product identifier parsing.
pub mod usb_id;

/// Field-level validation run on submit.
pub mod validate;
