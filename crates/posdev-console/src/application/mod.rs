//! Application layer use cases for the device settings screen.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules, here `posdev-core`) and the infrastructure (HTTP,
//! files, timers).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "configure a
//!   new receipt printer and save it").
//! - **Depend on abstractions** (the [`device_form::DeviceService`] trait)
//!   rather than a concrete backend client.
//! - **Contain no network I/O and no file system access**.
//!
//! # Sub-modules
//!
//! - **`device_form`** – One open "Add / Edit device" modal: the draft, the
//!   active tab, tag switches, field errors, submit and test-connection.

pub mod device_form;

pub use device_form::{
    DeviceFormSession, DeviceService, FormError, FormMode, FormTab, ServiceError,
};
