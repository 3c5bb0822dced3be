//! Infrastructure layer for the console.
//!
//! Contains the adapters the application layer talks to through traits:
//! the device backend and the settings file on disk.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `posdev_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod device_service;
pub mod storage;
