//! posdev-console library crate.
//!
//! Everything the hardware-settings screen of the back office does around the
//! pure device model in `posdev-core`.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! [posdev-console]
//!   ├── application/      DeviceFormSession (owns the draft), DeviceService port
//!   └── infrastructure/
//!         ├── device_service/  SimulatedDeviceService (in-memory backend)
//!         └── storage/         ConsoleSettings TOML file
//! ```
//!
//! # Layer rules
//!
//! - `application` depends on `posdev-core` and on traits it defines itself.
//! - `infrastructure` implements those traits and owns files and timers.
//! - `main.rs` wires the two together behind the `posdev` command line.

/// Application layer: the device form use case.
pub mod application;

/// Infrastructure layer: backend adapter and settings file.
pub mod infrastructure;
