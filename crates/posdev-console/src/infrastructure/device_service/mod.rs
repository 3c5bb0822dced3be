//! Backend adapters implementing [`crate::application::DeviceService`].
//!
//! Only the in-memory simulation lives here; it backs the `posdev probe`
//! command and the integration tests.

pub mod simulated;

pub use simulated::SimulatedDeviceService;
