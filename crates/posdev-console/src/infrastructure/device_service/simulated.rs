//! In-memory backend used by the `posdev` command line and the integration
//! tests.
//!
//! Behaves like the device REST endpoints: ids are unique, updates need an
//! existing record, and a connection test takes a while before answering.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use posdev_core::DeviceRecord;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::application::device_form::{DeviceService, ServiceError};

/// [`DeviceService`] backed by a `HashMap`.
pub struct SimulatedDeviceService {
    devices: Mutex<HashMap<String, DeviceRecord>>,
    probe_delay: Duration,
}

impl SimulatedDeviceService {
    /// Creates an empty backend whose connection tests take `probe_delay`.
    pub fn new(probe_delay: Duration) -> Self {
        Self {
            devices: Mutex::new(HashMap::new()),
            probe_delay,
        }
    }

    /// Creates a backend pre-loaded with `records`.  Later records replace
    /// earlier ones with the same id.
    pub fn with_devices(
        probe_delay: Duration,
        records: impl IntoIterator<Item = DeviceRecord>,
    ) -> Self {
        let devices = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            devices: Mutex::new(devices),
            probe_delay,
        }
    }

    /// Number of stored devices.
    pub async fn len(&self) -> usize {
        self.devices.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.devices.lock().await.is_empty()
    }
}

#[async_trait]
impl DeviceService for SimulatedDeviceService {
    async fn fetch(&self, id: &str) -> Result<DeviceRecord, ServiceError> {
        self.devices
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    async fn create(&self, record: DeviceRecord) -> Result<DeviceRecord, ServiceError> {
        let mut devices = self.devices.lock().await;
        if devices.contains_key(&record.id) {
            return Err(ServiceError::Conflict(record.id));
        }
        debug!(device_id = %record.id, "simulated create");
        devices.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, record: DeviceRecord) -> Result<DeviceRecord, ServiceError> {
        let mut devices = self.devices.lock().await;
        match devices.get_mut(&record.id) {
            Some(slot) => {
                debug!(device_id = %record.id, "simulated update");
                *slot = record.clone();
                Ok(record)
            }
            None => Err(ServiceError::NotFound(record.id)),
        }
    }

    async fn test_connection(&self, record: DeviceRecord) -> Result<String, ServiceError> {
        tokio::time::sleep(self.probe_delay).await;

        if !record.enabled {
            return Err(ServiceError::Rejected(format!(
                "device {} is disabled",
                record.id
            )));
        }
        let transport = record
            .connection_type
            .map_or_else(|| "unknown".to_string(), |t| t.to_string());
        info!(device_id = %record.id, %transport, "simulated probe succeeded");
        Ok(format!("{} reachable over {transport}", record.id))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use posdev_core::{ConnectionType, DeviceType};

    fn record(id: &str) -> DeviceRecord {
        DeviceRecord {
            id: id.to_string(),
            device_type: Some(DeviceType::Drawer),
            connection_type: Some(ConnectionType::Serial),
            enabled: true,
            ..DeviceRecord::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        // Arrange
        let service = SimulatedDeviceService::new(Duration::ZERO);

        // Act
        service.create(record("dev-1")).await.expect("create");
        let fetched = service.fetch("dev-1").await;

        // Assert
        assert_eq!(fetched, Ok(record("dev-1")));
        assert_eq!(service.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_conflict() {
        let service = SimulatedDeviceService::with_devices(Duration::ZERO, [record("dev-1")]);

        let result = service.create(record("dev-1")).await;

        assert_eq!(result, Err(ServiceError::Conflict("dev-1".to_string())));
    }

    #[tokio::test]
    async fn test_update_of_unknown_device_is_not_found() {
        let service = SimulatedDeviceService::new(Duration::ZERO);

        let result = service.update(record("ghost")).await;

        assert_eq!(result, Err(ServiceError::NotFound("ghost".to_string())));
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_replaces_stored_record() {
        // Arrange
        let service = SimulatedDeviceService::with_devices(Duration::ZERO, [record("dev-1")]);
        let mut renamed = record("dev-1");
        renamed.name = "Till drawer".to_string();

        // Act
        service.update(renamed.clone()).await.expect("update");

        // Assert
        assert_eq!(service.fetch("dev-1").await, Ok(renamed));
    }

    #[tokio::test]
    async fn test_probe_reports_transport() {
        let service = SimulatedDeviceService::new(Duration::from_millis(5));

        let status = service.test_connection(record("dev-1")).await;

        assert_eq!(status, Ok("dev-1 reachable over serial".to_string()));
    }

    #[tokio::test]
    async fn test_probe_of_disabled_device_is_rejected() {
        let service = SimulatedDeviceService::new(Duration::ZERO);
        let mut disabled = record("dev-2");
        disabled.enabled = false;

        let result = service.test_connection(disabled).await;

        assert!(matches!(result, Err(ServiceError::Rejected(_))));
    }
}
