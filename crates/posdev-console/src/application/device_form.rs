//! DeviceFormSession: the "Add / Edit device" modal.
//!
//! A session owns exactly one [`Device`] draft for as long as the modal is
//! open.  It is the only place that mutates the draft, so the rules from
//! `posdev-core` (one payload per tag, compatible transports only) hold at
//! every step:
//!
//! ```text
//! create() / edit(id)
//!        │
//!        ▼
//!   select_device_type / select_connection_type / edit_*   (sync, in memory)
//!        │
//!        ▼
//!   submit()  ──► validate ──► errors? ──► stay open, show summary
//!        │                       │
//!        │                       └── ok ──► DeviceService::create / update
//!        ▼
//!   test_connection()  ──► validate transport ──► DeviceService::test_connection
//! ```
//!
//! # Overlapping requests
//!
//! `submit` and `test_connection` take `&mut self`.  While one of them is
//! awaiting the backend no other method can touch the session, so a double
//! click cannot produce two concurrent saves of the same draft.
//!
//! # Architecture
//!
//! The session depends only on the [`DeviceService`] trait.  The backend
//! adapter is injected at construction time, which keeps the use case fully
//! unit-testable.

use std::sync::Arc;

use async_trait::async_trait;
use posdev_core::domain::validate::validate_connection;
use posdev_core::{
    compatible_connections, validate, ConnectionConfig, ConnectionType, Device, DeviceConfig,
    DeviceRecord, DeviceType, FieldErrors,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors returned by the backend adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("device not found: {0}")]
    NotFound(String),

    #[error("device already exists: {0}")]
    Conflict(String),

    /// The backend understood the request and refused it.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Port to the device REST endpoints.
///
/// Infrastructure implementations talk to the backend (or simulate it); test
/// implementations are generated by `mockall`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceService: Send + Sync {
    /// Loads a saved device.
    async fn fetch(&self, id: &str) -> Result<DeviceRecord, ServiceError>;

    /// Stores a new device and returns the stored record.
    async fn create(&self, record: DeviceRecord) -> Result<DeviceRecord, ServiceError>;

    /// Replaces an existing device and returns the stored record.
    async fn update(&self, record: DeviceRecord) -> Result<DeviceRecord, ServiceError>;

    /// Asks the backend to reach the device; returns a human-readable status.
    async fn test_connection(&self, record: DeviceRecord) -> Result<String, ServiceError>;
}

/// Error type for the device form use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// Validation failed; the draft is unchanged and the field errors are
    /// available from [`DeviceFormSession::errors`].
    #[error("device has invalid fields: {}", .summary.join("; "))]
    Invalid { summary: Vec<String> },

    /// The backend call failed; the draft is unchanged.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Whether the modal saves with `create` or `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Tabs of the device modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormTab {
    /// Identity, device type and the enabled switch.
    #[default]
    General,
    Connection,
    /// Peripheral-specific settings.
    Device,
}

impl FormTab {
    /// The tab that shows the input for a dotted field path.
    pub fn for_field(path: &str) -> FormTab {
        let connection_prefixes = ConnectionType::ALL.map(ConnectionType::config_field);
        if path == "connection_type"
            || connection_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix))
        {
            FormTab::Connection
        } else if path.contains('.') {
            FormTab::Device
        } else {
            FormTab::General
        }
    }
}

/// Knobs the session reads from the console settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    /// Number of messages shown in the toast on a rejected submit.
    pub error_summary_limit: usize,
    /// Initial state of the "enabled" switch for new devices.
    pub default_enabled: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            error_summary_limit: 3,
            default_enabled: true,
        }
    }
}

/// One open device modal.
pub struct DeviceFormSession {
    service: Arc<dyn DeviceService>,
    options: FormOptions,
    mode: FormMode,
    tab: FormTab,
    draft: Device,
    errors: FieldErrors,
}

impl DeviceFormSession {
    /// Opens the modal for a new device with a generated id.
    pub fn create(service: Arc<dyn DeviceService>, options: FormOptions) -> Self {
        let mut draft = Device::new(format!("dev-{}", Uuid::new_v4().simple()));
        draft.enabled = options.default_enabled;
        debug!(device_id = %draft.id, "opened new device form");
        Self {
            service,
            options,
            mode: FormMode::Create,
            tab: FormTab::General,
            draft,
            errors: FieldErrors::new(),
        }
    }

    /// Opens the modal on a saved device.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Service`] if the record cannot be fetched.
    pub async fn edit(
        service: Arc<dyn DeviceService>,
        options: FormOptions,
        id: &str,
    ) -> Result<Self, FormError> {
        let record = service.fetch(id).await?;
        let draft = Device::hydrate(record);
        debug!(device_id = %draft.id, "opened device form for edit");
        Ok(Self {
            service,
            options,
            mode: FormMode::Edit,
            tab: FormTab::General,
            draft,
            errors: FieldErrors::new(),
        })
    }

    pub fn draft(&self) -> &Device {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn tab(&self) -> FormTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: FormTab) {
        self.tab = tab;
    }

    /// Field errors from the last rejected submit or connection test.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Options for the "Connection" dropdown.  Every transport is offered
    /// until a device type is chosen.
    pub fn available_connections(&self) -> &'static [ConnectionType] {
        match self.draft.device_type() {
            Some(device_type) => compatible_connections(device_type),
            None => &ConnectionType::ALL,
        }
    }

    // ── General tab ───────────────────────────────────────────────────────────

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.draft.id = id.into();
        self.errors.clear_prefix("id");
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.draft.enabled = enabled;
    }

    // ── Tag switches ──────────────────────────────────────────────────────────

    /// Applies the device-type dropdown.  Re-selecting the current type is a
    /// no-op so that edits on the "Device" tab survive.
    pub fn select_device_type(&mut self, device_type: Option<DeviceType>) {
        let old_device = self.draft.device_type();
        if old_device == device_type {
            return;
        }
        let old_connection = self.draft.connection_type();

        self.draft.set_device_type(device_type);

        self.errors.clear_prefix("type");
        // Compatibility is judged against the new type on the next submit.
        self.errors.clear_prefix("connection_type");
        if let Some(old) = old_device {
            self.errors.clear_prefix(old.config_field());
        }
        if self.draft.connection_type() != old_connection {
            if let Some(old) = old_connection {
                warn!(
                    device_id = %self.draft.id,
                    connection_type = %old,
                    "connection cleared by device type change"
                );
                self.errors.clear_prefix(old.config_field());
            }
        }
    }

    /// Applies the connection-type dropdown.  Re-selecting the current type is
    /// a no-op.
    pub fn select_connection_type(&mut self, connection_type: Option<ConnectionType>) {
        let old = self.draft.connection_type();
        if old == connection_type {
            return;
        }

        self.draft.set_connection_type(connection_type);

        self.errors.clear_prefix("connection_type");
        if let Some(old) = old {
            self.errors.clear_prefix(old.config_field());
        }
    }

    // ── Payload edits ─────────────────────────────────────────────────────────

    /// Gives `edit` mutable access to the peripheral payload.
    ///
    /// Returns `false` (and does nothing) when no device type is selected.
    pub fn edit_device(&mut self, edit: impl FnOnce(&mut DeviceConfig)) -> bool {
        match self.draft.device.as_mut() {
            Some(config) => {
                let field = config.device_type().config_field();
                edit(config);
                self.errors.clear_prefix(field);
                true
            }
            None => false,
        }
    }

    /// Gives `edit` mutable access to the transport payload.
    ///
    /// Returns `false` (and does nothing) when no connection type is selected.
    pub fn edit_connection(&mut self, edit: impl FnOnce(&mut ConnectionConfig)) -> bool {
        match self.draft.connection.as_mut() {
            Some(config) => {
                let field = config.connection_type().config_field();
                edit(config);
                self.errors.clear_prefix(field);
                true
            }
            None => false,
        }
    }

    // ── Backend calls ─────────────────────────────────────────────────────────

    /// Validates the draft and saves it.
    ///
    /// On success the session switches to [`FormMode::Edit`], so a second
    /// submit updates the record it just created.
    ///
    /// # Errors
    ///
    /// - [`FormError::Invalid`] when validation fails.  The active tab moves
    ///   to the first failing field.
    /// - [`FormError::Service`] when the backend call fails.
    ///
    /// In both cases the draft is left as it was.  Nothing is retried.
    pub async fn submit(&mut self) -> Result<DeviceRecord, FormError> {
        let errors = validate(&self.draft);
        if !errors.is_empty() {
            return Err(self.reject(errors));
        }
        self.errors = FieldErrors::new();

        let record = self.draft.to_record();
        let result = match self.mode {
            FormMode::Create => self.service.create(record).await,
            FormMode::Edit => self.service.update(record).await,
        };

        match result {
            Ok(saved) => {
                info!(device_id = %saved.id, mode = ?self.mode, "device saved");
                self.mode = FormMode::Edit;
                Ok(saved)
            }
            Err(e) => {
                warn!(device_id = %self.draft.id, error = %e, "device save failed");
                Err(FormError::Service(e))
            }
        }
    }

    /// Validates the transport settings and asks the backend to reach the
    /// device.
    ///
    /// # Errors
    ///
    /// [`FormError::Invalid`] when no connection is selected or its fields
    /// are invalid; [`FormError::Service`] when the probe fails.
    pub async fn test_connection(&mut self) -> Result<String, FormError> {
        let mut errors = FieldErrors::new();
        match &self.draft.connection {
            Some(connection) => validate_connection(connection, &mut errors),
            None => errors.insert("connection_type", "Connection type is required"),
        }
        if !errors.is_empty() {
            return Err(self.reject(errors));
        }

        let status = self
            .service
            .test_connection(self.draft.to_record())
            .await
            .inspect_err(|e| {
                warn!(device_id = %self.draft.id, error = %e, "connection test failed")
            })?;
        info!(device_id = %self.draft.id, %status, "connection test passed");
        Ok(status)
    }

    fn reject(&mut self, errors: FieldErrors) -> FormError {
        let summary = errors.summary(self.options.error_summary_limit);
        if let Some(first) = errors.iter().next() {
            self.tab = FormTab::for_field(&first.path);
        }
        warn!(
            device_id = %self.draft.id,
            error_count = errors.len(),
            "device form rejected"
        );
        self.errors = errors;
        FormError::Invalid { summary }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use posdev_core::domain::catalog::WeightUnit;
    use posdev_core::domain::peripheral::PrinterMode;

    fn session_with(mock: MockDeviceService) -> DeviceFormSession {
        DeviceFormSession::create(Arc::new(mock), FormOptions::default())
    }

    /// Fills in a valid USB receipt printer.
    fn fill_usb_printer(session: &mut DeviceFormSession) {
        session.select_device_type(Some(DeviceType::Printer));
        session.select_connection_type(Some(ConnectionType::Usb));
        session.edit_connection(|c| {
            if let ConnectionConfig::Usb(usb) = c {
                usb.vendor_id = "0x04B8".to_string();
                usb.product_id = "0x0202".to_string();
            }
        });
        session.edit_device(|d| {
            if let DeviceConfig::Printer(p) = d {
                p.mode = Some(PrinterMode::Thermal);
            }
        });
    }

    #[test]
    fn test_create_generates_id_and_starts_on_general_tab() {
        // Arrange / Act
        let session = session_with(MockDeviceService::new());

        // Assert
        assert!(session.draft().id.starts_with("dev-"));
        assert!(session.draft().enabled);
        assert_eq!(session.mode(), FormMode::Create);
        assert_eq!(session.tab(), FormTab::General);
    }

    #[test]
    fn test_default_enabled_option_is_applied() {
        let options = FormOptions {
            default_enabled: false,
            ..FormOptions::default()
        };
        let session = DeviceFormSession::create(Arc::new(MockDeviceService::new()), options);
        assert!(!session.draft().enabled);
    }

    #[test]
    fn test_available_connections_follow_device_type() {
        let mut session = session_with(MockDeviceService::new());
        assert_eq!(session.available_connections(), &ConnectionType::ALL);

        session.select_device_type(Some(DeviceType::Drawer));

        assert_eq!(
            session.available_connections(),
            &[ConnectionType::Usb, ConnectionType::Serial]
        );
    }

    #[test]
    fn test_reselecting_same_device_type_keeps_edits() {
        // Arrange
        let mut session = session_with(MockDeviceService::new());
        session.select_device_type(Some(DeviceType::Scale));
        session.edit_device(|d| {
            if let DeviceConfig::Scale(s) = d {
                s.unit = Some(WeightUnit::G);
            }
        });

        // Act
        session.select_device_type(Some(DeviceType::Scale));

        // Assert
        match &session.draft().device {
            Some(DeviceConfig::Scale(s)) => assert_eq!(s.unit, Some(WeightUnit::G)),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_edit_without_selected_type_returns_false() {
        let mut session = session_with(MockDeviceService::new());
        assert!(!session.edit_device(|_| {}));
        assert!(!session.edit_connection(|_| {}));
    }

    #[test]
    fn test_for_field_maps_paths_to_tabs() {
        assert_eq!(FormTab::for_field("id"), FormTab::General);
        assert_eq!(FormTab::for_field("type"), FormTab::General);
        assert_eq!(FormTab::for_field("connection_type"), FormTab::Connection);
        assert_eq!(FormTab::for_field("usb_config.vendor_id"), FormTab::Connection);
        assert_eq!(FormTab::for_field("printer_config.mode"), FormTab::Device);
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_backend() {
        // Arrange
        let mut mock = MockDeviceService::new();
        mock.expect_create().never();
        let mut session = session_with(mock);
        session.set_id("");

        // Act
        let result = session.submit().await;

        // Assert
        assert_eq!(
            result,
            Err(FormError::Invalid {
                summary: vec![
                    "Device ID is required".to_string(),
                    "Device type is required".to_string(),
                    "Connection type is required".to_string(),
                ]
            })
        );
        assert_eq!(session.errors().len(), 3);
        assert_eq!(session.tab(), FormTab::General);
    }

    #[tokio::test]
    async fn test_summary_is_limited_and_tab_follows_first_error() {
        // Arrange: network payment terminal with nothing filled in
        let mut mock = MockDeviceService::new();
        mock.expect_create().never();
        let options = FormOptions {
            error_summary_limit: 1,
            ..FormOptions::default()
        };
        let mut session = DeviceFormSession::create(Arc::new(mock), options);
        session.select_device_type(Some(DeviceType::Payment));
        session.select_connection_type(Some(ConnectionType::Network));

        // Act
        let result = session.submit().await;

        // Assert
        assert_eq!(
            result,
            Err(FormError::Invalid {
                summary: vec!["IP address is required".to_string()]
            })
        );
        assert_eq!(session.errors().len(), 2);
        assert_eq!(session.tab(), FormTab::Connection);
    }

    #[tokio::test]
    async fn test_valid_submit_creates_then_updates() {
        // Arrange
        let mut mock = MockDeviceService::new();
        mock.expect_create().times(1).returning(|record| Ok(record));
        mock.expect_update().times(1).returning(|record| Ok(record));
        let mut session = session_with(mock);
        fill_usb_printer(&mut session);

        // Act
        let created = session.submit().await.expect("first submit creates");
        session.set_name("Receipt 1");
        let updated = session.submit().await.expect("second submit updates");

        // Assert
        assert_eq!(created.device_type, Some(DeviceType::Printer));
        assert_eq!(updated.name, "Receipt 1");
        assert_eq!(session.mode(), FormMode::Edit);
        assert!(session.errors().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_keeps_draft_and_mode() {
        // Arrange
        let mut mock = MockDeviceService::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Err(ServiceError::Unavailable("502 Bad Gateway".to_string())));
        let mut session = session_with(mock);
        fill_usb_printer(&mut session);
        let before = session.draft().clone();

        // Act
        let result = session.submit().await;

        // Assert
        assert!(matches!(
            result,
            Err(FormError::Service(ServiceError::Unavailable(_)))
        ));
        assert_eq!(session.draft(), &before);
        assert_eq!(session.mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn test_edit_hydrates_fetched_record() {
        // Arrange
        let mut saved = Device::new("dev-9");
        saved.set_device_type(Some(DeviceType::Display));
        saved.set_connection_type(Some(ConnectionType::Serial));
        let record = saved.to_record();

        let mut mock = MockDeviceService::new();
        mock.expect_fetch().times(1).returning(move |id| {
            assert_eq!(id, "dev-9");
            Ok(record.clone())
        });

        // Act
        let session = DeviceFormSession::edit(Arc::new(mock), FormOptions::default(), "dev-9")
            .await
            .expect("fetch succeeds");

        // Assert
        assert_eq!(session.mode(), FormMode::Edit);
        assert_eq!(session.draft(), &saved);
    }

    #[tokio::test]
    async fn test_edit_of_missing_device_fails() {
        let mut mock = MockDeviceService::new();
        mock.expect_fetch()
            .returning(|id| Err(ServiceError::NotFound(id.to_string())));

        let result = DeviceFormSession::edit(Arc::new(mock), FormOptions::default(), "nope").await;

        assert!(matches!(
            result,
            Err(FormError::Service(ServiceError::NotFound(ref id))) if id == "nope"
        ));
    }

    #[tokio::test]
    async fn test_test_connection_requires_a_transport() {
        let mut mock = MockDeviceService::new();
        mock.expect_test_connection().never();
        let mut session = session_with(mock);

        let result = session.test_connection().await;

        assert_eq!(
            result,
            Err(FormError::Invalid {
                summary: vec!["Connection type is required".to_string()]
            })
        );
        assert_eq!(session.tab(), FormTab::Connection);
    }

    #[tokio::test]
    async fn test_test_connection_ignores_device_tab_errors() {
        // Arrange: printer mode still unset, transport complete
        let mut mock = MockDeviceService::new();
        mock.expect_test_connection()
            .times(1)
            .returning(|_| Ok("printer online".to_string()));
        let mut session = session_with(mock);
        fill_usb_printer(&mut session);
        session.edit_device(|d| {
            if let DeviceConfig::Printer(p) = d {
                p.mode = None;
            }
        });

        // Act
        let status = session.test_connection().await;

        // Assert
        assert_eq!(status, Ok("printer online".to_string()));
    }

    #[tokio::test]
    async fn test_switching_type_clears_incompatibility_error() {
        // Arrange: a hand-edited drawer record on bluetooth
        let mut saved = Device::new("dev-3");
        saved.set_device_type(Some(DeviceType::Drawer));
        saved.connection = Some(ConnectionType::Bluetooth.default_config());
        let mut record = saved.to_record();
        if let Some(bt) = record.bluetooth_config.as_mut() {
            bt.mac_address = "00:1A:7D:DA:71:13".to_string();
        }

        let mut mock = MockDeviceService::new();
        mock.expect_fetch().returning(move |_| Ok(record.clone()));
        mock.expect_update().never();
        let mut session = DeviceFormSession::edit(Arc::new(mock), FormOptions::default(), "dev-3")
            .await
            .expect("fetch succeeds");
        let _ = session.submit().await;
        assert_eq!(
            session.errors().get("connection_type"),
            Some("A drawer cannot use a bluetooth connection")
        );

        // Act
        session.select_device_type(Some(DeviceType::Printer));

        // Assert
        assert_eq!(
            session.draft().connection_type(),
            Some(ConnectionType::Bluetooth)
        );
        assert!(!session.errors().contains("connection_type"));
    }

    #[tokio::test]
    async fn test_switching_type_clears_stale_errors() {
        // Arrange: a rejected scale submit leaves a unit error behind
        let mut mock = MockDeviceService::new();
        mock.expect_create().never();
        let mut session = session_with(mock);
        session.select_device_type(Some(DeviceType::Scale));
        session.select_connection_type(Some(ConnectionType::Serial));
        let _ = session.submit().await;
        assert!(session.errors().contains("scale_config.unit"));

        // Act
        session.select_device_type(Some(DeviceType::Drawer));

        // Assert
        assert!(!session.errors().contains("scale_config.unit"));
        assert_eq!(session.draft().connection_type(), Some(ConnectionType::Serial));
    }
}
