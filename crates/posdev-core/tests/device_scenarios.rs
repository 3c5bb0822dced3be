//! Integration tests for the posdev-core device model.
//!
//! These tests drive the public API the way the device form does: pick tags,
//! edit payloads, validate, serialize to the backend record and hydrate it
//! back.

use posdev_core::domain::catalog::WeightUnit;
use posdev_core::domain::connection::{BluetoothConfig, NetworkConfig, UsbConfig};
use posdev_core::domain::peripheral::{
    PaymentConfig, PrinterConfig, PrinterMode, ScaleConfig, ScannerConfig,
};
use posdev_core::{
    compatible_connections, parse_usb_id, validate, ConnectionConfig, ConnectionType, Device,
    DeviceConfig, DeviceRecord, DeviceType,
};

/// Builds a complete, valid draft for every device type on its first
/// compatible transport.
fn valid_device(device_type: DeviceType) -> Device {
    let connection_type = compatible_connections(device_type)[0];
    let mut device = Device::new(format!("dev-{device_type}"));
    device.name = format!("{device_type} under test");
    device.set_device_type(Some(device_type));
    device.set_connection_type(Some(connection_type));

    match device.connection.as_mut() {
        Some(ConnectionConfig::Network(cfg)) => cfg.ip_address = "192.168.1.40".to_string(),
        Some(ConnectionConfig::Usb(cfg)) => {
            cfg.vendor_id = "0x04B8".to_string();
            cfg.product_id = "0x0202".to_string();
        }
        Some(ConnectionConfig::Bluetooth(cfg)) => {
            cfg.mac_address = "00:11:22:33:44:55".to_string()
        }
        Some(ConnectionConfig::Aidl(cfg)) => cfg.package_name = "woyou.aidlservice.jiuiv5".to_string(),
        Some(ConnectionConfig::Serial(_)) | None => {}
    }

    match device.device.as_mut() {
        Some(DeviceConfig::Printer(cfg)) => cfg.mode = Some(PrinterMode::Thermal),
        Some(DeviceConfig::Scale(cfg)) => cfg.unit = Some(WeightUnit::Kg),
        Some(DeviceConfig::Payment(cfg)) => cfg.provider = "adyen".to_string(),
        _ => {}
    }

    device
}

#[test]
fn test_switching_to_each_device_type_leaves_only_its_skeleton() {
    for device_type in DeviceType::ALL {
        // Arrange: start from a fully edited device of another type
        let start = if device_type == DeviceType::Printer {
            valid_device(DeviceType::Scale)
        } else {
            valid_device(DeviceType::Printer)
        };

        // Act
        let mut device = start;
        device.set_device_type(Some(device_type));

        // Assert
        let record = device.to_record();
        let populated = [
            record.printer_config.is_some(),
            record.scanner_config.is_some(),
            record.scale_config.is_some(),
            record.drawer_config.is_some(),
            record.payment_config.is_some(),
            record.display_config.is_some(),
        ];
        assert_eq!(populated.iter().filter(|p| **p).count(), 1);
        assert_eq!(device.device, Some(device_type.default_config()));
    }
}

#[test]
fn test_incompatible_connection_switch_clears_tag_for_every_device_type() {
    for device_type in DeviceType::ALL {
        for connection_type in ConnectionType::ALL {
            if compatible_connections(device_type).contains(&connection_type) {
                continue;
            }
            let mut device = valid_device(device_type);

            device.set_connection_type(Some(connection_type));

            assert_eq!(device.connection_type(), None);
            assert!(validate(&device).contains("connection_type"));
        }
    }
}

#[test]
fn test_saved_valid_records_validate_clean_after_hydration() {
    for device_type in DeviceType::ALL {
        // Arrange: a valid draft as the form would have saved it
        let device = valid_device(device_type);
        assert!(validate(&device).is_empty(), "{device_type}: {:?}", validate(&device));
        let json = serde_json::to_string(&device.to_record()).unwrap();

        // Act: the backend hands the same JSON back
        let record: DeviceRecord = serde_json::from_str(&json).unwrap();
        let hydrated = Device::hydrate(record);

        // Assert
        assert!(validate(&hydrated).is_empty());
        assert_eq!(hydrated, device);
    }
}

#[test]
fn test_usb_hex_and_decimal_ids_are_equivalent() {
    assert_eq!(parse_usb_id("0x04B8").unwrap(), parse_usb_id("1208").unwrap());

    let mut hex = valid_device(DeviceType::Scanner);
    let mut dec = hex.clone();
    hex.connection = Some(ConnectionConfig::Usb(UsbConfig {
        vendor_id: "0x04B8".to_string(),
        product_id: "0x0E03".to_string(),
        device_path: String::new(),
    }));
    dec.connection = Some(ConnectionConfig::Usb(UsbConfig {
        vendor_id: "1208".to_string(),
        product_id: "3587".to_string(),
        device_path: String::new(),
    }));

    assert!(validate(&hex).is_empty());
    assert!(validate(&dec).is_empty());
}

#[test]
fn test_scale_on_usb_switched_to_printer_requires_mode() {
    // Arrange: a complete USB scale
    let mut device = Device::new("dev-scale");
    device.set_device_type(Some(DeviceType::Scale));
    device.set_connection_type(Some(ConnectionType::Usb));
    device.device = Some(DeviceConfig::Scale(ScaleConfig {
        unit: Some(WeightUnit::Lb),
        ..ScaleConfig::default()
    }));
    device.connection = Some(ConnectionConfig::Usb(UsbConfig {
        vendor_id: "0x0EB8".to_string(),
        product_id: "0xF000".to_string(),
        device_path: String::new(),
    }));
    assert!(validate(&device).is_empty());

    // Act
    device.set_device_type(Some(DeviceType::Printer));

    // Assert
    let record = device.to_record();
    assert!(record.scale_config.is_none());
    assert_eq!(record.printer_config, Some(PrinterConfig::default()));
    assert_eq!(record.printer_config.as_ref().and_then(|p| p.mode), None);
    assert_eq!(device.connection_type(), Some(ConnectionType::Usb));

    let errors = validate(&device);
    assert_eq!(errors.get("printer_config.mode"), Some("Printer mode is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_bluetooth_mac_address_scenarios() {
    let mut device = Device {
        device: Some(DeviceConfig::Scanner(ScannerConfig::default())),
        connection: Some(ConnectionConfig::Bluetooth(BluetoothConfig {
            mac_address: "AA:BB:CC:DD:EE:FF".to_string(),
            ..BluetoothConfig::default()
        })),
        ..Device::new("dev-bt")
    };
    assert!(validate(&device).is_empty());

    if let Some(ConnectionConfig::Bluetooth(cfg)) = device.connection.as_mut() {
        cfg.mac_address = "not-a-mac".to_string();
    }
    assert_eq!(
        validate(&device).get("bluetooth_config.mac_address"),
        Some("MAC address must look like AA:BB:CC:DD:EE:FF")
    );
}

#[test]
fn test_network_payment_terminal_end_to_end() {
    // Arrange
    let mut device = Device::new("dev-pay");
    device.set_device_type(Some(DeviceType::Payment));
    device.set_connection_type(Some(ConnectionType::Network));

    // Act: first submit fails on the two empty required fields
    let errors = validate(&device);

    // Assert
    assert_eq!(
        errors.summary(3),
        ["IP address is required", "Payment provider is required"]
    );

    // Fill them in and submit again
    device.connection = Some(ConnectionConfig::Network(NetworkConfig {
        ip_address: "10.1.2.3".to_string(),
        port: Some(8443),
        ..NetworkConfig::default()
    }));
    device.device = Some(DeviceConfig::Payment(PaymentConfig {
        provider: "adyen".to_string(),
        currency: "EUR".to_string(),
        ..PaymentConfig::default()
    }));
    assert!(validate(&device).is_empty());
}
