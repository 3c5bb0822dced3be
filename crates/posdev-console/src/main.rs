//! `posdev`: command-line companion to the hardware settings screen.
//!
//! Works on device records stored as JSON, the same shape the back office
//! sends to the device endpoints.
//!
//! # Usage
//!
//! ```text
//! posdev [--config <FILE>] <COMMAND>
//!
//! Commands:
//!   validate <FILE>                          Report field errors for a device
//!   compat   <TYPE>                          List transports a device type supports
//!   skeleton <TYPE> [--connection <CONN>]    Print a fresh draft for a device type
//!   switch   <FILE> [--type <TYPE>] [--connection <CONN>]
//!                                            Change tags the way the form does
//!   probe    <FILE>                          Run a simulated connection test
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable         | Description                                   |
//! |------------------|-----------------------------------------------|
//! | `POSDEV_CONFIG`  | Settings file, instead of the platform path   |
//! | `RUST_LOG`       | Log filter, instead of `log_level` in settings |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use posdev_console::application::DeviceFormSession;
use posdev_console::infrastructure::device_service::SimulatedDeviceService;
use posdev_console::infrastructure::storage::settings::{
    load_settings, load_settings_from, ConsoleSettings,
};
use posdev_core::{compatible_connections, validate, ConnectionType, Device, DeviceRecord, DeviceType};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// POS hardware device configuration tool.
#[derive(Debug, Parser)]
#[command(
    name = "posdev",
    about = "Validate and edit POS peripheral configurations",
    version
)]
struct Cli {
    /// Settings file to read instead of the platform default.
    #[arg(long, global = true, env = "POSDEV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a device record and print its field errors.
    Validate { file: PathBuf },

    /// List the connection types a device type supports.
    Compat { device_type: DeviceType },

    /// Print a new draft with default settings for a device type.
    Skeleton {
        device_type: DeviceType,
        /// Also attach the default payload for this connection type.
        #[arg(long)]
        connection: Option<ConnectionType>,
    },

    /// Change the device and/or connection type of a record and print the
    /// result.
    Switch {
        file: PathBuf,
        #[arg(long = "type")]
        device_type: Option<DeviceType>,
        #[arg(long)]
        connection: Option<ConnectionType>,
    },

    /// Validate the transport settings and run a simulated connection test.
    Probe { file: PathBuf },
}

impl Cli {
    /// Loads the settings file named by `--config`, or the platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load_settings(&self) -> anyhow::Result<ConsoleSettings> {
        match &self.config {
            Some(path) => load_settings_from(path)
                .with_context(|| format!("failed to load settings from {}", path.display())),
            None => load_settings().context("failed to load settings"),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.load_settings()?;

    // RUST_LOG wins over the settings file.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();
    debug!(?settings, "settings loaded");

    run(cli.command, &settings).await
}

async fn run(command: Command, settings: &ConsoleSettings) -> anyhow::Result<()> {
    match command {
        Command::Validate { file } => {
            let device = read_device(&file)?;
            let errors = validate(&device);
            println!("{}", serde_json::to_string_pretty(&errors)?);
            if !errors.is_empty() {
                bail!("{} has {} invalid field(s)", file.display(), errors.len());
            }
        }
        Command::Compat { device_type } => {
            for connection_type in compatible_connections(device_type) {
                println!("{connection_type}");
            }
        }
        Command::Skeleton {
            device_type,
            connection,
        } => {
            let device = skeleton(device_type, connection)?;
            println!("{}", serde_json::to_string_pretty(&device.to_record())?);
        }
        Command::Switch {
            file,
            device_type,
            connection,
        } => {
            let mut device = read_device(&file)?;
            if let Some(device_type) = device_type {
                device.set_device_type(Some(device_type));
            }
            if let Some(connection) = connection {
                device.set_connection_type(Some(connection));
            }
            println!("{}", serde_json::to_string_pretty(&device.to_record())?);
        }
        Command::Probe { file } => {
            let record = read_device(&file)?.to_record();
            let id = record.id.clone();
            let service = Arc::new(SimulatedDeviceService::with_devices(
                settings.test_connection_delay(),
                [record],
            ));
            info!(device_id = %id, "testing connection");
            let mut session = DeviceFormSession::edit(service, settings.form_options(), &id)
                .await
                .with_context(|| format!("failed to open {id}"))?;
            let status = session
                .test_connection()
                .await
                .with_context(|| format!("connection test for {id} failed"))?;
            println!("{status}");
        }
    }
    Ok(())
}

/// Reads a device record from a JSON file.
fn read_device(path: &Path) -> anyhow::Result<Device> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let record: DeviceRecord = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a device record", path.display()))?;
    Ok(Device::hydrate(record))
}

fn skeleton(
    device_type: DeviceType,
    connection: Option<ConnectionType>,
) -> anyhow::Result<Device> {
    let mut device = Device::new(format!("new-{device_type}"));
    device.set_device_type(Some(device_type));
    if let Some(connection) = connection {
        device.set_connection_type(Some(connection));
        if device.connection.is_none() {
            bail!("a {device_type} cannot use a {connection} connection");
        }
    }
    Ok(device)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
