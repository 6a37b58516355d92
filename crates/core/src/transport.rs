//! HID transport abstraction for device enumeration and raw report writes.
//!
//! Provides a trait-based transport layer so that real hidapi devices and
//! mock devices share the same interface.

use crate::error::{Error, Result};
use std::ffi::CString;
use tracing::{debug, trace};

/// A raw enumeration record for one attached HID device.
///
/// Fields hidapi could not read are `None` and display as "N/A" in the
/// device directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub manufacturer: Option<String>,
    pub product_id: Option<u16>,
    pub product_string: Option<String>,
    pub usage: Option<u16>,
    /// Platform path used to open the device.
    pub path: String,
}

impl DeviceEntry {
    /// Manufacturer string for filter comparisons; a missing string
    /// compares as empty.
    pub fn manufacturer_or_empty(&self) -> &str {
        self.manufacturer.as_deref().unwrap_or("")
    }
}

/// An open device accepting raw output reports.
pub trait DeviceHandle {
    /// Write one raw report (first byte is the report ID).
    fn write(&self, data: &[u8]) -> Result<()>;

    /// Product string of the open device, if the transport can read it.
    fn product_string(&self) -> Option<String>;
}

/// Abstraction over HID enumerate/open.
pub trait HidBackend {
    /// Enumerate all currently attached HID devices, unfiltered.
    fn enumerate(&mut self) -> Result<Vec<DeviceEntry>>;

    /// Open a device by its enumeration path.
    fn open(&mut self, path: &str) -> Result<Box<dyn DeviceHandle>>;
}

/// hidapi-backed transport.
pub struct HidapiBackend {
    api: hidapi::HidApi,
}

impl HidapiBackend {
    pub fn new() -> Result<Self> {
        let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;
        Ok(Self { api })
    }
}

impl HidBackend for HidapiBackend {
    fn enumerate(&mut self) -> Result<Vec<DeviceEntry>> {
        debug!("Starting HID device enumeration");
        self.api
            .refresh_devices()
            .map_err(|e| Error::Hid(e.to_string()))?;

        let entries: Vec<DeviceEntry> = self
            .api
            .device_list()
            .map(|info| DeviceEntry {
                manufacturer: info.manufacturer_string().map(|s| s.to_string()),
                product_id: Some(info.product_id()),
                product_string: info.product_string().map(|s| s.to_string()),
                usage: Some(info.usage()),
                path: info.path().to_string_lossy().into_owned(),
            })
            .collect();

        debug!(count = entries.len(), "Device enumeration complete");
        Ok(entries)
    }

    fn open(&mut self, path: &str) -> Result<Box<dyn DeviceHandle>> {
        let c_path =
            CString::new(path).map_err(|_| Error::Hid(format!("path contains NUL: {path:?}")))?;
        let device = self
            .api
            .open_path(&c_path)
            .map_err(|e| Error::Hid(format!("open {path}: {e}")))?;
        debug!(path = path, "Opened HID device");
        Ok(Box::new(HidapiHandle { device }))
    }
}

struct HidapiHandle {
    device: hidapi::HidDevice,
}

impl DeviceHandle for HidapiHandle {
    fn write(&self, data: &[u8]) -> Result<()> {
        trace!(report_hex = format_args!("{:02X?}", data), "HID TX");
        self.device
            .write(data)
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(())
    }

    fn product_string(&self) -> Option<String> {
        self.device.get_product_string().ok().flatten()
    }
}
