//! Device directory: manufacturer-filtered listing of attached HID devices.

use crate::config::Config;
use crate::error::Result;
use crate::transport::{DeviceEntry, HidBackend};
use tracing::{debug, info};

/// One row of the device directory.
///
/// Indices are positional within the *filtered* result set of a single
/// enumeration and are not stable across enumerations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub index: usize,
    pub product_id: Option<u16>,
    pub product_string: Option<String>,
    pub usage: Option<u16>,
    pub path: String,
}

impl DeviceDescriptor {
    /// Transport type column; only USB HID devices are enumerated.
    pub const TRANSPORT: &'static str = "usb";

    fn from_entry(index: usize, entry: &DeviceEntry) -> Self {
        Self {
            index,
            product_id: entry.product_id,
            product_string: entry.product_string.clone(),
            usage: entry.usage,
            path: entry.path.clone(),
        }
    }
}

/// Enumerate attached devices and keep those matching the configured
/// manufacturer, assigning zero-based indices in filtered order.
pub fn list_devices(backend: &mut dyn HidBackend, config: &Config) -> Result<Vec<DeviceDescriptor>> {
    let entries = backend.enumerate()?;

    let devices: Vec<DeviceDescriptor> = entries
        .iter()
        .filter(|entry| entry.manufacturer_or_empty() == config.manufacturer)
        .enumerate()
        .map(|(index, entry)| {
            info!(
                index = index,
                product = entry.product_string.as_deref().unwrap_or("N/A"),
                path = %entry.path,
                "Found Gorb device"
            );
            DeviceDescriptor::from_entry(index, entry)
        })
        .collect();

    debug!(
        total = entries.len(),
        matched = devices.len(),
        "Directory listing complete"
    );
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockBackend;

    fn config() -> Config {
        Config {
            manufacturer: "Gorb".to_string(),
        }
    }

    #[test]
    fn filters_by_manufacturer_and_reindexes() {
        let mut backend = MockBackend::new(vec![
            MockBackend::entry("Gorb", "Gorb Mouse A", "p0"),
            MockBackend::entry("Other", "Stranger", "p1"),
            MockBackend::entry("Gorb", "Gorb Mouse B", "p2"),
        ]);

        let devices = list_devices(&mut backend, &config()).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].index, 0);
        assert_eq!(devices[0].path, "p0");
        assert_eq!(devices[1].index, 1);
        assert_eq!(devices[1].path, "p2");
    }

    #[test]
    fn empty_when_nothing_matches() {
        let mut backend = MockBackend::new(vec![MockBackend::entry("Other", "Stranger", "p0")]);
        let devices = list_devices(&mut backend, &config()).unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn missing_manufacturer_does_not_match() {
        let mut backend = MockBackend::new(vec![crate::transport::DeviceEntry {
            manufacturer: None,
            product_id: None,
            product_string: None,
            usage: None,
            path: "p0".into(),
        }]);
        let devices = list_devices(&mut backend, &config()).unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn indices_are_fresh_per_enumeration() {
        let mut backend = MockBackend::new(vec![
            MockBackend::entry("Gorb", "Gorb Mouse A", "p0"),
            MockBackend::entry("Gorb", "Gorb Mouse B", "p1"),
        ]);
        let first = list_devices(&mut backend, &config()).unwrap();
        let second = list_devices(&mut backend, &config()).unwrap();
        assert_eq!(first, second);
        assert_eq!(second[1].index, 1);
    }
}
