//! Connection session: at most one open device handle at a time.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::report;
use crate::transport::{DeviceHandle, HidBackend};
use tracing::{debug, info};

/// Single-slot device session.
///
/// The "at most one open handle" invariant is enforced by a presence
/// check on the slot; every device-facing operation refuses to act when
/// the slot is empty.
#[derive(Default)]
pub struct Session {
    handle: Option<Box<dyn DeviceHandle>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Open the device at `index` in the *unfiltered* enumeration.
    ///
    /// Note: `list` shows filtered indices, so the two index spaces only
    /// line up when every enumerated device matches the filter. This
    /// mirrors the hardware tool's established behavior.
    ///
    /// Returns the product string of the opened device.
    pub fn connect(
        &mut self,
        backend: &mut dyn HidBackend,
        config: &Config,
        index: i64,
    ) -> Result<String> {
        if self.handle.is_some() {
            return Err(Error::SessionAlreadyOpen);
        }

        let entries = backend.enumerate()?;
        let count = entries.len();
        let entry = usize::try_from(index)
            .ok()
            .and_then(|i| entries.get(i))
            .ok_or(Error::BadIndex { index, count })?;

        if entry.manufacturer_or_empty() != config.manufacturer {
            return Err(Error::ManufacturerMismatch {
                index: index as usize,
                manufacturer: config.manufacturer.clone(),
            });
        }

        let handle = backend.open(&entry.path)?;
        let product = handle
            .product_string()
            .or_else(|| entry.product_string.clone())
            .unwrap_or_default();
        info!(index = index, product = %product, "Connected");

        self.handle = Some(handle);
        Ok(product)
    }

    /// Close the open handle and clear the session.
    pub fn disconnect(&mut self) -> Result<()> {
        if self.handle.take().is_none() {
            return Err(Error::NoActiveSession);
        }
        info!("Disconnected");
        Ok(())
    }

    /// Clamp, encode, and send a set-DPI report. Returns the DPI sent.
    ///
    /// A failed write leaves the handle open; the session stays usable.
    pub fn set_dpi(&mut self, raw: i64) -> Result<u16> {
        let handle = self.handle.as_ref().ok_or(Error::NoActiveSession)?;
        let (buffer, dpi) = report::encode_set_dpi(raw);
        handle.write(&buffer)?;
        debug!(dpi = dpi, "Sent set-DPI report");
        Ok(dpi)
    }

    /// Encode and send a macro report.
    pub fn send_macro(&mut self, dx: i64, dy: i64, buttons: Option<&str>) -> Result<()> {
        let handle = self.handle.as_ref().ok_or(Error::NoActiveSession)?;
        let buffer = report::encode_macro(dx, dy, buttons)?;
        handle.write(&buffer)?;
        debug!(dx = dx, dy = dy, "Sent macro report");
        Ok(())
    }
}
