//! Startup configuration: the manufacturer string used as the device
//! enumeration filter.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Tool configuration, loaded once before the console loop starts.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// USB manufacturer string that identifies Gorb devices.
    pub manufacturer: String,
}

impl Config {
    /// Load the configuration from a YAML file.
    ///
    /// A missing file or malformed content is a fatal startup error;
    /// callers are expected to propagate it, not recover.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        Self::from_yaml(&raw)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| Error::Config(format!("parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manufacturer_key() {
        let config = Config::from_yaml("manufacturer: Gorb\n").unwrap();
        assert_eq!(config.manufacturer, "Gorb");
    }

    #[test]
    fn rejects_missing_manufacturer() {
        assert!(Config::from_yaml("vendor: Gorb\n").is_err());
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(Config::from_yaml(": not yaml : [").is_err());
    }

    #[test]
    fn load_missing_file_is_error() {
        let result = Config::load(Path::new("/nonexistent/conf.yaml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
