//! Error types for gorb-driver-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed user input (bad integer literal, missing arguments).
    #[error("invalid params: {0}")]
    Parse(String),

    /// A device-facing command was issued with no open session.
    #[error("there is not connect exists")]
    NoActiveSession,

    /// `connect` was issued while a session was already open.
    #[error("there is already exists a connect")]
    SessionAlreadyOpen,

    /// Connect index outside the enumerated device list.
    #[error("device index {index} out of range (enumerated {count} devices)")]
    BadIndex { index: i64, count: usize },

    /// The device at the requested index is not from the configured
    /// manufacturer.
    #[error("device at index {index} does not match manufacturer {manufacturer:?}")]
    ManufacturerMismatch { index: usize, manufacturer: String },

    /// HID enumeration or open failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// HID write failure, carrying the transport's error string.
    #[error("{0}")]
    Transport(String),

    /// Startup configuration failure (missing or malformed config file).
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
