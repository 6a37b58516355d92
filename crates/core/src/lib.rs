//! gorb-driver-core: device directory, session management, and report
//! encodings for Gorb USB HID mice.
//!
//! This crate provides the logic behind the interactive console: a
//! manufacturer-filtered device directory, a single-slot connection
//! session, the two fixed-layout output reports the hardware accepts,
//! and the command dispatcher that ties them together.

pub mod command;
pub mod config;
pub mod console;
pub mod device;
pub mod error;
#[cfg(test)]
mod integration_tests;
pub mod report;
pub mod session;
pub mod transport;
