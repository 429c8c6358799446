//! Firmware packaging library for OTA-updatable embedded devices
//!
//! This library provides:
//! - Signed OTA image generation from convention-based firmware projects
//! - Arduino library archives for the shared OTA headers
//! - OTA image decoding and payload verification
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod firmware;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
pub use firmware::{PackagedFirmware, Packager, Settings, SettingsBuilder};
pub use metadata::ProjectDescriptor;
