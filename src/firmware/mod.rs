//! Firmware packaging: signed OTA images, Arduino library archives and OTA
//! image inspection.

pub mod builder;
pub mod error;
pub mod image;
pub mod library;
pub mod settings;
pub mod utils;

pub use builder::Packager;
pub use error::{Context, Error, ErrorExt, Result};
pub use settings::{LibrarySettings, Settings, SettingsBuilder};

use crate::metadata::ProjectDescriptor;
use std::path::PathBuf;

/// A finalized OTA image.
#[derive(Clone, Debug)]
pub struct PackagedFirmware {
    /// Identity the image was signed with
    pub descriptor: ProjectDescriptor,
    /// Where the image was written
    pub path: PathBuf,
    /// Image size in bytes
    pub size: u64,
    /// Hex SHA-256 of the image
    pub checksum: String,
}
