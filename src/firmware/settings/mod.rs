//! Configuration structures for firmware operations.
//!
//! The packager never reads the process working directory or the environment
//! on its own: every path it touches comes from a [`Settings`] value built
//! with [`SettingsBuilder`], or from [`LibrarySettings`] for the archiver.

mod builder;
mod core;
mod library;

pub use builder::SettingsBuilder;
pub use self::core::{Settings, SIGNED_OUTPUT_FILE_NAME, STAGING_FILE_NAME};
pub use library::LibrarySettings;

/// Default output directory for staged and signed images.
pub const DEFAULT_OUTPUT_DIR: &str = "firmwares";

/// Default RSA-2048 private key handed to the signer.
pub const DEFAULT_PRIVATE_KEY: &str = "keys/private_key.pem";

/// Default OTA signing executable.
pub const DEFAULT_SIGNER: &str = "./create_ota_image";

/// Default extension of the device source file.
pub const DEFAULT_SOURCE_EXTENSION: &str = "ino";
