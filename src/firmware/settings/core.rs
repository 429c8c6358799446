//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

/// File name of the staging copy handed to the signer.
pub const STAGING_FILE_NAME: &str = "firmware.bin";

/// File name the signer writes before finalization.
pub const SIGNED_OUTPUT_FILE_NAME: &str = "ota_firmware.bin";

/// Settings for OTA packaging.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use firmware_packager::firmware::SettingsBuilder;
///
/// # fn example() -> firmware_packager::firmware::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_directory("firmwares")
///     .private_key("keys/private_key.pem")
///     .signer("./create_ota_image")
///     .build()?;
/// assert_eq!(settings.source_extension(), "ino");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory receiving the staging copy and the final image.
    output_directory: PathBuf,

    /// Private key path, passed through to the signer unvalidated.
    private_key: PathBuf,

    /// Signer executable: a path, or a bare name looked up on `PATH`.
    signer: PathBuf,

    /// Extension of the device source file, without the leading dot.
    source_extension: String,
}

impl Settings {
    /// Returns the output directory.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the private key path.
    pub fn private_key(&self) -> &Path {
        &self.private_key
    }

    /// Returns the configured signer.
    pub fn signer(&self) -> &Path {
        &self.signer
    }

    /// Returns the device source extension.
    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    /// Path of the transient copy of the build artifact.
    pub fn staging_path(&self) -> PathBuf {
        self.output_directory.join(STAGING_FILE_NAME)
    }

    /// Path the signer is told to write to.
    pub fn signed_output_path(&self) -> PathBuf {
        self.output_directory.join(SIGNED_OUTPUT_FILE_NAME)
    }

    /// Canonical path of a finalized image.
    pub fn final_image_path(&self, file_name: &str) -> PathBuf {
        self.output_directory.join(file_name)
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        output_directory: PathBuf,
        private_key: PathBuf,
        signer: PathBuf,
        source_extension: String,
    ) -> Self {
        Self {
            output_directory,
            private_key,
            signer,
            source_extension,
        }
    }
}
