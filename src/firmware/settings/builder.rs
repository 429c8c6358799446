//! Builder for constructing Settings.

use super::{
    Settings, DEFAULT_OUTPUT_DIR, DEFAULT_PRIVATE_KEY, DEFAULT_SIGNER, DEFAULT_SOURCE_EXTENSION,
};
use crate::bail;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Every field is optional; unset fields fall back to the conventional
/// layout (`firmwares/`, `keys/private_key.pem`, `./create_ota_image`, `ino`).
#[derive(Default)]
pub struct SettingsBuilder {
    output_directory: Option<PathBuf>,
    private_key: Option<PathBuf>,
    signer: Option<PathBuf>,
    source_extension: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory receiving staged and signed images.
    ///
    /// Default: `firmwares`
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the private key passed to the signer.
    ///
    /// Default: `keys/private_key.pem`
    pub fn private_key<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.private_key = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the signer executable.
    ///
    /// Default: `./create_ota_image`
    pub fn signer<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.signer = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the device source extension. A leading dot is ignored.
    ///
    /// Default: `ino`
    pub fn source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = Some(extension.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the source extension is empty or any path is empty.
    pub fn build(self) -> crate::firmware::Result<Settings> {
        let source_extension = self
            .source_extension
            .map(|ext| ext.trim_start_matches('.').to_string())
            .unwrap_or_else(|| DEFAULT_SOURCE_EXTENSION.to_string());

        if source_extension.is_empty() {
            bail!("source extension cannot be empty");
        }

        let output_directory = self
            .output_directory
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let private_key = self
            .private_key
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PRIVATE_KEY));
        let signer = self.signer.unwrap_or_else(|| PathBuf::from(DEFAULT_SIGNER));

        for (name, path) in [
            ("output directory", &output_directory),
            ("private key", &private_key),
            ("signer", &signer),
        ] {
            if path.as_os_str().is_empty() {
                bail!("{} path cannot be empty", name);
            }
        }

        Ok(Settings::new(
            output_directory,
            private_key,
            signer,
            source_extension,
        ))
    }
}
