//! OTA packaging orchestration.
//!
//! This module provides the [`Packager`] that turns a firmware project
//! directory into a signed, canonically named OTA image.

use crate::{
    firmware::{
        Error, PackagedFirmware, Result, Settings, error::ErrorExt, utils::fs,
    },
    metadata::{self, BUILD_DIR_NAME, ProjectDescriptor},
};
use std::{
    io,
    path::{Path, PathBuf},
};

use super::{
    checksum::calculate_sha256,
    signing::{SigningRequest, sign_image},
    tool_detection::resolve_signer,
};

/// Drives the OTA pipeline for one project.
///
/// Steps run strictly in order and the first failure aborts the run:
/// discovery (device, version, chip, artifact), staging, signing,
/// finalization.
///
/// # Examples
///
/// ```no_run
/// use firmware_packager::firmware::{Packager, SettingsBuilder};
///
/// # async fn example() -> firmware_packager::firmware::Result<()> {
/// let packager = Packager::new(SettingsBuilder::new().build()?);
/// let packaged = packager.package("RadiatorController".as_ref()).await?;
/// println!("{} ({})", packaged.path.display(), packaged.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a packager with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Packages `project_dir` into `<output_dir>/<device>_<chip>_<version>.bin`.
    ///
    /// An existing image with the same name is replaced.
    pub async fn package(&self, project_dir: &Path) -> Result<PackagedFirmware> {
        let descriptor = self.describe(project_dir)?;
        self.package_described(project_dir, descriptor).await
    }

    /// Derives device name, version and chip of `project_dir`.
    pub fn describe(&self, project_dir: &Path) -> Result<ProjectDescriptor> {
        let descriptor =
            metadata::discover_project(project_dir, self.settings.source_extension())?;
        log::debug!(
            "Device: {}, Version: {}, Chip: {}",
            descriptor.device_name,
            descriptor.version,
            descriptor.chip
        );
        Ok(descriptor)
    }

    /// Runs the remaining pipeline steps for an already described project.
    pub async fn package_described(
        &self,
        project_dir: &Path,
        descriptor: ProjectDescriptor,
    ) -> Result<PackagedFirmware> {
        let artifact = discover_artifact(project_dir)?;
        log::info!("Firmware binary: {}", artifact.display());

        let output_dir = self.settings.output_directory();
        fs::create_dir_all(output_dir).await?;

        let staging = self.settings.staging_path();
        fs::copy_file(&artifact, &staging).await?;
        log::debug!("Staged {} -> {}", artifact.display(), staging.display());

        let signer = resolve_signer(self.settings.signer())?;
        let signed = self.settings.signed_output_path();
        let request = SigningRequest {
            descriptor: &descriptor,
            firmware: &staging,
            private_key: self.settings.private_key(),
            output: &signed,
        };
        sign_image(&signer, &request).await?;
        log::info!("OTA firmware image generated: {}", signed.display());

        let final_path = self.finalize(&signed, &descriptor.image_file_name()).await;

        let (checksum, size) = calculate_sha256(&final_path).await?;
        log::info!("Final OTA firmware image: {}", final_path.display());

        Ok(PackagedFirmware {
            descriptor,
            path: final_path,
            size,
            checksum,
        })
    }

    /// Renames the signer output and drops the staging copy.
    ///
    /// Both steps are best effort. Returns the path the image ended up at.
    async fn finalize(&self, signed: &Path, file_name: &str) -> PathBuf {
        let final_path = self.settings.final_image_path(file_name);

        let image_path = match fs::rename_overwrite(signed, &final_path).await {
            Ok(()) => final_path,
            Err(e) => {
                log::warn!("Could not rename signed image: {}", e);
                signed.to_path_buf()
            }
        };

        if let Err(e) = fs::remove_file(&self.settings.staging_path()).await {
            log::warn!("Could not remove staging file: {}", e);
        }

        image_path
    }
}

/// Returns the single `build/*/*.bin` file of `project_dir`.
pub fn discover_artifact(project_dir: &Path) -> Result<PathBuf> {
    let base = glob::Pattern::escape(&project_dir.to_string_lossy());
    let pattern = format!("{}/{}/*/*.bin", base, BUILD_DIR_NAME);

    let mut matches = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry
            .map_err(io::Error::from)
            .fs_context("scanning build output", project_dir)?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.len() != 1 {
        return Err(Error::AmbiguousArtifact {
            pattern,
            found: matches.len(),
        });
    }

    Ok(matches.remove(0))
}
