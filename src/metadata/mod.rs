//! Project metadata discovery from the firmware project layout
//!
//! A firmware project is recognised purely by convention:
//!
//! ```text
//! RadiatorController/
//! ├── RadiatorController.ino        # device name + `#define VERSION "3.0.0"`
//! └── build/
//!     └── esp8266.generic/          # chip = ESP8266
//!         └── RadiatorController.ino.bin
//! ```

use crate::firmware::{Error, ErrorExt, Result};
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};

/// Line pattern of the version macro in the device source file.
pub const VERSION_PATTERN: &str = r#"#define\s+VERSION\s+"([^"]+)""#;

/// Name of the toolchain output directory inside a project.
pub const BUILD_DIR_NAME: &str = "build";

/// OTA header field widths, in bytes (NUL padded by the signer).
const CHIP_FIELD_WIDTH: usize = 32;
const DEVICE_FIELD_WIDTH: usize = 32;
const VERSION_FIELD_WIDTH: usize = 8;

/// Identity of a firmware project, derived once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// Stem of the device source file (e.g. `RadiatorController`)
    pub device_name: String,

    /// Value of the version macro (e.g. `3.0.0`)
    pub version: String,

    /// Uppercased target chip (e.g. `ESP8266`)
    pub chip: String,
}

impl ProjectDescriptor {
    /// Canonical file name of the signed image: `<device>_<chip>_<version>.bin`.
    pub fn image_file_name(&self) -> String {
        format!("{}_{}_{}.bin", self.device_name, self.chip, self.version)
    }

    /// Names of the fields the signer will silently truncate.
    ///
    /// The signer copies each value into a fixed-width header field. A value
    /// exactly as wide as its field is stored without a NUL terminator, only
    /// longer values are cut.
    pub fn truncated_fields(&self) -> Vec<&'static str> {
        [
            ("chip", self.chip.len(), CHIP_FIELD_WIDTH),
            ("device", self.device_name.len(), DEVICE_FIELD_WIDTH),
            ("version", self.version.len(), VERSION_FIELD_WIDTH),
        ]
        .into_iter()
        .filter(|(_, len, width)| len > width)
        .map(|(name, _, _)| name)
        .collect()
    }
}

/// Derives device name, version and chip from `project_dir`.
///
/// Steps run in order and the first failure aborts discovery.
pub fn discover_project(project_dir: &Path, source_extension: &str) -> Result<ProjectDescriptor> {
    let device_name = discover_device(project_dir, source_extension)?;
    log::debug!("Discovered device: {}", device_name);

    let source_file = project_dir.join(format!("{}.{}", device_name, source_extension));
    let version = discover_version(&source_file)?;
    log::debug!("Discovered version: {}", version);

    let chip = discover_chip(project_dir)?;
    log::debug!("Discovered chip: {}", chip);

    let descriptor = ProjectDescriptor {
        device_name,
        version,
        chip,
    };

    for field in descriptor.truncated_fields() {
        log::warn!(
            "{} value of {:?} exceeds the OTA header field and will be truncated by the signer",
            field,
            descriptor
        );
    }

    Ok(descriptor)
}

/// Returns the stem of the single `*.<source_extension>` file in `project_dir`.
///
/// The scan is not recursive. Several candidates are an error rather than a
/// guess, since directory iteration order is unspecified.
pub fn discover_device(project_dir: &Path, source_extension: &str) -> Result<String> {
    let entries = match std::fs::read_dir(project_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NoDeviceFound {
                project_dir: project_dir.to_path_buf(),
                extension: source_extension.to_string(),
            });
        }
        Err(e) => return Err(e).fs_context("reading project directory", project_dir),
    };

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry.fs_context("reading project directory", project_dir)?.path();
        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == source_extension);

        if matches_extension && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.as_slice() {
        [] => Err(Error::NoDeviceFound {
            project_dir: project_dir.to_path_buf(),
            extension: source_extension.to_string(),
        }),
        [single] => single
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| Error::NoDeviceFound {
                project_dir: project_dir.to_path_buf(),
                extension: source_extension.to_string(),
            }),
        many => Err(Error::AmbiguousDevice {
            project_dir: project_dir.to_path_buf(),
            extension: source_extension.to_string(),
            candidates: many
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

/// Returns the first `#define VERSION "<value>"` value in `source_file`.
///
/// A missing or unreadable file is reported the same way as a missing macro.
pub fn discover_version(source_file: &Path) -> Result<String> {
    let pattern = Regex::new(VERSION_PATTERN)?;

    let contents = match std::fs::read(source_file) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            log::debug!("Cannot read {}: {}", source_file.display(), e);
            return Err(Error::NoVersionFound {
                source_file: source_file.to_path_buf(),
            });
        }
    };

    contents
        .lines()
        .find_map(|line| pattern.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::NoVersionFound {
            source_file: source_file.to_path_buf(),
        })
}

/// Returns the chip identifier encoded in the single `build/` subdirectory.
///
/// `build/esp8266.generic` yields `ESP8266`. A missing `build` directory
/// counts as zero subdirectories.
pub fn discover_chip(project_dir: &Path) -> Result<String> {
    let build_dir = project_dir.join(BUILD_DIR_NAME);

    let entries = match std::fs::read_dir(&build_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::AmbiguousBuildOutput {
                build_dir,
                found: 0,
            });
        }
        Err(e) => return Err(e).fs_context("reading build directory", &build_dir),
    };

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry.fs_context("reading build directory", &build_dir)?.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }

    let [subdir] = subdirs.as_slice() else {
        return Err(Error::AmbiguousBuildOutput {
            build_dir,
            found: subdirs.len(),
        });
    };

    let name = subdir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let chip = name.split('.').next().unwrap_or_default().to_uppercase();

    if chip.is_empty() {
        crate::bail!(
            "could not determine chip from build subfolder '{}'",
            subdir.display()
        );
    }

    Ok(chip)
}
