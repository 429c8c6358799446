//! Command line argument parsing and validation.
//!
//! Every path option can also be set through an environment variable, so
//! the packager runs unchanged from a shell, a Makefile or CI.

use crate::firmware::{
    LibrarySettings, Settings, SettingsBuilder,
    settings::{DEFAULT_OUTPUT_DIR, DEFAULT_PRIVATE_KEY, DEFAULT_SIGNER, DEFAULT_SOURCE_EXTENSION},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Firmware packaging tool for OTA-updatable devices
#[derive(Parser, Debug)]
#[command(
    name = "firmware_packager",
    version,
    about = "Firmware packaging tool for OTA-updatable devices",
    long_about = "Builds signed OTA images from compiled firmware projects, packages the shared
OTA headers as an Arduino library, and inspects produced OTA images.

Usage:
  firmware_packager ota --project RadiatorController
  firmware_packager library --include-dir include
  firmware_packager inspect firmwares/RadiatorController_ESP8266_3.0.0.bin

Exit code 0 = success, 1 = any failure."
)]
pub struct Args {
    /// Print extra detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a signed OTA image from a firmware project
    Ota(OtaArgs),

    /// Package the OTA headers as an Arduino library archive
    Library(LibraryArgs),

    /// Decode and verify an OTA image
    Inspect(InspectArgs),
}

/// Arguments of `ota`
#[derive(clap::Args, Debug)]
pub struct OtaArgs {
    /// Project directory (e.g. "RadiatorController")
    #[arg(short, long, value_name = "DIR")]
    pub project: PathBuf,

    /// Directory receiving the signed image
    #[arg(long, value_name = "DIR", env = "FIRMWARE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// RSA-2048 private key handed to the signer
    #[arg(long, value_name = "PATH", env = "OTA_PRIVATE_KEY", default_value = DEFAULT_PRIVATE_KEY)]
    pub private_key: PathBuf,

    /// OTA signer executable (path, or name looked up on PATH)
    #[arg(long, value_name = "PATH", env = "OTA_SIGNER", default_value = DEFAULT_SIGNER)]
    pub signer: PathBuf,

    /// Extension of the device source file
    #[arg(long, value_name = "EXT", env = "FIRMWARE_SOURCE_EXT", default_value = DEFAULT_SOURCE_EXTENSION)]
    pub source_ext: String,
}

/// Arguments of `library`
#[derive(clap::Args, Debug)]
pub struct LibraryArgs {
    /// Library name, also the folder inside the archive
    #[arg(long, default_value = "ArduinoSebOtaUpdate")]
    pub name: String,

    /// Directory holding the headers
    #[arg(long, value_name = "DIR", default_value = "include")]
    pub include_dir: PathBuf,

    /// Directory receiving <NAME>.zip
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// library.properties version
    #[arg(long = "lib-version", value_name = "VERSION", default_value = "1.0.0")]
    pub lib_version: String,

    /// library.properties author
    #[arg(long, default_value = "Seb")]
    pub author: String,

    /// library.properties sentence
    #[arg(long, default_value = "Common headers for OTA update")]
    pub sentence: String,

    /// library.properties paragraph
    #[arg(long, default_value = "")]
    pub paragraph: String,

    /// library.properties category
    #[arg(long, default_value = "Communication")]
    pub category: String,
}

/// Arguments of `inspect`
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// OTA image to decode
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Ota(ota) => {
                if ota.project.as_os_str().is_empty() {
                    return Err("Project directory cannot be empty".to_string());
                }
                if !ota.project.is_dir() {
                    return Err(format!(
                        "Project directory does not exist: {}",
                        ota.project.display()
                    ));
                }
            }
            Command::Library(lib) => {
                if lib.name.trim().is_empty() {
                    return Err("Library name cannot be empty".to_string());
                }
                if lib.name.contains(['/', '\\']) {
                    return Err(format!("Invalid library name: {}", lib.name));
                }
            }
            Command::Inspect(_) => {}
        }
        Ok(())
    }
}

impl OtaArgs {
    /// Packager settings for these arguments.
    pub fn settings(&self) -> crate::firmware::Result<Settings> {
        SettingsBuilder::new()
            .output_directory(&self.output_dir)
            .private_key(&self.private_key)
            .signer(&self.signer)
            .source_extension(self.source_ext.as_str())
            .build()
    }
}

impl From<&LibraryArgs> for LibrarySettings {
    fn from(args: &LibraryArgs) -> Self {
        Self {
            name: args.name.clone(),
            include_dir: args.include_dir.clone(),
            output_dir: args.output_dir.clone(),
            version: args.lib_version.clone(),
            author: args.author.clone(),
            sentence: args.sentence.clone(),
            paragraph: args.paragraph.clone(),
            category: args.category.clone(),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print error message
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.output.error(message)
    }

    /// Print recovery hint
    pub fn hint(&self, message: &str) -> std::io::Result<()> {
        self.output.hint(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ota_defaults() {
        let args = Args::try_parse_from(["firmware_packager", "ota", "-p", "RadiatorController"])
            .unwrap();
        let Command::Ota(ota) = args.command else {
            panic!("expected ota command");
        };
        assert_eq!(ota.project, PathBuf::from("RadiatorController"));
        assert_eq!(ota.source_ext, "ino");

        let settings = ota.settings().unwrap();
        assert_eq!(settings.signer(), std::path::Path::new("./create_ota_image"));
    }

    #[test]
    fn ota_requires_project() {
        assert!(Args::try_parse_from(["firmware_packager", "ota"]).is_err());
    }

    #[test]
    fn library_args_map_to_settings() {
        let args = Args::try_parse_from([
            "firmware_packager",
            "library",
            "--name",
            "MyOta",
            "--lib-version",
            "2.0.0",
        ])
        .unwrap();
        let Command::Library(lib) = &args.command else {
            panic!("expected library command");
        };
        let settings = LibrarySettings::from(lib);
        assert_eq!(settings.name, "MyOta");
        assert_eq!(settings.version, "2.0.0");
        assert_eq!(settings.category, "Communication");
    }

    #[test]
    fn library_name_with_separator_is_invalid() {
        let args =
            Args::try_parse_from(["firmware_packager", "library", "--name", "a/b"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn missing_project_directory_is_invalid() {
        let args = Args::try_parse_from([
            "firmware_packager",
            "ota",
            "--project",
            "/definitely/not/a/project",
        ])
        .unwrap();
        assert!(args.validate().unwrap_err().contains("does not exist"));
    }
}
