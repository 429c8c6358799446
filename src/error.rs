//! Top-level error types for the packager binary.
//!
//! Domain failures live in [`crate::firmware::Error`]; this module adds the
//! CLI layer on top and the recovery hints printed after an `ERROR:` line.

use crate::firmware;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for all packager operations
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Firmware packaging errors
    #[error("{0}")]
    Firmware(#[from] firmware::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl PackagerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use firmware::Error as E;

        let hints: &[&str] = match self {
            Self::Firmware(E::NoDeviceFound { .. }) => &[
                "Pass the directory that contains the device source file",
                "Use --source-ext if the source file is not a .ino",
            ],
            Self::Firmware(E::AmbiguousDevice { .. }) => {
                &["Keep exactly one device source file at the project root"]
            }
            Self::Firmware(E::NoVersionFound { .. }) => {
                &["Add a line like: #define VERSION \"1.0.0\""]
            }
            Self::Firmware(E::AmbiguousBuildOutput { .. }) => &[
                "Compile the sketch so that build/ holds exactly one <chip>.<board> folder",
                "Remove stale build folders for other boards",
            ],
            Self::Firmware(E::AmbiguousArtifact { .. }) => {
                &["Make sure the build folder holds exactly one .bin file"]
            }
            Self::Firmware(E::SignerUnavailable { .. }) => &[
                "Build the signer or point --signer / OTA_SIGNER at it",
            ],
            Self::Firmware(E::SigningFailed { .. }) => &[
                "Check that the private key exists (--private-key / OTA_PRIVATE_KEY)",
                "Run the signer by hand with --help to check its arguments",
            ],
            Self::Firmware(E::MissingIncludeDir { .. }) => {
                &["Point --include-dir at the directory holding the headers"]
            }
            _ => &[],
        };

        hints.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn firmware_errors_display_transparently() {
        let err = PackagerError::from(firmware::Error::AmbiguousBuildOutput {
            build_dir: PathBuf::from("Radiator/build"),
            found: 2,
        });
        assert_eq!(
            err.to_string(),
            "expected one subfolder in build directory 'Radiator/build', found 2"
        );
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn cli_errors_have_no_hints() {
        let err = PackagerError::from(CliError::InvalidArguments {
            reason: "bad".into(),
        });
        assert_eq!(err.to_string(), "Invalid arguments: bad");
        assert!(err.recovery_suggestions().is_empty());
    }
}
