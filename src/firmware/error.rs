//! Error types for firmware packaging operations.
//!
//! Every discovery step of the OTA pipeline has its own variant so the CLI
//! can tell the operator exactly which convention the project layout broke.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for firmware operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while packaging, archiving or inspecting firmware.
#[derive(Debug, Error)]
pub enum Error {
    /// No device source file in the project directory.
    #[error("could not find a .{extension} file in project directory '{}'", .project_dir.display())]
    NoDeviceFound {
        /// Project directory that was scanned
        project_dir: PathBuf,
        /// Source extension looked for
        extension: String,
    },

    /// More than one device source file in the project directory.
    #[error(
        "expected one .{extension} file in project directory '{}', found {}: {}",
        .project_dir.display(),
        .candidates.len(),
        .candidates.join(", ")
    )]
    AmbiguousDevice {
        /// Project directory that was scanned
        project_dir: PathBuf,
        /// Source extension looked for
        extension: String,
        /// File names of every candidate
        candidates: Vec<String>,
    },

    /// Version macro absent, or the device source file is missing.
    #[error("could not find firmware version in '{}'", .source_file.display())]
    NoVersionFound {
        /// Device source file that was scanned
        source_file: PathBuf,
    },

    /// Build directory must contain exactly one subdirectory.
    #[error(
        "expected one subfolder in build directory '{}', found {found}",
        .build_dir.display()
    )]
    AmbiguousBuildOutput {
        /// `<project>/build`
        build_dir: PathBuf,
        /// Number of subdirectories found
        found: usize,
    },

    /// Exactly one `.bin` must match the artifact pattern.
    #[error("incorrect number of firmware files matching '{pattern}': expected 1, found {found}")]
    AmbiguousArtifact {
        /// Glob pattern used for discovery
        pattern: String,
        /// Number of matches
        found: usize,
    },

    /// The signer executable could not be located or spawned.
    #[error("OTA signer '{}' is unavailable: {reason}", .signer.display())]
    SignerUnavailable {
        /// Configured signer
        signer: PathBuf,
        /// Why it could not be used
        reason: String,
    },

    /// The signer ran and exited with a non-zero status.
    #[error("OTA image generation failed (exit code: {}){}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()), format_stderr(.stderr))]
    SigningFailed {
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error of the signer
        stderr: String,
    },

    /// Header directory for the library archive does not exist.
    #[error("include directory '{}' does not exist", .path.display())]
    MissingIncludeDir {
        /// Configured include directory
        path: PathBuf,
    },

    /// File is not a well-formed OTA image.
    #[error("invalid OTA image '{}': {reason}", .path.display())]
    InvalidImage {
        /// Inspected file
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// Filesystem error with the operation and path that caused it.
    #[error("error {context} `{}`: {error}", .path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        error: io::Error,
    },

    /// I/O error without path context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Invalid glob pattern.
    #[error("{0}")]
    Glob(#[from] glob::PatternError),

    /// Invalid regular expression.
    #[error("{0}")]
    Regex(#[from] regex::Error),

    /// Zip archive error.
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal error.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Anything else, usually produced by [`bail!`](crate::bail).
    #[error("{0}")]
    GenericError(String),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Attaches a human readable context to `Option` and `Result` values.
pub trait Context<T> {
    /// Converts into an [`Error::GenericError`] carrying `msg`.
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Lazily evaluated variant of [`Context::context`].
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {}", msg, e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {}", f(), e)))
    }
}

/// Adds filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the I/O error into [`Error::Fs`] with the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::firmware::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::firmware::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_failed_includes_trimmed_stderr() {
        let err = Error::SigningFailed {
            code: Some(3),
            stderr: "  ERROR: Failed to sign OTA header.\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "OTA image generation failed (exit code: 3): ERROR: Failed to sign OTA header."
        );
    }

    #[test]
    fn signing_failed_without_stderr_or_code() {
        let err = Error::SigningFailed {
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "OTA image generation failed (exit code: none)");
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("reading", "/tmp/x.bin").unwrap_err();
        assert!(matches!(err, Error::Fs { context: "reading", .. }));
        assert!(err.to_string().contains("/tmp/x.bin"));
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let err = None::<u8>.context("missing").unwrap_err();
        assert_eq!(err.to_string(), "missing");
    }
}
