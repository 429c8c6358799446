//! External OTA signer invocation.
//!
//! The signer is a black box: it receives the image identity and file paths
//! as flags and its exit status is the only success signal. It is spawned
//! directly with an argument list, never through a shell.

use crate::firmware::{Error, Result};
use crate::metadata::ProjectDescriptor;
use std::ffi::OsString;
use std::path::Path;

/// Inputs of one signer run.
#[derive(Debug)]
pub struct SigningRequest<'a> {
    /// Identity written into the image header
    pub descriptor: &'a ProjectDescriptor,
    /// Staged firmware binary
    pub firmware: &'a Path,
    /// RSA-2048 private key
    pub private_key: &'a Path,
    /// Where the signer writes the image
    pub output: &'a Path,
}

impl SigningRequest<'_> {
    /// Argument list in the order the signer documents.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "--chip".into(),
            self.descriptor.chip.clone().into(),
            "--device".into(),
            self.descriptor.device_name.clone().into(),
            "--version".into(),
            self.descriptor.version.clone().into(),
            "--fw".into(),
            self.firmware.as_os_str().to_owned(),
            "--private-key".into(),
            self.private_key.as_os_str().to_owned(),
            "--out".into(),
            self.output.as_os_str().to_owned(),
        ]
    }
}

/// Runs `signer` and waits for it to exit.
///
/// No timeout is applied. Standard output is logged at debug level; standard
/// error is attached to [`Error::SigningFailed`].
pub async fn sign_image(signer: &Path, request: &SigningRequest<'_>) -> Result<()> {
    let args = request.args();
    log::debug!("Running {} {:?}", signer.display(), args);

    let output = tokio::process::Command::new(signer)
        .args(&args)
        .output()
        .await
        .map_err(|e| Error::SignerUnavailable {
            signer: signer.to_path_buf(),
            reason: format!("failed to execute: {}", e),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        log::debug!("signer: {}", line);
    }

    if !output.status.success() {
        return Err(Error::SigningFailed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}
