//! Signer executable resolution.
//!
//! A signer configured as a path (`./create_ota_image`, `/opt/ota/signer`)
//! is used as-is; a bare name is looked up on `PATH`.

use crate::firmware::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolves the configured signer to an executable path.
pub fn resolve_signer(signer: &Path) -> Result<PathBuf> {
    let is_bare_name = signer.components().count() == 1 && !signer.is_absolute();

    if !is_bare_name {
        if signer.is_file() {
            log::debug!("Using OTA signer at: {}", signer.display());
            return Ok(signer.to_path_buf());
        }
        return Err(Error::SignerUnavailable {
            signer: signer.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }

    match which::which(signer) {
        Ok(path) => {
            log::debug!("Found OTA signer on PATH at: {}", path.display());
            Ok(path)
        }
        Err(e) => Err(Error::SignerUnavailable {
            signer: signer.to_path_buf(),
            reason: format!("not found in PATH: {}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_relative_path_is_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = resolve_signer(&dir.path().join("create_ota_image")).unwrap_err();
        assert!(matches!(err, Error::SignerUnavailable { .. }));
    }

    #[test]
    fn existing_path_is_used_verbatim() {
        let dir = tempfile::TempDir::new().unwrap();
        let signer = dir.path().join("signer");
        std::fs::write(&signer, "#!/bin/sh\n").unwrap();
        assert_eq!(resolve_signer(&signer).unwrap(), signer);
    }

    #[test]
    fn unknown_bare_name_is_unavailable() {
        let err = resolve_signer(Path::new("definitely-not-an-ota-signer-4242")).unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
    }
}
