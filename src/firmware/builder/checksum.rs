//! Artifact checksum calculation.

use crate::firmware::error::{ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 checksum and size of a file.
///
/// Reads in 8KB chunks.
///
/// # Returns
///
/// * `Ok((String, u64))` - Hex-encoded SHA-256 hash (64 characters) and byte count
/// * `Err` - If the file cannot be read
pub async fn calculate_sha256(path: &Path) -> Result<(String, u64)> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    let mut size = 0u64;

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        size += n as u64;
    }

    Ok((format!("{:x}", hasher.finalize()), size))
}

/// SHA-256 of an in-memory buffer, as raw bytes.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(data));
    digest
}
