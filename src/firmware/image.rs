//! OTA image format decoding.
//!
//! Layout, little endian:
//!
//! | offset | size | field            |
//! |--------|------|------------------|
//! | 0      | 8    | magic `OTASEB00` |
//! | 8      | 32   | chip             |
//! | 40     | 32   | device           |
//! | 72     | 8    | firmware version |
//! | 80     | 4    | firmware size    |
//! | 84     | 32   | firmware SHA-256 |
//! | 116    | 140  | reserved         |
//! | 256    | 512  | signature        |
//! | 768    | ...  | firmware         |

use crate::firmware::{Error, ErrorExt, Result, builder::sha256_bytes};
use std::path::{Path, PathBuf};

/// Full magic written by the current signer.
pub const OTA_HEADER_MAGIC: &[u8; 8] = b"OTASEB00";

/// Magic prefix shared by every format revision (last two digits version it).
const MAGIC_PREFIX: &[u8] = b"OTASEB";

/// Header size in bytes.
pub const OTA_HEADER_SIZE: usize = 256;

/// Signature block size in bytes.
pub const OTA_SIGNATURE_SIZE: usize = 512;

/// Decoded OTA header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtaHeader {
    pub magic: [u8; 8],
    pub chip: String,
    pub device: String,
    pub firmware_version: String,
    pub firmware_size: u32,
    pub firmware_sha256: [u8; 32],
}

impl OtaHeader {
    /// Decodes the first [`OTA_HEADER_SIZE`] bytes of `bytes`.
    ///
    /// Returns `None` if fewer bytes are available.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let header = bytes.get(..OTA_HEADER_SIZE)?;

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&header[0..8]);
        let mut size = [0u8; 4];
        size.copy_from_slice(&header[80..84]);
        let mut firmware_sha256 = [0u8; 32];
        firmware_sha256.copy_from_slice(&header[84..116]);

        Some(Self {
            magic,
            chip: padded_str(&header[8..40]),
            device: padded_str(&header[40..72]),
            firmware_version: padded_str(&header[72..80]),
            firmware_size: u32::from_le_bytes(size),
            firmware_sha256,
        })
    }

    /// Magic as text, e.g. `OTASEB00`.
    pub fn magic_str(&self) -> String {
        padded_str(&self.magic)
    }

    /// Hex rendering of the embedded firmware digest.
    pub fn firmware_sha256_hex(&self) -> String {
        hex::encode(self.firmware_sha256)
    }
}

/// Result of inspecting an OTA image.
#[derive(Clone, Debug)]
pub struct OtaImageInfo {
    /// Inspected file
    pub path: PathBuf,
    /// Decoded header
    pub header: OtaHeader,
    /// Bytes following the signature block
    pub payload_size: u64,
    /// Hex SHA-256 of the payload
    pub payload_sha256: String,
}

impl OtaImageInfo {
    /// Payload length matches the header.
    pub fn size_matches(&self) -> bool {
        self.payload_size == u64::from(self.header.firmware_size)
    }

    /// Payload digest matches the header.
    pub fn sha256_matches(&self) -> bool {
        self.payload_sha256 == self.header.firmware_sha256_hex()
    }

    /// Both size and digest match.
    pub fn is_consistent(&self) -> bool {
        self.size_matches() && self.sha256_matches()
    }
}

/// Reads and decodes the OTA image at `path`.
///
/// The signature itself is not verified; only the header is checked against
/// the embedded firmware.
pub async fn inspect(path: &Path) -> Result<OtaImageInfo> {
    let bytes = tokio::fs::read(path)
        .await
        .fs_context("reading OTA image", path)?;
    decode(path, &bytes)
}

fn decode(path: &Path, bytes: &[u8]) -> Result<OtaImageInfo> {
    let invalid = |reason: String| Error::InvalidImage {
        path: path.to_path_buf(),
        reason,
    };

    let payload_offset = OTA_HEADER_SIZE + OTA_SIGNATURE_SIZE;
    if bytes.len() < payload_offset {
        return Err(invalid(format!(
            "{} bytes is shorter than header and signature ({} bytes)",
            bytes.len(),
            payload_offset
        )));
    }

    let header = OtaHeader::parse(bytes)
        .ok_or_else(|| invalid("truncated header".to_string()))?;

    if !header.magic.starts_with(MAGIC_PREFIX) {
        return Err(invalid(format!("bad magic {:?}", header.magic_str())));
    }
    if &header.magic != OTA_HEADER_MAGIC {
        log::warn!(
            "Image format revision {} differs from {}",
            header.magic_str(),
            String::from_utf8_lossy(OTA_HEADER_MAGIC)
        );
    }

    let payload = &bytes[payload_offset..];

    Ok(OtaImageInfo {
        path: path.to_path_buf(),
        payload_size: payload.len() as u64,
        payload_sha256: hex::encode(sha256_bytes(payload)),
        header,
    })
}

/// Text up to the first NUL, or the whole field when it is full.
fn padded_str(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
