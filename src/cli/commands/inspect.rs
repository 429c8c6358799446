//! `inspect` subcommand: decode an OTA image and check its payload.

use crate::cli::{RuntimeConfig, args::InspectArgs};
use crate::error::{CliError, Result};
use crate::firmware::image::{OtaImageInfo, inspect};
use serde::Serialize;

/// Machine readable inspection result for `--json`.
#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    path: String,
    magic: String,
    chip: &'a str,
    device: &'a str,
    version: &'a str,
    firmware_size: u32,
    payload_size: u64,
    firmware_sha256: String,
    payload_sha256: &'a str,
    size_matches: bool,
    sha256_matches: bool,
}

impl<'a> From<&'a OtaImageInfo> for InspectReport<'a> {
    fn from(info: &'a OtaImageInfo) -> Self {
        Self {
            path: info.path.display().to_string(),
            magic: info.header.magic_str(),
            chip: &info.header.chip,
            device: &info.header.device,
            version: &info.header.firmware_version,
            firmware_size: info.header.firmware_size,
            payload_size: info.payload_size,
            firmware_sha256: info.header.firmware_sha256_hex(),
            payload_sha256: &info.payload_sha256,
            size_matches: info.size_matches(),
            sha256_matches: info.sha256_matches(),
        }
    }
}

/// Prints the header fields; exits 1 if the payload does not match them.
pub async fn execute_inspect(args: &InspectArgs, config: &RuntimeConfig) -> Result<i32> {
    let info = inspect(&args.image).await?;
    let exit_code = if info.is_consistent() { 0 } else { 1 };

    if args.json {
        let json = serde_json::to_string_pretty(&InspectReport::from(&info)).map_err(|e| {
            CliError::ExecutionFailed {
                command: "inspect".to_string(),
                reason: format!("Failed to serialize report: {}", e),
            }
        })?;
        println!("{}", json);
        return Ok(exit_code);
    }

    let header = &info.header;
    config.section(&format!("{}", info.path.display()))?;
    config.indent(&format!("Magic:    {}", header.magic_str()))?;
    config.indent(&format!("Chip:     {}", header.chip))?;
    config.indent(&format!("Device:   {}", header.device))?;
    config.indent(&format!("Version:  {}", header.firmware_version))?;
    config.indent(&format!(
        "Size:     {} bytes (payload {} bytes)",
        header.firmware_size, info.payload_size
    ))?;
    config.indent(&format!("SHA256:   {}", header.firmware_sha256_hex()))?;

    if !info.size_matches() {
        config.error(&format!(
            "Firmware size mismatch: header says {} bytes, image holds {} bytes",
            header.firmware_size, info.payload_size
        ))?;
    } else if !info.sha256_matches() {
        config.error(&format!(
            "Firmware SHA256 mismatch: image payload hashes to {}",
            info.payload_sha256
        ))?;
    } else {
        config.success("Header matches firmware payload")?;
    }

    Ok(exit_code)
}
