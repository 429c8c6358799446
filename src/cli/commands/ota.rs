//! `ota` subcommand: project directory to signed OTA image.

use crate::cli::{RuntimeConfig, args::OtaArgs};
use crate::error::Result;
use crate::firmware::Packager;

/// Packages one project and reports the final image.
pub async fn execute_ota(args: &OtaArgs, config: &RuntimeConfig) -> Result<i32> {
    let settings = args.settings()?;
    config.progress(&format!("Packaging {}", args.project.display()))?;
    config.verbose_println(&format!("Signer: {}", settings.signer().display()))?;
    config.verbose_println(&format!("Private key: {}", settings.private_key().display()))?;
    config.verbose_println(&format!(
        "Output directory: {}",
        settings.output_directory().display()
    ))?;

    let packager = Packager::new(settings);
    let descriptor = packager.describe(&args.project)?;
    config.progress(&format!(
        "Device: {}, Version: {}, Chip: {}",
        descriptor.device_name, descriptor.version, descriptor.chip
    ))?;

    let packaged = packager.package_described(&args.project, descriptor).await?;

    let canonical_name = packaged.descriptor.image_file_name();
    if packaged.path.file_name().and_then(|n| n.to_str()) != Some(canonical_name.as_str()) {
        config.warn(&format!(
            "Signed image could not be renamed to {}",
            canonical_name
        ))?;
    }

    config.success(&format!(
        "Final OTA firmware image: {}",
        packaged.path.display()
    ))?;
    config.indent(&format!("Size: {} bytes", packaged.size))?;
    config.indent(&format!("SHA256: {}", packaged.checksum))?;

    Ok(0)
}
