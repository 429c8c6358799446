//! `library` subcommand: headers to Arduino library zip.

use crate::cli::{RuntimeConfig, args::LibraryArgs};
use crate::error::Result;
use crate::firmware::{LibrarySettings, library::create_library};

/// Builds the library archive.
pub async fn execute_library(args: &LibraryArgs, config: &RuntimeConfig) -> Result<i32> {
    let settings = LibrarySettings::from(args);
    config.progress(&format!(
        "Packaging {} from {}",
        settings.name,
        settings.include_dir.display()
    ))?;

    let path = create_library(&settings).await?;

    config.success(&format!("Library archive: {}", path.display()))?;
    Ok(0)
}
