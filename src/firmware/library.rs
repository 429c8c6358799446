//! Arduino library archive creation.
//!
//! Produces `<name>.zip` holding a single `<name>/` folder with the shared
//! OTA headers and a generated `library.properties`, the layout the Arduino
//! IDE expects for "Add .ZIP Library".

use crate::firmware::{Context, Error, ErrorExt, LibrarySettings, Result, utils::fs};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

/// Builds the library archive and returns its path.
///
/// An existing archive at the same path is replaced. Entries are written in
/// sorted order with a fixed timestamp, so unchanged headers give a
/// byte-identical archive.
pub async fn create_library(settings: &LibrarySettings) -> Result<PathBuf> {
    let archive_path = settings.archive_path();
    fs::remove_file(&archive_path).await?;

    if !settings.include_dir().is_dir() {
        return Err(Error::MissingIncludeDir {
            path: settings.include_dir().to_path_buf(),
        });
    }

    fs::create_dir_all(&settings.output_dir).await?;

    let settings = settings.clone();
    let path = archive_path.clone();
    let entries = tokio::task::spawn_blocking(move || write_archive(&settings, &path))
        .await
        .context("Archive task panicked")??;

    log::info!(
        "Created library archive {} ({} headers)",
        archive_path.display(),
        entries
    );
    Ok(archive_path)
}

/// Writes the archive and returns the number of header files included.
fn write_archive(settings: &LibrarySettings, archive_path: &Path) -> Result<usize> {
    let include_dir = settings.include_dir();

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in walkdir::WalkDir::new(include_dir).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();

    let file = std::fs::File::create(archive_path).fs_context("creating archive", archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    zip.add_directory(format!("{}/", settings.name), options)?;

    for path in &files {
        let rel_path = path.strip_prefix(include_dir)?;
        let name = format!("{}/{}", settings.name, zip_entry_name(rel_path));
        log::debug!("Adding {} as {}", path.display(), name);

        let contents = std::fs::read(path).fs_context("reading header", path)?;
        zip.start_file(name, options)?;
        zip.write_all(&contents)
            .fs_context("writing archive", archive_path)?;
    }

    zip.start_file(format!("{}/library.properties", settings.name), options)?;
    zip.write_all(settings.properties().as_bytes())
        .fs_context("writing archive", archive_path)?;

    zip.finish()?;
    Ok(files.len())
}

/// Zip entry names always use `/` separators.
fn zip_entry_name(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
