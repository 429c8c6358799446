//! Arduino library archive settings.

use std::path::{Path, PathBuf};

/// Configuration for the library archiver.
///
/// The `library.properties` fields are rendered verbatim into the archive.
#[derive(Clone, Debug)]
pub struct LibrarySettings {
    /// Library name; also the top-level folder inside the archive.
    pub name: String,

    /// Directory whose files are shipped as the library headers.
    pub include_dir: PathBuf,

    /// Directory receiving `<name>.zip`.
    pub output_dir: PathBuf,

    /// `version=` field.
    pub version: String,

    /// `author=` field.
    pub author: String,

    /// `sentence=` field.
    pub sentence: String,

    /// `paragraph=` field.
    pub paragraph: String,

    /// `category=` field.
    pub category: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            name: "ArduinoSebOtaUpdate".into(),
            include_dir: PathBuf::from("include"),
            output_dir: PathBuf::from("."),
            version: "1.0.0".into(),
            author: "Seb".into(),
            sentence: "Common headers for OTA update".into(),
            paragraph: String::new(),
            category: "Communication".into(),
        }
    }
}

impl LibrarySettings {
    /// Path of the archive this configuration produces.
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.zip", self.name))
    }

    /// Returns the include directory.
    pub fn include_dir(&self) -> &Path {
        &self.include_dir
    }

    /// Renders the `library.properties` file.
    pub fn properties(&self) -> String {
        format!(
            "name={}\nversion={}\nauthor={}\nsentence={}\nparagraph={}\ncategory={}\n",
            self.name, self.version, self.author, self.sentence, self.paragraph, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_properties_match_arduino_layout() {
        let settings = LibrarySettings::default();
        assert_eq!(
            settings.properties(),
            "name=ArduinoSebOtaUpdate\n\
             version=1.0.0\n\
             author=Seb\n\
             sentence=Common headers for OTA update\n\
             paragraph=\n\
             category=Communication\n"
        );
        assert_eq!(settings.archive_path(), Path::new("./ArduinoSebOtaUpdate.zip"));
    }
}
