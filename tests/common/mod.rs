//! Shared fixtures for packager integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Signer stand-in: records its arguments next to itself and writes
/// `SIGNED` followed by the firmware to `--out`.
const FAKE_SIGNER: &str = r#"#!/bin/sh
echo "$@" > "$(dirname "$0")/signer_args.txt"
while [ $# -gt 0 ]; do
  case "$1" in
    --fw) fw="$2"; shift 2 ;;
    --out) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
printf 'SIGNED' > "$out"
cat "$fw" >> "$out"
"#;

/// Signer stand-in that always fails.
const FAILING_SIGNER: &str = r#"#!/bin/sh
echo "ERROR: Failed to sign OTA header." >&2
exit 3
"#;

/// Workspace with a project directory and a signer script.
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes `<name>/<name>.ino` with the given version and a single
    /// `build/<build_subdir>/<name>.ino.bin`.
    pub fn project(&self, name: &str, version: &str, build_subdir: &str) -> PathBuf {
        let project = self.path().join(name);
        fs::create_dir_all(&project).unwrap();
        fs::write(
            project.join(format!("{name}.ino")),
            format!("#include \"OtaUpdater.h\"\n\n#define VERSION \"{version}\"\n\nvoid setup() {{}}\n"),
        )
        .unwrap();

        let out = project.join("build").join(build_subdir);
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join(format!("{name}.ino.bin")), b"\xe9\x01\x02firmware").unwrap();
        project
    }

    pub fn signer(&self) -> PathBuf {
        self.script("create_ota_image", FAKE_SIGNER)
    }

    pub fn failing_signer(&self) -> PathBuf {
        self.script("failing_signer", FAILING_SIGNER)
    }

    pub fn signer_args(&self) -> String {
        fs::read_to_string(self.path().join("signer_args.txt")).unwrap_or_default()
    }

    fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, body).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }
}
