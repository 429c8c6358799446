//! End-to-end tests of the `firmware_packager` binary.

#![cfg(unix)]

mod common;

use assert_cmd::Command;
use common::Workspace;
use predicates::prelude::*;
use std::fs;

fn packager_cmd(ws: &Workspace) -> Command {
    let mut cmd = Command::cargo_bin("firmware_packager").unwrap();
    cmd.current_dir(ws.path())
        .env_remove("FIRMWARE_OUTPUT_DIR")
        .env_remove("OTA_PRIVATE_KEY")
        .env_remove("OTA_SIGNER")
        .env_remove("FIRMWARE_SOURCE_EXT")
        .env("RUST_LOG", "info");
    cmd
}

#[test]
fn ota_writes_canonical_image_relative_to_cwd() {
    let ws = Workspace::new();
    ws.project("RadiatorController", "3.0.0", "esp8266.generic");
    ws.signer();

    packager_cmd(&ws)
        .args(["ota", "--project", "RadiatorController"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "firmwares/RadiatorController_ESP8266_3.0.0.bin",
        ))
        .stdout(predicate::str::contains(
            "Device: RadiatorController, Version: 3.0.0, Chip: ESP8266",
        ));

    assert!(
        ws.path()
            .join("firmwares/RadiatorController_ESP8266_3.0.0.bin")
            .is_file()
    );
    assert!(!ws.path().join("firmwares/firmware.bin").exists());
    assert!(
        ws.signer_args()
            .contains("--private-key keys/private_key.pem")
    );
}

#[test]
fn ota_honours_environment_configuration() {
    let ws = Workspace::new();
    ws.project("LedStripLight", "2.1.0", "esp32.esp32");
    let signer = ws.signer();

    packager_cmd(&ws)
        .env("OTA_SIGNER", &signer)
        .env("FIRMWARE_OUTPUT_DIR", "out")
        .args(["ota", "-p", "LedStripLight"])
        .assert()
        .success();

    assert!(ws.path().join("out/LedStripLight_ESP32_2.1.0.bin").is_file());
}

#[test]
fn missing_version_exits_with_one() {
    let ws = Workspace::new();
    let project = ws.project("RadiatorController", "3.0.0", "esp8266.generic");
    fs::write(project.join("RadiatorController.ino"), "void setup() {}\n").unwrap();
    ws.signer();

    packager_cmd(&ws)
        .args(["ota", "--project", "RadiatorController"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR:"))
        .stderr(predicate::str::contains("could not find firmware version"))
        .stderr(predicate::str::contains("hint: Add a line like"));
}

#[test]
fn quiet_failure_still_prints_hints_on_stderr() {
    let ws = Workspace::new();
    let project = ws.project("RadiatorController", "3.0.0", "esp8266.generic");
    fs::write(project.join("RadiatorController.ino"), "void setup() {}\n").unwrap();
    ws.signer();

    packager_cmd(&ws)
        .args(["-q", "ota", "--project", "RadiatorController"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ERROR:"))
        .stderr(predicate::str::contains("hint: Add a line like"));
}

#[test]
fn project_summary_does_not_depend_on_log_filter() {
    let ws = Workspace::new();
    ws.project("LedStripLight", "10.20.30", "esp32.esp32");
    ws.signer();

    packager_cmd(&ws)
        .env("RUST_LOG", "warn")
        .args(["ota", "--project", "LedStripLight"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Device: LedStripLight, Version: 10.20.30, Chip: ESP32",
        ))
        .stderr(predicate::str::contains("truncated").not());
}

#[test]
fn blocked_final_name_warns_and_succeeds() {
    let ws = Workspace::new();
    ws.project("RadiatorController", "3.0.0", "esp8266.generic");
    ws.signer();
    fs::create_dir_all(ws.path().join("firmwares/RadiatorController_ESP8266_3.0.0.bin")).unwrap();

    packager_cmd(&ws)
        .args(["ota", "--project", "RadiatorController"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains(
            "Signed image could not be renamed to RadiatorController_ESP8266_3.0.0.bin",
        ))
        .stdout(predicate::str::contains("firmwares/ota_firmware.bin"));
}

#[test]
fn empty_build_directory_exits_with_one() {
    let ws = Workspace::new();
    let project = ws.project("RadiatorController", "3.0.0", "esp8266.generic");
    fs::remove_dir_all(project.join("build/esp8266.generic")).unwrap();
    ws.signer();

    packager_cmd(&ws)
        .args(["ota", "--project", "RadiatorController"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("found 0"));

    assert!(!ws.path().join("firmwares").exists());
}

#[test]
fn missing_binary_exits_with_one() {
    let ws = Workspace::new();
    let project = ws.project("RadiatorController", "3.0.0", "esp8266.generic");
    fs::remove_file(project.join("build/esp8266.generic/RadiatorController.ino.bin")).unwrap();
    ws.signer();

    packager_cmd(&ws)
        .args(["ota", "--project", "RadiatorController"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("incorrect number of firmware files"));
}

#[test]
fn signer_failure_exits_with_one() {
    let ws = Workspace::new();
    ws.project("RadiatorController", "3.0.0", "esp8266.generic");
    let signer = ws.failing_signer();

    packager_cmd(&ws)
        .args(["ota", "--project", "RadiatorController", "--signer"])
        .arg(&signer)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OTA image generation failed"));

    assert!(
        !ws.path()
            .join("firmwares/RadiatorController_ESP8266_3.0.0.bin")
            .exists()
    );
}

#[test]
fn ota_requires_project_argument() {
    let ws = Workspace::new();
    packager_cmd(&ws).arg("ota").assert().failure();
}

#[test]
fn library_archive_is_created() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path().join("include")).unwrap();
    fs::write(ws.path().join("include/OtaImageFormat.h"), "#pragma once\n").unwrap();

    packager_cmd(&ws)
        .arg("library")
        .assert()
        .success()
        .stdout(predicate::str::contains("ArduinoSebOtaUpdate.zip"));

    assert!(ws.path().join("ArduinoSebOtaUpdate.zip").is_file());
    assert!(!ws.path().join("ArduinoSebOtaUpdate").exists());
}

#[test]
fn inspect_rejects_non_ota_file() {
    let ws = Workspace::new();
    fs::write(ws.path().join("plain.bin"), vec![0u8; 1024]).unwrap();

    packager_cmd(&ws)
        .args(["inspect", "plain.bin"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid OTA image"));
}

#[test]
fn inspect_reports_consistent_image_as_json() {
    let ws = Workspace::new();
    let firmware = b"\xe9\x01\x02firmware";

    let mut image = vec![0u8; 768];
    image[..8].copy_from_slice(b"OTASEB00");
    image[8..15].copy_from_slice(b"ESP8266");
    image[40..58].copy_from_slice(b"RadiatorController");
    image[72..77].copy_from_slice(b"3.0.0");
    image[80..84].copy_from_slice(&(firmware.len() as u32).to_le_bytes());
    image[84..116].copy_from_slice(&firmware_packager::firmware::builder::sha256_bytes(firmware));
    image.extend_from_slice(firmware);
    fs::write(ws.path().join("ota.bin"), &image).unwrap();

    let output = packager_cmd(&ws)
        .args(["inspect", "--json", "ota.bin"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["chip"], "ESP8266");
    assert_eq!(report["device"], "RadiatorController");
    assert_eq!(report["version"], "3.0.0");
    assert_eq!(report["firmware_size"], 11);
    assert_eq!(report["sha256_matches"], true);
}
