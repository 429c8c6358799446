//! Firmware Packager - signed OTA images for embedded firmware projects.
//!
//! This binary derives device, version and chip from a project layout,
//! signs the single build artifact with the external OTA signer and stores
//! it under a canonical name.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging; discovery progress is logged at info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Run CLI and get exit code
    let exit_code = match firmware_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
