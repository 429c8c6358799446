//! OTA packaging orchestration.
//!
//! This module provides the [`Packager`] that coordinates discovery, signing
//! and finalization of an OTA image.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 calculation for images and payloads
//! - [`orchestrator`] - Main [`Packager`] struct and artifact discovery
//! - [`signing`] - External signer invocation
//! - [`tool_detection`] - Signer executable resolution

mod checksum;
mod orchestrator;
mod signing;
mod tool_detection;

pub use checksum::{calculate_sha256, sha256_bytes};
pub use orchestrator::{Packager, discover_artifact};
pub use signing::{SigningRequest, sign_image};
pub use tool_detection::resolve_signer;
