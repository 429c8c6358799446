//! Shared helpers for firmware operations.

pub mod fs;
