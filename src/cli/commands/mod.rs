//! Subcommand implementations.

mod inspect;
mod library;
mod ota;

pub use inspect::execute_inspect;
pub use library::execute_library;
pub use ota::execute_ota;
