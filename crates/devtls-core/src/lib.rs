//! Core types and constants shared across devtls crates.
//!
//! This crate provides:
//! - Default configuration values (artifact names, curve, digest, validity)
//! - Error kind constants for logging
//! - Common project metadata

pub mod defaults;
pub mod errors;

// Re-export commonly used items at crate root
pub use defaults::*;
pub use errors::*;

/// Project name.
pub const PROJECT_NAME: &str = "devtls";
/// Project version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
