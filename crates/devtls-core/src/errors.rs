//! Error kind constants for logging.
//!
//! These constants provide consistent error classification across all crates.

/// Required argument missing or malformed.
pub const ERROR_USAGE: &str = "usage";
/// Private key artifact absent.
pub const ERROR_MISSING_KEY: &str = "missing_key";
/// Certificate signing request artifact absent.
pub const ERROR_MISSING_REQUEST: &str = "missing_request";
/// Write refused by the overwrite policy.
pub const ERROR_ALREADY_EXISTS: &str = "already_exists";
/// Crypto engine rejected the operation.
pub const ERROR_ENGINE: &str = "engine";
/// I/O error.
pub const ERROR_IO: &str = "io";
/// Configuration error.
pub const ERROR_CONFIG: &str = "config";
