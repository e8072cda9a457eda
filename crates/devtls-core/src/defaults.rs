//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Artifact Store Defaults
// ============================================================================

/// Default target directory (the current working directory).
pub const DEFAULT_TARGET_DIR: &str = ".";
/// Environment variable naming the target directory.
pub const TARGET_DIR_ENV: &str = "TARGET_DIR";
/// Default private key file name.
pub const DEFAULT_KEY_FILE: &str = "tls.key";
/// Default certificate signing request file name.
pub const DEFAULT_REQUEST_FILE: &str = "tls.csr";
/// Default certificate file name.
pub const DEFAULT_CERT_FILE: &str = "tls.crt";
/// Existing artifacts are replaced unless configured otherwise.
pub const DEFAULT_OVERWRITE: bool = true;

// ============================================================================
// Certificate Defaults
// ============================================================================

/// Default self-signed certificate validity in days.
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;
/// Upper bound accepted for `certificate.validity_days` (100 years).
pub const MAX_VALIDITY_DAYS: u32 = 36_500;
/// Elliptic curve used for generated keys.
pub const KEY_CURVE_NAME: &str = "secp384r1";
/// Digest used for CSR and certificate signatures.
pub const SIGNATURE_DIGEST_NAME: &str = "sha256";

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default log format: "pretty", "compact" or "json".
pub const DEFAULT_LOG_FORMAT: &str = "pretty";
/// Default log output: "stderr" or "stdout".
pub const DEFAULT_LOG_OUTPUT: &str = "stderr";
