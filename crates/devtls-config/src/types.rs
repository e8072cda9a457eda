//! Configuration type definitions for the artifact store, certificates, and logging.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// Top-level configuration.
///
/// Every section has defaults, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub certificate: CertificateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where artifacts live and how they are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding key, request and certificate.
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,
    /// Private key file name inside `target_dir`.
    #[serde(default = "default_key_file")]
    pub key_file: String,
    /// Certificate signing request file name inside `target_dir`.
    #[serde(default = "default_request_file")]
    pub request_file: String,
    /// Certificate file name inside `target_dir`.
    #[serde(default = "default_cert_file")]
    pub cert_file: String,
    /// Replace existing artifacts on write. When false, writes onto an
    /// existing file fail instead.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            key_file: default_key_file(),
            request_file: default_request_file(),
            cert_file: default_cert_file(),
            overwrite: default_overwrite(),
        }
    }
}

/// Self-signed certificate parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateConfig {
    /// Validity period in days, counted from the moment of signing.
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            validity_days: default_validity_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format: json, pretty, or compact. Default: pretty.
    pub format: Option<String>,
    /// Output target: stdout or stderr. Default: stderr.
    pub output: Option<String>,
    /// Per-module log level filters (e.g., {"devtls_cert": "debug"}).
    #[serde(default)]
    pub filters: HashMap<String, String>,
}
