//! Error types for artifact lifecycle operations.

use std::path::PathBuf;

use devtls_core::errors;
use thiserror::Error;

use crate::engine::EngineError;

/// Errors that can occur while issuing key material.
///
/// Every variant is fatal to the command that produced it; nothing is
/// retried and nothing already written is rolled back.
#[derive(Error, Debug)]
pub enum CertError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("private key not found at {}; run `devtls key` first", path.display())]
    MissingKey { path: PathBuf },

    #[error(
        "certificate signing request not found at {}; run `devtls request <domain>` first",
        path.display()
    )]
    MissingRequest { path: PathBuf },

    #[error("{} already exists and overwriting is disabled", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("crypto engine: {0}")]
    Engine(#[from] EngineError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable classification for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Usage(_) => errors::ERROR_USAGE,
            Self::MissingKey { .. } => errors::ERROR_MISSING_KEY,
            Self::MissingRequest { .. } => errors::ERROR_MISSING_REQUEST,
            Self::AlreadyExists { .. } => errors::ERROR_ALREADY_EXISTS,
            Self::Engine(_) => errors::ERROR_ENGINE,
            Self::Io { .. } => errors::ERROR_IO,
        }
    }
}
