//! # devtls
//!
//! Local TLS key material for development: an EC private key, a certificate
//! signing request with a DNS SubjectAlternativeName, and a self-signed
//! certificate, kept in one target directory.
//!
//! ## Crates
//!
//! - [`devtls_core`] - Shared defaults and error kinds
//! - [`devtls_config`] - Configuration loading and validation
//! - [`devtls_cert`] - Artifact store, crypto engine and lifecycle operations

pub use devtls_cert as cert;
pub use devtls_config as config;
pub use devtls_core as core;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use devtls_cert::{
        ArtifactKind, ArtifactStore, CertError, CertificateSigner, CryptoEngine, KeyGenerator,
        LifecycleState, OpensslEngine, Orchestrator, RequestBuilder,
    };
    pub use devtls_config::{Config, load_config, validate_config};
}
