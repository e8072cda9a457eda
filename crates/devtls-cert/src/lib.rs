//! Local TLS key material for development.
//!
//! This crate issues an EC private key, a certificate signing request carrying
//! a SubjectAlternativeName, and a self-signed certificate derived from that
//! request. The request stays valid for submission to a CA later, without
//! regenerating the key.
//!
//! # Lifecycle
//!
//! ```text
//! Empty --key--> KeyOnly --request--> KeyAndRequest --sign--> Full
//!   `--------------------------- reset ---------------------------^
//! ```
//!
//! `key` is legal from any state, `request` needs a key, `sign` needs a key
//! and a request. Nothing is ever deleted; artifacts are only overwritten.
//!
//! ```no_run
//! use devtls_cert::{ArtifactStore, OpensslEngine, Orchestrator};
//!
//! let store = ArtifactStore::new("/tmp/tls");
//! let engine = OpensslEngine::new();
//! Orchestrator::new(&store, &engine).reset("example.test")?;
//! # Ok::<(), devtls_cert::CertError>(())
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod keygen;
pub mod pipeline;
pub mod request;
pub mod sign;
pub mod store;

#[cfg(test)]
mod testing;

pub use cli::{CertArgs, CertCommands, ParseFailure, execute, run};
pub use engine::{
    CertPem, CryptoEngine, CsrPem, Curve, Digest, EngineError, KeyPem, OpensslEngine,
};
pub use error::CertError;
pub use keygen::KeyGenerator;
pub use pipeline::{Orchestrator, PipelineStage};
pub use request::RequestBuilder;
pub use sign::CertificateSigner;
pub use store::{ArtifactKind, ArtifactStore, LifecycleState, OverwritePolicy, StoreLayout};
