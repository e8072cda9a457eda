//! The `reset` pipeline: key, then request, then certificate.

use std::fmt;

use devtls_core::DEFAULT_VALIDITY_DAYS;
use tracing::{debug, error};

use crate::engine::{CertPem, CryptoEngine};
use crate::error::CertError;
use crate::keygen::KeyGenerator;
use crate::request::{RequestBuilder, require_domain};
use crate::sign::CertificateSigner;
use crate::store::ArtifactStore;

/// Stages of [`Orchestrator::reset`], in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Key,
    Request,
    Sign,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Key => "key",
            Self::Request => "request",
            Self::Sign => "sign",
        })
    }
}

/// Composes the three single-purpose components into one fail-fast run.
///
/// A failing stage aborts the run and its error is returned unchanged.
/// Artifacts written by earlier stages stay on disk.
pub struct Orchestrator<'a, E: ?Sized> {
    store: &'a ArtifactStore,
    engine: &'a E,
    validity_days: u32,
}

impl<'a, E: CryptoEngine + ?Sized> Orchestrator<'a, E> {
    pub fn new(store: &'a ArtifactStore, engine: &'a E) -> Self {
        Self {
            store,
            engine,
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }

    pub fn validity_days(mut self, days: u32) -> Self {
        self.validity_days = days;
        self
    }

    pub fn reset(&self, domain: &str) -> Result<CertPem, CertError> {
        require_domain(domain)?;

        stage(PipelineStage::Key, || {
            KeyGenerator::new(self.store, self.engine).generate()
        })?;
        stage(PipelineStage::Request, || {
            RequestBuilder::new(self.store, self.engine).build(domain)
        })?;
        stage(PipelineStage::Sign, || {
            CertificateSigner::new(self.store, self.engine)
                .validity_days(self.validity_days)
                .sign()
        })
    }
}

fn stage<T>(
    stage: PipelineStage,
    run: impl FnOnce() -> Result<T, CertError>,
) -> Result<T, CertError> {
    debug!(%stage, "reset stage started");
    run().inspect_err(|e| error!(%stage, kind = e.kind(), "reset aborted: {}", e))
}
