//! Self-signing the stored request.

use devtls_core::DEFAULT_VALIDITY_DAYS;
use tracing::info;

use crate::engine::{CertPem, CryptoEngine, CsrPem, Digest, KeyPem};
use crate::error::CertError;
use crate::store::{ArtifactKind, ArtifactStore};

/// Produces the certificate artifact from the stored key and CSR.
pub struct CertificateSigner<'a, E: ?Sized> {
    store: &'a ArtifactStore,
    engine: &'a E,
    validity_days: u32,
}

impl<'a, E: CryptoEngine + ?Sized> CertificateSigner<'a, E> {
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

    /// Issue a certificate whose issuer and subject are the CSR subject.
    ///
    /// The key is checked first, then the request; either missing stops the
    /// operation before the engine is called.
    pub fn sign(&self) -> Result<CertPem, CertError> {
        if !self.store.exists(ArtifactKind::Key) {
            return Err(CertError::MissingKey {
                path: self.store.path(ArtifactKind::Key),
            });
        }
        if !self.store.exists(ArtifactKind::Request) {
            return Err(CertError::MissingRequest {
                path: self.store.path(ArtifactKind::Request),
            });
        }
        let key = KeyPem::new(self.store.read(ArtifactKind::Key)?);
        let csr = CsrPem::new(self.store.read(ArtifactKind::Request)?);

        let cert = self
            .engine
            .self_sign(&csr, &key, self.validity_days, Digest::Sha256)?;
        let path = self.store.write(ArtifactKind::Certificate, cert.as_str())?;
        info!(
            path = %path.display(),
            validity_days = self.validity_days,
            "self-signed certificate written"
        );
        Ok(cert)
    }
}
