//! Certificate signing request construction.

use tracing::info;

use crate::engine::{CryptoEngine, CsrPem, Digest, KeyPem};
use crate::error::CertError;
use crate::store::{ArtifactKind, ArtifactStore};

/// Produces the CSR artifact for one domain, signed by the existing key.
pub struct RequestBuilder<'a, E: ?Sized> {
    store: &'a ArtifactStore,
    engine: &'a E,
}

impl<'a, E: CryptoEngine + ?Sized> RequestBuilder<'a, E> {
    pub fn new(store: &'a ArtifactStore, engine: &'a E) -> Self {
        Self { store, engine }
    }

    /// Build a CSR with subject CN `domain` and a SAN of exactly `DNS:<domain>`.
    ///
    /// The domain is taken verbatim; it is not checked to be a hostname.
    /// Fails without writing anything when the domain is empty or the key
    /// artifact is missing.
    pub fn build(&self, domain: &str) -> Result<CsrPem, CertError> {
        require_domain(domain)?;
        let key_path = self.store.path(ArtifactKind::Key);
        if !self.store.exists(ArtifactKind::Key) {
            return Err(CertError::MissingKey { path: key_path });
        }
        let key = KeyPem::new(self.store.read(ArtifactKind::Key)?);

        let csr = self
            .engine
            .build_csr(domain, &[domain.to_string()], Digest::Sha256, &key)?;
        let path = self.store.write(ArtifactKind::Request, csr.as_str())?;
        info!(path = %path.display(), domain, "certificate signing request written");
        Ok(csr)
    }
}

pub(crate) fn require_domain(domain: &str) -> Result<(), CertError> {
    if domain.is_empty() {
        return Err(CertError::Usage("a non-empty <domain> is required".into()));
    }
    Ok(())
}
