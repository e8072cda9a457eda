//! Private key generation.

use tracing::{info, warn};

use crate::engine::{CryptoEngine, Curve, KeyPem};
use crate::error::CertError;
use crate::store::{ArtifactKind, ArtifactStore};

/// Produces the private key artifact.
///
/// There are no preconditions: any existing key is replaced according to the
/// store's overwrite policy. Replacing a key orphans any certificate and CSR
/// already on disk, which is logged but not prevented.
pub struct KeyGenerator<'a, E: ?Sized> {
    store: &'a ArtifactStore,
    engine: &'a E,
}

impl<'a, E: CryptoEngine + ?Sized> KeyGenerator<'a, E> {
    pub fn new(store: &'a ArtifactStore, engine: &'a E) -> Self {
        Self { store, engine }
    }

    pub fn generate(&self) -> Result<KeyPem, CertError> {
        let replacing = self.store.exists(ArtifactKind::Key);
        let key = self.engine.generate_key(Curve::Secp384r1)?;
        let path = self.store.write(ArtifactKind::Key, key.as_str())?;

        if replacing {
            for kind in [ArtifactKind::Certificate, ArtifactKind::Request] {
                if self.store.exists(kind) {
                    warn!(
                        artifact = %kind,
                        path = %self.store.path(kind).display(),
                        "private key replaced; existing artifact no longer matches it"
                    );
                }
            }
        }
        info!(path = %path.display(), curve = %Curve::Secp384r1, "private key written");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LifecycleState, OverwritePolicy};
    use crate::testing::{Call, RecordingEngine, capture_warnings};

    #[test]
    fn generates_from_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let engine = RecordingEngine::default();

        let key = KeyGenerator::new(&store, &engine).generate().unwrap();

        assert_eq!(key.as_str(), "KEY 0");
        assert_eq!(engine.calls(), vec![Call::GenerateKey(Curve::Secp384r1)]);
        assert_eq!(store.state(), LifecycleState::KeyOnly);
    }

    #[test]
    fn regenerating_keeps_other_artifacts_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.write(ArtifactKind::Key, "old key").unwrap();
        store.write(ArtifactKind::Request, "old csr").unwrap();
        store.write(ArtifactKind::Certificate, "old cert").unwrap();
        let engine = RecordingEngine::default();

        KeyGenerator::new(&store, &engine).generate().unwrap();

        assert_eq!(store.read(ArtifactKind::Key).unwrap(), "KEY 0");
        assert_eq!(store.read(ArtifactKind::Request).unwrap(), "old csr");
        assert_eq!(store.read(ArtifactKind::Certificate).unwrap(), "old cert");
        assert_eq!(store.state(), LifecycleState::Full);
    }

    #[test]
    fn regenerating_warns_about_each_orphan() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.write(ArtifactKind::Key, "old key").unwrap();
        store.write(ArtifactKind::Request, "old csr").unwrap();
        store.write(ArtifactKind::Certificate, "old cert").unwrap();
        let engine = RecordingEngine::default();

        let (result, logs) = capture_warnings(|| KeyGenerator::new(&store, &engine).generate());

        result.unwrap();
        let warnings: Vec<&str> = logs.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 2, "{logs}");
        assert!(warnings.iter().any(|l| l.contains("tls.crt")), "{logs}");
        assert!(warnings.iter().any(|l| l.contains("tls.csr")), "{logs}");
        assert!(logs.contains("no longer matches"));
    }

    #[test]
    fn regenerating_with_only_key_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.write(ArtifactKind::Key, "old key").unwrap();
        let engine = RecordingEngine::default();

        let (result, logs) = capture_warnings(|| KeyGenerator::new(&store, &engine).generate());

        result.unwrap();
        assert_eq!(logs, "");
    }

    #[test]
    fn first_key_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let engine = RecordingEngine::default();

        let (result, logs) = capture_warnings(|| KeyGenerator::new(&store, &engine).generate());

        result.unwrap();
        assert_eq!(logs, "");
    }

    #[test]
    fn refuse_policy_blocks_regeneration() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).with_policy(OverwritePolicy::Refuse);
        store.write(ArtifactKind::Key, "old key").unwrap();
        let engine = RecordingEngine::default();

        let err = KeyGenerator::new(&store, &engine).generate().unwrap_err();

        assert!(matches!(err, CertError::AlreadyExists { .. }));
        assert_eq!(store.read(ArtifactKind::Key).unwrap(), "old key");
    }

    #[test]
    fn engine_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let engine = RecordingEngine::failing_at(0);

        let err = KeyGenerator::new(&store, &engine).generate().unwrap_err();

        assert!(matches!(err, CertError::Engine(_)));
        assert_eq!(store.state(), LifecycleState::Empty);
    }
}
