//! Recording engine and log capture for unit tests.

use std::cell::RefCell;
use std::io;
use std::sync::{Arc, Mutex};

use crate::engine::{CertPem, CryptoEngine, CsrPem, Curve, Digest, EngineError, KeyPem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    GenerateKey(Curve),
    BuildCsr {
        subject_cn: String,
        san_dns_names: Vec<String>,
        digest: Digest,
    },
    SelfSign {
        validity_days: u32,
        digest: Digest,
    },
}

/// Returns canned PEM text and records every call. Optionally fails the
/// n-th call (0-based).
#[derive(Default)]
pub(crate) struct RecordingEngine {
    calls: RefCell<Vec<Call>>,
    fail_at: Option<usize>,
}

impl RecordingEngine {
    pub(crate) fn failing_at(call: usize) -> Self {
        Self {
            calls: RefCell::default(),
            fail_at: Some(call),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<usize, EngineError> {
        let mut calls = self.calls.borrow_mut();
        let index = calls.len();
        calls.push(call);
        if self.fail_at == Some(index) {
            return Err(EngineError::Rejected(format!("call {index} rejected")));
        }
        Ok(index)
    }
}

impl CryptoEngine for RecordingEngine {
    fn generate_key(&self, curve: Curve) -> Result<KeyPem, EngineError> {
        let n = self.record(Call::GenerateKey(curve))?;
        Ok(KeyPem::new(format!("KEY {n}")))
    }

    fn build_csr(
        &self,
        subject_cn: &str,
        san_dns_names: &[String],
        digest: Digest,
        key: &KeyPem,
    ) -> Result<CsrPem, EngineError> {
        let n = self.record(Call::BuildCsr {
            subject_cn: subject_cn.to_string(),
            san_dns_names: san_dns_names.to_vec(),
            digest,
        })?;
        Ok(CsrPem::new(format!("CSR {n} for {subject_cn} by {}", key.as_str())))
    }

    fn self_sign(
        &self,
        csr: &CsrPem,
        key: &KeyPem,
        validity_days: u32,
        digest: Digest,
    ) -> Result<CertPem, EngineError> {
        let n = self.record(Call::SelfSign {
            validity_days,
            digest,
        })?;
        Ok(CertPem::new(format!(
            "CERT {n} from [{}] by {}",
            csr.as_str(),
            key.as_str()
        )))
    }
}

/// Shared buffer the fmt layer writes into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a thread-local subscriber and return the WARN-and-above
/// events it emitted, without ANSI colors.
pub(crate) fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (out, logs)
}
