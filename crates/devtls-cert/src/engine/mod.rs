//! Capability interface over the cryptographic primitives.
//!
//! The lifecycle components never touch key material directly; they hand PEM
//! text to a [`CryptoEngine`] and persist whatever it returns.

mod openssl;

use std::fmt;

use thiserror::Error;

pub use self::openssl::OpensslEngine;

/// Errors reported by a crypto engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("openssl: {0}")]
    Openssl(#[from] ::openssl::error::ErrorStack),

    #[error("engine produced non UTF-8 PEM: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Rejected(String),
}

/// Elliptic curves an engine can generate keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// NIST P-384.
    Secp384r1,
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secp384r1 => f.write_str(devtls_core::KEY_CURVE_NAME),
        }
    }
}

/// Message digests used for signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digest {
    Sha256,
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => f.write_str(devtls_core::SIGNATURE_DIGEST_NAME),
        }
    }
}

macro_rules! pem_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(pem: impl Into<String>) -> Self {
                Self(pem.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(pem: String) -> Self {
                Self(pem)
            }
        }
    };
}

pem_type! {
    /// PEM-encoded private key.
    KeyPem
}

pem_type! {
    /// PEM-encoded PKCS#10 certificate signing request.
    CsrPem
}

pem_type! {
    /// PEM-encoded X.509 certificate.
    CertPem
}

impl fmt::Debug for KeyPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyPem").field(&"<redacted>").finish()
    }
}

impl fmt::Debug for CsrPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CsrPem").field(&self.0).finish()
    }
}

impl fmt::Debug for CertPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CertPem").field(&self.0).finish()
    }
}

/// Key generation, CSR construction and self-signing.
///
/// Implementations are synchronous; a slow engine blocks the calling command.
pub trait CryptoEngine {
    /// Generate a fresh private key on `curve`.
    fn generate_key(&self, curve: Curve) -> Result<KeyPem, EngineError>;

    /// Build a CSR whose subject CN is `subject_cn` and whose SAN extension
    /// lists `san_dns_names`, signed by `key` with `digest`.
    fn build_csr(
        &self,
        subject_cn: &str,
        san_dns_names: &[String],
        digest: Digest,
        key: &KeyPem,
    ) -> Result<CsrPem, EngineError>;

    /// Issue a certificate for `csr`, signed by `key` itself, valid for
    /// `validity_days` from now.
    fn self_sign(
        &self,
        csr: &CsrPem,
        key: &KeyPem,
        validity_days: u32,
        digest: Digest,
    ) -> Result<CertPem, EngineError>;
}
