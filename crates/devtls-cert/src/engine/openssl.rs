//! In-process [`CryptoEngine`] backed by OpenSSL.

use std::time::{SystemTime, UNIX_EPOCH};

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::ec::{Asn1Flag, EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::stack::Stack;
use openssl::x509::extension::SubjectAlternativeName;
use openssl::x509::{X509, X509NameBuilder, X509Req, X509ReqBuilder};
use tracing::debug;

use super::{CertPem, CryptoEngine, CsrPem, Curve, Digest, EngineError, KeyPem};

const X509_VERSION_3: i32 = 2; // X509 version 3 is represented by 2
const X509_REQ_VERSION_1: i32 = 0;
const SERIAL_BITS: i32 = 128;
const SECS_PER_DAY: i64 = 86_400;

/// OpenSSL-backed engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpensslEngine;

impl OpensslEngine {
    pub fn new() -> Self {
        Self
    }
}

fn curve_nid(curve: Curve) -> Nid {
    match curve {
        Curve::Secp384r1 => Nid::SECP384R1,
    }
}

fn message_digest(digest: Digest) -> MessageDigest {
    match digest {
        Digest::Sha256 => MessageDigest::sha256(),
    }
}

fn load_key(key: &KeyPem) -> Result<PKey<Private>, EngineError> {
    Ok(PKey::private_key_from_pem(key.as_bytes())?)
}

impl CryptoEngine for OpensslEngine {
    fn generate_key(&self, curve: Curve) -> Result<KeyPem, EngineError> {
        let mut group = EcGroup::from_curve_name(curve_nid(curve))?;
        // Encode the curve by OID rather than explicit parameters.
        group.set_asn1_flag(Asn1Flag::NAMED_CURVE);
        let ec_key = EcKey::generate(&group)?;
        let private_key = PKey::from_ec_key(ec_key)?;
        let pem = String::from_utf8(private_key.private_key_to_pem_pkcs8()?)?;
        debug!(%curve, "generated EC private key");
        Ok(KeyPem::new(pem))
    }

    fn build_csr(
        &self,
        subject_cn: &str,
        san_dns_names: &[String],
        digest: Digest,
        key: &KeyPem,
    ) -> Result<CsrPem, EngineError> {
        let private_key = load_key(key)?;

        let mut builder = X509ReqBuilder::new()?;
        builder.set_version(X509_REQ_VERSION_1)?;

        let mut name_builder = X509NameBuilder::new()?;
        name_builder.append_entry_by_nid(Nid::COMMONNAME, subject_cn)?;
        let subject_name = name_builder.build();
        builder.set_subject_name(&subject_name)?;
        builder.set_pubkey(&private_key)?;

        if !san_dns_names.is_empty() {
            let mut san = SubjectAlternativeName::new();
            for name in san_dns_names {
                san.dns(name);
            }
            let extension = san.build(&builder.x509v3_context(None))?;
            let mut extensions = Stack::new()?;
            extensions.push(extension)?;
            builder.add_extensions(&extensions)?;
        }

        builder.sign(&private_key, message_digest(digest))?;
        let pem = String::from_utf8(builder.build().to_pem()?)?;
        debug!(subject_cn, %digest, "built certificate signing request");
        Ok(CsrPem::new(pem))
    }

    fn self_sign(
        &self,
        csr: &CsrPem,
        key: &KeyPem,
        validity_days: u32,
        digest: Digest,
    ) -> Result<CertPem, EngineError> {
        let private_key = load_key(key)?;
        let request = X509Req::from_pem(csr.as_bytes())?;
        let request_key = request.public_key()?;

        if !request.verify(&request_key)? {
            return Err(EngineError::Rejected(
                "certificate signing request signature does not verify".into(),
            ));
        }
        if !request_key.public_eq(&private_key) {
            return Err(EngineError::Rejected(
                "certificate signing request was not made with this private key".into(),
            ));
        }

        let mut builder = X509::builder()?;
        builder.set_version(X509_VERSION_3)?;

        // Random 128-bit serial number
        let mut serial = BigNum::new()?;
        serial.rand(SERIAL_BITS, MsbOption::MAYBE_ZERO, false)?;
        let asn1_serial = serial.to_asn1_integer()?;
        builder.set_serial_number(&asn1_serial)?;

        // Self-signed: issuer and subject are both the request subject
        builder.set_subject_name(request.subject_name())?;
        builder.set_issuer_name(request.subject_name())?;

        // Both bounds come from one clock reading so the window is exact.
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| EngineError::Rejected(format!("system clock before epoch: {e}")))?
            .as_secs() as i64;
        let not_before = Asn1Time::from_unix(now as _)?;
        builder.set_not_before(&not_before)?;
        let not_after = Asn1Time::from_unix((now + i64::from(validity_days) * SECS_PER_DAY) as _)?;
        builder.set_not_after(&not_after)?;

        builder.set_pubkey(&request_key)?;

        // A request without extensions makes OpenSSL report an error here.
        if let Ok(extensions) = request.extensions() {
            for extension in extensions {
                builder.append_extension(extension)?;
            }
        }

        builder.sign(&private_key, message_digest(digest))?;
        let pem = String::from_utf8(builder.build().to_pem()?)?;
        debug!(validity_days, %digest, "self-signed certificate");
        Ok(CertPem::new(pem))
    }
}
