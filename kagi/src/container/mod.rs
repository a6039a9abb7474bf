//! Container decoders over classified PKI blobs.
//!
//! A container owns the uploaded bytes (and the password, until
//! `parse()` consumes it) and exposes the normalization operations for
//! its detected type. Construction never fails; decode errors surface
//! from `parse()` and the accessors.

mod bundle;
mod certificate;
mod keys;

pub use bundle::BundleContainer;
pub use certificate::CertificateContainer;
pub use keys::{RawKeyContainer, WrappedKeyContainer};

use crate::algorithm::KeyAlgorithm;
use crate::detect;
use crate::error::Result;
use crate::types::ContainerType;

/// Operations every container supports.
pub trait Container {
    /// The type this container decodes.
    fn container_type(&self) -> ContainerType;

    /// Decodes the stored bytes, runs the algorithm guard, and
    /// consumes the password. Must succeed before any other accessor
    /// returns data; those fail with `Error::NotParsed` until then.
    fn parse(&mut self) -> Result<()>;

    /// Canonical DER for storage: unencrypted PKCS#8 for keys, the
    /// certificate body for certificates. Bundles cannot be
    /// re-serialized.
    fn serialize_to_der(&self) -> Result<Vec<u8>>;

    fn algorithm(&self) -> Result<KeyAlgorithm>;

    /// SHA-256 fingerprint of the public key identifier.
    fn public_key_fingerprint(&self) -> Result<String>;
}

/// A container of any detected type.
#[derive(Debug)]
pub enum AnyContainer {
    RawKey(RawKeyContainer),
    WrappedKey(WrappedKeyContainer),
    Bundle(BundleContainer),
    Certificate(CertificateContainer),
}

impl AnyContainer {
    /// Detects the container type and constructs the matching
    /// container. `Undefined` input yields `None`. Detection runs once;
    /// the detected tag is handed to the concrete container.
    pub fn by_bytes(bytes: Vec<u8>, password: Option<Vec<u8>>) -> Option<Self> {
        let detected = detect::detect_type(&bytes, password.as_deref());
        match detected {
            ContainerType::RawPrivateKey => Some(AnyContainer::RawKey(
                RawKeyContainer::with_detected(bytes, password, detected),
            )),
            ContainerType::WrappedPrivateKey => Some(AnyContainer::WrappedKey(
                WrappedKeyContainer::with_detected(bytes, password, detected),
            )),
            ContainerType::Bundle => Some(AnyContainer::Bundle(BundleContainer::with_detected(
                bytes, password, detected,
            ))),
            ContainerType::Certificate => Some(AnyContainer::Certificate(
                CertificateContainer::with_detected(bytes, detected),
            )),
            ContainerType::Undefined => None,
        }
    }
}

impl Container for AnyContainer {
    fn container_type(&self) -> ContainerType {
        match self {
            AnyContainer::RawKey(container) => container.container_type(),
            AnyContainer::WrappedKey(container) => container.container_type(),
            AnyContainer::Bundle(container) => container.container_type(),
            AnyContainer::Certificate(container) => container.container_type(),
        }
    }

    fn parse(&mut self) -> Result<()> {
        match self {
            AnyContainer::RawKey(container) => container.parse(),
            AnyContainer::WrappedKey(container) => container.parse(),
            AnyContainer::Bundle(container) => container.parse(),
            AnyContainer::Certificate(container) => container.parse(),
        }
    }

    fn serialize_to_der(&self) -> Result<Vec<u8>> {
        match self {
            AnyContainer::RawKey(container) => container.serialize_to_der(),
            AnyContainer::WrappedKey(container) => container.serialize_to_der(),
            AnyContainer::Bundle(container) => container.serialize_to_der(),
            AnyContainer::Certificate(container) => container.serialize_to_der(),
        }
    }

    fn algorithm(&self) -> Result<KeyAlgorithm> {
        match self {
            AnyContainer::RawKey(container) => container.algorithm(),
            AnyContainer::WrappedKey(container) => container.algorithm(),
            AnyContainer::Bundle(container) => container.algorithm(),
            AnyContainer::Certificate(container) => container.algorithm(),
        }
    }

    fn public_key_fingerprint(&self) -> Result<String> {
        match self {
            AnyContainer::RawKey(container) => container.public_key_fingerprint(),
            AnyContainer::WrappedKey(container) => container.public_key_fingerprint(),
            AnyContainer::Bundle(container) => container.public_key_fingerprint(),
            AnyContainer::Certificate(container) => container.public_key_fingerprint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata;

    #[test]
    fn test_by_bytes_dispatch() {
        let mut raw = AnyContainer::by_bytes(testdata::rsa_pkcs1_key_der(), None).unwrap();
        assert!(matches!(raw, AnyContainer::RawKey(_)));
        assert_eq!(ContainerType::RawPrivateKey, raw.container_type());
        raw.parse().unwrap();
        assert!(raw.public_key_fingerprint().is_ok());

        let mut wrapped = AnyContainer::by_bytes(testdata::ec_pkcs8_key_der(), None).unwrap();
        assert!(matches!(wrapped, AnyContainer::WrappedKey(_)));
        wrapped.parse().unwrap();
        assert_eq!(KeyAlgorithm::Ec, wrapped.algorithm().unwrap());
    }

    #[test]
    fn test_by_bytes_undefined() {
        assert!(AnyContainer::by_bytes(vec![0x00, 0x01], None).is_none());
        assert!(AnyContainer::by_bytes(Vec::new(), None).is_none());
    }
}
