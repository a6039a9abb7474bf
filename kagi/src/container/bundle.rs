//! PKCS#12 bundle decomposition.
//!
//! A bundle holds one private key chain and zero or more standalone
//! certificates. Decomposed parts are routed back through the key and
//! certificate containers, so a bundle never re-implements their
//! normalization.

use p12_keystore::{KeyStore, KeyStoreEntry};
use zeroize::Zeroizing;

use super::Container;
use super::certificate::CertificateContainer;
use super::keys::WrappedKeyContainer;
use crate::algorithm::KeyAlgorithm;
use crate::armor;
use crate::detect;
use crate::entity;
use crate::error::{Error, Result};
use crate::fingerprint::public_key_fingerprint;
use crate::key::DecodedKey;
use crate::types::ContainerType;

/// A PKCS#12 bundle container.
#[derive(Debug)]
pub struct BundleContainer {
    bytes: Vec<u8>,
    password: Option<Zeroizing<Vec<u8>>>,
    detected: ContainerType,
    parsed: Option<ParsedBundle>,
}

#[derive(Debug)]
struct ParsedBundle {
    /// Canonical unencrypted PKCS#8 DER of the bundled key
    key_der: Vec<u8>,
    /// The key's entity certificate (first chain element)
    main_cert_der: Vec<u8>,
    /// Rest of the chain, then standalone certificate entries
    further_cert_ders: Vec<Vec<u8>>,
    algorithm: KeyAlgorithm,
    fingerprint: String,
}

impl BundleContainer {
    pub fn by_bytes(bytes: Vec<u8>, password: Option<Vec<u8>>) -> Self {
        let detected = detect::detect_type(&bytes, password.as_deref());
        Self::with_detected(bytes, password, detected)
    }

    pub(crate) fn with_detected(
        bytes: Vec<u8>,
        password: Option<Vec<u8>>,
        detected: ContainerType,
    ) -> Self {
        BundleContainer {
            bytes,
            password: password.map(Zeroizing::new),
            detected,
            parsed: None,
        }
    }

    fn parsed(&self) -> Result<&ParsedBundle> {
        self.parsed.as_ref().ok_or(Error::NotParsed)
    }

    /// The bundled private key, normalized through the wrapped-key
    /// container.
    pub fn to_private_key(&self) -> Result<entity::PrivateKey> {
        let mut container = WrappedKeyContainer::by_bytes(self.parsed()?.key_der.clone(), None);
        container.parse()?;
        container.to_private_key()
    }

    /// The key's entity certificate, normalized through the
    /// certificate container.
    pub fn to_public_key(&self) -> Result<entity::Certificate> {
        certificate_entity(&self.parsed()?.main_cert_der)
    }

    /// Remaining chain certificates and standalone certificate
    /// entries, in encoded order.
    pub fn further_publics(&self) -> Result<Vec<entity::Certificate>> {
        self.parsed()?
            .further_cert_ders
            .iter()
            .map(|der_bytes| certificate_entity(der_bytes))
            .collect()
    }
}

fn certificate_entity(der_bytes: &[u8]) -> Result<entity::Certificate> {
    let mut container = CertificateContainer::by_bytes(der_bytes.to_vec());
    container.parse()?;
    container.to_public_key()
}

impl Container for BundleContainer {
    fn container_type(&self) -> ContainerType {
        ContainerType::Bundle
    }

    fn parse(&mut self) -> Result<()> {
        // The password is wiped when parsing ends, success or not.
        let password = self.password.take();
        if self.detected != ContainerType::Bundle {
            return Err(Error::TypeMismatch {
                expected: ContainerType::Bundle,
                actual: self.detected,
            });
        }
        let der_bytes = armor::unarmor(&self.bytes)?;
        let password_text = match &password {
            Some(bytes) => std::str::from_utf8(bytes).map_err(|_| Error::NonUtf8Password)?,
            None => "",
        };
        let keystore = KeyStore::from_pkcs12(&der_bytes, password_text)?;
        let (_, chain) = keystore
            .private_key_chain()
            .ok_or(Error::MissingPrivateKey)?;

        let mut cert_ders: Vec<Vec<u8>> = chain
            .chain()
            .iter()
            .map(|cert| cert.as_der().to_vec())
            .collect();
        if cert_ders.is_empty() {
            return Err(Error::MissingCertificate);
        }
        let main_cert_der = cert_ders.remove(0);
        for (_, entry) in keystore.entries() {
            if let KeyStoreEntry::Certificate(cert) = entry {
                cert_ders.push(cert.as_der().to_vec());
            }
        }

        let decoded = DecodedKey::decode(chain.key(), None)?;
        let algorithm = decoded.require_algorithm()?;
        let fingerprint = public_key_fingerprint(&decoded.identifier_string()?);
        self.parsed = Some(ParsedBundle {
            key_der: decoded.into_pkcs8_der(),
            main_cert_der,
            further_cert_ders: cert_ders,
            algorithm,
            fingerprint,
        });
        Ok(())
    }

    /// Bundles are decomposed, never re-serialized.
    fn serialize_to_der(&self) -> Result<Vec<u8>> {
        Err(Error::UnsupportedOperation {
            operation: "serialize_to_der",
            container_type: ContainerType::Bundle,
        })
    }

    fn algorithm(&self) -> Result<KeyAlgorithm> {
        Ok(self.parsed()?.algorithm)
    }

    fn public_key_fingerprint(&self) -> Result<String> {
        Ok(self.parsed()?.fingerprint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata;

    #[test]
    fn test_type_mismatch() {
        let mut container = BundleContainer::by_bytes(testdata::rsa_pkcs8_key_der(), None);
        let err = container.parse().unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: ContainerType::Bundle,
                actual: ContainerType::WrappedPrivateKey,
            }
        ));
    }

    #[test]
    fn test_serialize_is_unsupported() {
        let container = BundleContainer::by_bytes(vec![0x30, 0x00], None);
        let err = container.serialize_to_der().unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedOperation {
                operation: "serialize_to_der",
                container_type: ContainerType::Bundle,
            }
        ));
    }

    #[test]
    fn test_accessors_before_parse() {
        let container = BundleContainer::by_bytes(vec![0x30, 0x00], None);
        assert!(matches!(
            container.algorithm().unwrap_err(),
            Error::NotParsed
        ));
        assert!(matches!(
            container.to_private_key().unwrap_err(),
            Error::NotParsed
        ));
        assert!(matches!(
            container.further_publics().unwrap_err(),
            Error::NotParsed
        ));
    }
}
