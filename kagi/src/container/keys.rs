//! The two private-key containers.
//!
//! Raw (PKCS#1/SEC1) and wrapped (PKCS#8) keys share their decode
//! path; the containers differ only in the type tag they enforce and
//! persist.

use zeroize::Zeroizing;

use super::Container;
use crate::algorithm::KeyAlgorithm;
use crate::armor;
use crate::detect;
use crate::entity;
use crate::error::{Error, Result};
use crate::fingerprint::public_key_fingerprint;
use crate::key::DecodedKey;
use crate::types::ContainerType;

#[derive(Debug)]
struct KeyInner {
    bytes: Vec<u8>,
    password: Option<Zeroizing<Vec<u8>>>,
    detected: ContainerType,
    expected: ContainerType,
    decoded: Option<DecodedKey>,
    fingerprint: Option<String>,
}

impl KeyInner {
    fn new(
        bytes: Vec<u8>,
        password: Option<Vec<u8>>,
        detected: ContainerType,
        expected: ContainerType,
    ) -> Self {
        KeyInner {
            bytes,
            password: password.map(Zeroizing::new),
            detected,
            expected,
            decoded: None,
            fingerprint: None,
        }
    }

    fn parse(&mut self) -> Result<()> {
        // The password is wiped when parsing ends, success or not.
        let password = self.password.take();
        if self.detected != self.expected {
            return Err(Error::TypeMismatch {
                expected: self.expected,
                actual: self.detected,
            });
        }
        let der_bytes = armor::unarmor(&self.bytes)?;
        let decoded = DecodedKey::decode(&der_bytes, password.as_deref().map(Vec::as_slice))?;
        decoded.require_algorithm()?;
        let identifier = decoded.identifier_string()?;
        self.fingerprint = Some(public_key_fingerprint(&identifier));
        self.decoded = Some(decoded);
        Ok(())
    }

    fn decoded(&self) -> Result<&DecodedKey> {
        self.decoded.as_ref().ok_or(Error::NotParsed)
    }

    fn algorithm(&self) -> Result<KeyAlgorithm> {
        self.decoded()?.require_algorithm()
    }

    fn fingerprint(&self) -> Result<String> {
        self.fingerprint.clone().ok_or(Error::NotParsed)
    }

    fn serialize_to_der(&self) -> Result<Vec<u8>> {
        Ok(self.decoded()?.pkcs8_der().to_vec())
    }

    fn to_private_key(&self) -> Result<entity::PrivateKey> {
        Ok(entity::PrivateKey {
            algorithm: self.algorithm()?,
            der: self.serialize_to_der()?,
            container_type: self.expected,
            public_key_fingerprint: self.fingerprint()?,
        })
    }
}

/// A PKCS#1 RSA or SEC1 EC private key without a PKCS#8 wrapper.
#[derive(Debug)]
pub struct RawKeyContainer(KeyInner);

impl RawKeyContainer {
    pub fn by_bytes(bytes: Vec<u8>, password: Option<Vec<u8>>) -> Self {
        let detected = detect::detect_type(&bytes, password.as_deref());
        Self::with_detected(bytes, password, detected)
    }

    pub(crate) fn with_detected(
        bytes: Vec<u8>,
        password: Option<Vec<u8>>,
        detected: ContainerType,
    ) -> Self {
        RawKeyContainer(KeyInner::new(
            bytes,
            password,
            detected,
            ContainerType::RawPrivateKey,
        ))
    }

    pub fn to_private_key(&self) -> Result<entity::PrivateKey> {
        self.0.to_private_key()
    }
}

impl Container for RawKeyContainer {
    fn container_type(&self) -> ContainerType {
        ContainerType::RawPrivateKey
    }

    fn parse(&mut self) -> Result<()> {
        self.0.parse()
    }

    fn serialize_to_der(&self) -> Result<Vec<u8>> {
        self.0.serialize_to_der()
    }

    fn algorithm(&self) -> Result<KeyAlgorithm> {
        self.0.algorithm()
    }

    fn public_key_fingerprint(&self) -> Result<String> {
        self.0.fingerprint()
    }
}

/// A PKCS#8-wrapped private key, optionally encrypted.
#[derive(Debug)]
pub struct WrappedKeyContainer(KeyInner);

impl WrappedKeyContainer {
    pub fn by_bytes(bytes: Vec<u8>, password: Option<Vec<u8>>) -> Self {
        let detected = detect::detect_type(&bytes, password.as_deref());
        Self::with_detected(bytes, password, detected)
    }

    pub(crate) fn with_detected(
        bytes: Vec<u8>,
        password: Option<Vec<u8>>,
        detected: ContainerType,
    ) -> Self {
        WrappedKeyContainer(KeyInner::new(
            bytes,
            password,
            detected,
            ContainerType::WrappedPrivateKey,
        ))
    }

    pub fn to_private_key(&self) -> Result<entity::PrivateKey> {
        self.0.to_private_key()
    }
}

impl Container for WrappedKeyContainer {
    fn container_type(&self) -> ContainerType {
        ContainerType::WrappedPrivateKey
    }

    fn parse(&mut self) -> Result<()> {
        self.0.parse()
    }

    fn serialize_to_der(&self) -> Result<Vec<u8>> {
        self.0.serialize_to_der()
    }

    fn algorithm(&self) -> Result<KeyAlgorithm> {
        self.0.algorithm()
    }

    fn public_key_fingerprint(&self) -> Result<String> {
        self.0.fingerprint()
    }
}
