//! Normalized value objects handed to the persistence layer.
//!
//! Entities are plain serializable data: no passwords, no parsing
//! state, no references back into the containers that produced them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::KeyAlgorithm;
use crate::types::ContainerType;

/// A normalized private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    pub algorithm: KeyAlgorithm,
    /// Canonical unencrypted PKCS#8 DER
    pub der: Vec<u8>,
    pub container_type: ContainerType,
    pub public_key_fingerprint: String,
}

/// A normalized certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub der: Vec<u8>,
    pub container_type: ContainerType,
    pub algorithm: KeyAlgorithm,
    /// Digest name from the signature algorithm, e.g. `"sha256"`.
    /// Empty when the signature algorithm is not recognized.
    pub hash_algorithm: String,
    pub public_key_fingerprint: String,
    /// Decimal serial number
    pub serial_number: String,
    pub is_ca: bool,
    pub valid_not_before: Option<DateTime<Utc>>,
    pub valid_not_after: Option<DateTime<Utc>>,
    pub issuer: SubjectInfo,
    pub subject: SubjectInfo,
    /// subjectAltName DNS entries, in encoded order
    pub domains: Vec<Domain>,
}

impl Certificate {
    /// A certificate and a private key pair iff their public key
    /// fingerprints are equal.
    pub fn is_cert_of(&self, key: &PrivateKey) -> bool {
        self.public_key_fingerprint == key.public_key_fingerprint
    }
}

/// Distinguished name fields. Absent attributes stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub common_name: String,
    pub organization: String,
    pub unit: String,
    pub locality: String,
    pub province: String,
    pub country: String,
    pub email: String,
}

/// One subjectAltName DNS entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain(pub String);

impl Domain {
    pub fn new(value: impl Into<String>) -> Self {
        Domain(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
