use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Classification of a PKI container blob.
///
/// The serialized form matches the legacy storage tags, so entities
/// round-trip against records written by earlier deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerType {
    /// PKCS#1 RSA or SEC1 EC private key without a PKCS#8 wrapper
    #[serde(rename = "PKCS1")]
    RawPrivateKey,
    /// PKCS#8-wrapped private key, optionally encrypted
    #[serde(rename = "PKCS8")]
    WrappedPrivateKey,
    /// PKCS#12 bundle of one private key and its certificates
    #[serde(rename = "PKCS12")]
    Bundle,
    /// X.509 certificate
    #[serde(rename = "X509")]
    Certificate,
    /// Not recognized as any supported container
    #[serde(rename = "UNDEFINED")]
    Undefined,
}

impl ContainerType {
    /// Legacy storage tag for this type. `Undefined` has none.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            ContainerType::RawPrivateKey => Some("PKCS1"),
            ContainerType::WrappedPrivateKey => Some("PKCS8"),
            ContainerType::Bundle => Some("PKCS12"),
            ContainerType::Certificate => Some("X509"),
            ContainerType::Undefined => None,
        }
    }
}

impl Display for ContainerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().unwrap_or("UNDEFINED"))
    }
}
