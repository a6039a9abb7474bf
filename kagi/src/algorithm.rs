use const_oid::ObjectIdentifier;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// rsaEncryption (RFC 8017)
pub const OID_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// id-ecPublicKey (RFC 5480)
pub const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// Public key algorithm of a container.
///
/// Only RSA and EC material passes the guard; everything else is
/// rejected with [`Error::UnsupportedAlgorithm`] before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAlgorithm {
    Rsa,
    Ec,
}

impl KeyAlgorithm {
    /// Returns the lowercase algorithm tag.
    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "rsa",
            KeyAlgorithm::Ec => "ec",
        }
    }

    /// Returns the key algorithm OID.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            KeyAlgorithm::Rsa => OID_RSA_ENCRYPTION,
            KeyAlgorithm::Ec => OID_EC_PUBLIC_KEY,
        }
    }

    /// Accepts the tags `rsa` and `ec`, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rsa" => Ok(KeyAlgorithm::Rsa),
            "ec" => Ok(KeyAlgorithm::Ec),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }

    pub fn from_oid(oid: &ObjectIdentifier) -> Result<Self> {
        if *oid == OID_RSA_ENCRYPTION {
            Ok(KeyAlgorithm::Rsa)
        } else if *oid == OID_EC_PUBLIC_KEY {
            Ok(KeyAlgorithm::Ec)
        } else {
            Err(Error::UnsupportedAlgorithm(oid.to_string()))
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
