use thiserror::Error;

use crate::types::ContainerType;

#[derive(Debug, Error)]
pub enum Error {
    #[error("PEM error: {0}")]
    Pem(#[from] kagi_pem::error::Error),

    #[error("ASN.1 error: {0}")]
    Asn1(#[from] der::Error),

    #[error("PKCS#8 error: {0}")]
    Pkcs8(#[from] pkcs8::Error),

    #[error("PKCS#12 error: {0}")]
    Pkcs12(#[from] p12_keystore::error::Error),

    /// The algorithm guard accepts RSA and EC keys only.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A decode-dependent operation was called before `parse()`.
    #[error("container is not parsed yet")]
    NotParsed,

    #[error("container type mismatch: expected {expected}, detected {actual}")]
    TypeMismatch {
        expected: ContainerType,
        actual: ContainerType,
    },

    #[error("a password is required to decrypt this container")]
    MissingPassword,

    #[error("password is not valid UTF-8")]
    NonUtf8Password,

    #[error("bundle carries no private key")]
    MissingPrivateKey,

    #[error("bundle carries no certificate")]
    MissingCertificate,

    /// The key exposes no public material to fingerprint (e.g. an EC
    /// key without its embedded public point).
    #[error("private key carries no public key material")]
    MissingPublicPoint,

    #[error("EC key does not name its curve")]
    MissingNamedCurve,

    #[error("unrecognized private key format")]
    UnrecognizedKeyFormat,

    #[error("{operation} is not supported for {container_type} containers")]
    UnsupportedOperation {
        operation: &'static str,
        container_type: ContainerType,
    },

    /// The input looks PEM-armored but is not valid UTF-8 text.
    #[error("armored input is not valid UTF-8 text")]
    ArmorNotText,
}

pub type Result<T> = std::result::Result<T, Error>;
