//! Container-type detection and normalization for PKI material.
//!
//! Uploaded blobs (PEM or DER) are classified as one of the supported
//! container types, decoded, and normalized into storable entities
//! with stable public key fingerprints:
//!
//! - raw private keys (PKCS#1 RSA, SEC1 EC)
//! - wrapped private keys (PKCS#8, optionally encrypted)
//! - PKCS#12 bundles of one key and its certificates
//! - X.509 certificates
//!
//! [`detect_type`] classifies without failing; [`AnyContainer::by_bytes`]
//! constructs the matching container, whose `parse()` decodes the
//! bytes and enforces the RSA/EC algorithm guard.

pub mod algorithm;
mod armor;
pub mod container;
pub mod detect;
pub mod entity;
pub mod error;
pub mod fingerprint;
pub mod key;
pub mod types;

#[cfg(test)]
pub(crate) mod testdata;

pub use algorithm::KeyAlgorithm;
pub use container::{
    AnyContainer, BundleContainer, CertificateContainer, Container, RawKeyContainer,
    WrappedKeyContainer,
};
pub use detect::detect_type;
pub use error::{Error, Result};
pub use fingerprint::public_key_fingerprint;
pub use types::ContainerType;
