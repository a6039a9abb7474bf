//! Structural DER fixtures for unit tests.
//!
//! The values are not cryptographically valid keys; the decoders under
//! test only look at structure and field presence.

use const_oid::ObjectIdentifier;
use der::{
    Encode,
    asn1::{AnyRef, OctetString, UintRef},
};
use pkcs1::RsaPrivateKey;
use pkcs8::PrivateKeyInfo;
use sec1::{EcParameters, EcPrivateKey};
use spki::AlgorithmIdentifierRef;

use crate::algorithm::{OID_EC_PUBLIC_KEY, OID_RSA_ENCRYPTION};

const OID_NIST_P256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

pub const RSA_TEST_MODULUS: &[u8] = &[0x6d, 0x0d, 0x9b, 0x4c, 0x5f, 0x37, 0x21, 0xa9];
pub const EC_TEST_POINT: &[u8] = &[
    0x04, 0x1b, 0x2c, 0x3d, 0x4e, 0x5f, 0x60, 0x71, 0x82, 0x93, 0xa4, 0xb5, 0xc6, 0xd7, 0xe8,
    0xf9, 0x0a,
];

fn uint(bytes: &[u8]) -> UintRef<'_> {
    UintRef::new(bytes).unwrap()
}

pub fn rsa_pkcs1_key_der() -> Vec<u8> {
    RsaPrivateKey {
        modulus: uint(RSA_TEST_MODULUS),
        public_exponent: uint(&[0x01, 0x00, 0x01]),
        private_exponent: uint(&[0x23, 0x45]),
        prime1: uint(&[0x11]),
        prime2: uint(&[0x13]),
        exponent1: uint(&[0x03]),
        exponent2: uint(&[0x05]),
        coefficient: uint(&[0x02]),
        other_prime_infos: None,
    }
    .to_der()
    .unwrap()
}

pub fn ec_sec1_key_der(with_point: bool) -> Vec<u8> {
    let private_key = [0x55u8; 32];
    EcPrivateKey {
        private_key: &private_key,
        parameters: Some(EcParameters::NamedCurve(OID_NIST_P256)),
        public_key: with_point.then_some(EC_TEST_POINT),
    }
    .to_der()
    .unwrap()
}

pub fn ec_sec1_key_der_without_curve() -> Vec<u8> {
    let private_key = [0x55u8; 32];
    EcPrivateKey {
        private_key: &private_key,
        parameters: None,
        public_key: Some(EC_TEST_POINT),
    }
    .to_der()
    .unwrap()
}

pub fn rsa_pkcs8_key_der() -> Vec<u8> {
    let inner = rsa_pkcs1_key_der();
    let algorithm = AlgorithmIdentifierRef {
        oid: OID_RSA_ENCRYPTION,
        parameters: Some(AnyRef::NULL),
    };
    PrivateKeyInfo::new(algorithm, &inner).to_der().unwrap()
}

pub fn ec_pkcs8_key_der() -> Vec<u8> {
    let private_key = [0x55u8; 32];
    let inner = EcPrivateKey {
        private_key: &private_key,
        parameters: None,
        public_key: Some(EC_TEST_POINT),
    }
    .to_der()
    .unwrap();
    let parameters = EcParameters::NamedCurve(OID_NIST_P256);
    let algorithm = AlgorithmIdentifierRef {
        oid: OID_EC_PUBLIC_KEY,
        parameters: Some((&parameters).into()),
    };
    PrivateKeyInfo::new(algorithm, &inner).to_der().unwrap()
}

pub fn ed25519_pkcs8_key_der() -> Vec<u8> {
    let inner = OctetString::new(vec![0x07u8; 32])
        .unwrap()
        .to_der()
        .unwrap();
    let algorithm = AlgorithmIdentifierRef {
        oid: OID_ED25519,
        parameters: None,
    };
    PrivateKeyInfo::new(algorithm, &inner).to_der().unwrap()
}
