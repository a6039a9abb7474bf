//! Unified private-key decoding.
//!
//! A private key blob can arrive in any of three structural formats:
//! PKCS#1 (RSA only), SEC1 (EC only), or PKCS#8 (a wrapper around
//! either, optionally encrypted with a password). [`DecodedKey`]
//! decodes all of them behind one entry point and re-encodes the
//! result as canonical unencrypted PKCS#8 for storage.

use const_oid::ObjectIdentifier;
use der::{Decode, Encode, asn1::AnyRef};
use num_bigint::BigUint;
use pkcs1::RsaPrivateKey;
use pkcs8::{EncryptedPrivateKeyInfo, PrivateKeyInfo};
use sec1::{EcParameters, EcPrivateKey};
use spki::AlgorithmIdentifierRef;

use crate::algorithm::{KeyAlgorithm, OID_EC_PUBLIC_KEY, OID_RSA_ENCRYPTION};
use crate::error::{Error, Result};

/// Structural format a private key blob arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// PKCS#1 `RSAPrivateKey`
    Pkcs1,
    /// SEC1 `ECPrivateKey`
    Sec1,
    /// PKCS#8 `PrivateKeyInfo`
    Pkcs8,
}

/// Public key material carried inside a private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIdentifier {
    /// RSA modulus, big-endian
    RsaModulus(Vec<u8>),
    /// Encoded EC public point
    EcPoint(Vec<u8>),
}

/// A structurally decoded private key.
#[derive(Debug, Clone)]
pub struct DecodedKey {
    format: KeyFormat,
    algorithm: Option<KeyAlgorithm>,
    algorithm_oid: ObjectIdentifier,
    identifier: Option<KeyIdentifier>,
    pkcs8_der: Vec<u8>,
}

impl DecodedKey {
    /// Decodes a DER private key in any of the supported formats.
    ///
    /// An encrypted PKCS#8 blob requires the password and is decrypted
    /// before structural decoding. The plain formats are tried in
    /// order: PKCS#8, PKCS#1, SEC1 (the three have disjoint leading
    /// fields, so the first match is the only match).
    pub fn decode(der_bytes: &[u8], password: Option<&[u8]>) -> Result<Self> {
        if let Ok(encrypted) = EncryptedPrivateKeyInfo::from_der(der_bytes) {
            let password = password.ok_or(Error::MissingPassword)?;
            let document = encrypted.decrypt(password)?;
            return Self::decode_plain(document.as_bytes());
        }
        Self::decode_plain(der_bytes)
    }

    fn decode_plain(der_bytes: &[u8]) -> Result<Self> {
        if let Ok(info) = PrivateKeyInfo::from_der(der_bytes) {
            return Self::from_pkcs8(&info);
        }
        if let Ok(rsa) = RsaPrivateKey::from_der(der_bytes) {
            return Self::from_pkcs1(&rsa);
        }
        if let Ok(ec) = EcPrivateKey::from_der(der_bytes) {
            return Self::from_sec1(&ec);
        }
        Err(Error::UnrecognizedKeyFormat)
    }

    fn from_pkcs8(info: &PrivateKeyInfo<'_>) -> Result<Self> {
        let oid = info.algorithm.oid;
        let (algorithm, identifier) = if oid == OID_RSA_ENCRYPTION {
            let rsa = RsaPrivateKey::from_der(info.private_key)?;
            (
                Some(KeyAlgorithm::Rsa),
                Some(KeyIdentifier::RsaModulus(rsa.modulus.as_bytes().to_vec())),
            )
        } else if oid == OID_EC_PUBLIC_KEY {
            let ec = EcPrivateKey::from_der(info.private_key)?;
            let point = ec.public_key.map(|p| KeyIdentifier::EcPoint(p.to_vec()));
            (Some(KeyAlgorithm::Ec), point)
        } else {
            (None, None)
        };
        Ok(DecodedKey {
            format: KeyFormat::Pkcs8,
            algorithm,
            algorithm_oid: oid,
            identifier,
            pkcs8_der: info.to_der()?,
        })
    }

    fn from_pkcs1(rsa: &RsaPrivateKey<'_>) -> Result<Self> {
        let key_der = rsa.to_der()?;
        let algorithm = AlgorithmIdentifierRef {
            oid: OID_RSA_ENCRYPTION,
            parameters: Some(AnyRef::NULL),
        };
        let pkcs8_der = PrivateKeyInfo::new(algorithm, &key_der).to_der()?;
        Ok(DecodedKey {
            format: KeyFormat::Pkcs1,
            algorithm: Some(KeyAlgorithm::Rsa),
            algorithm_oid: OID_RSA_ENCRYPTION,
            identifier: Some(KeyIdentifier::RsaModulus(rsa.modulus.as_bytes().to_vec())),
            pkcs8_der,
        })
    }

    fn from_sec1(ec: &EcPrivateKey<'_>) -> Result<Self> {
        let curve = ec
            .parameters
            .and_then(EcParameters::named_curve)
            .ok_or(Error::MissingNamedCurve)?;
        let parameters = EcParameters::NamedCurve(curve);
        let key_der = ec.to_der()?;
        let algorithm = AlgorithmIdentifierRef {
            oid: OID_EC_PUBLIC_KEY,
            parameters: Some((&parameters).into()),
        };
        let pkcs8_der = PrivateKeyInfo::new(algorithm, &key_der).to_der()?;
        Ok(DecodedKey {
            format: KeyFormat::Sec1,
            algorithm: Some(KeyAlgorithm::Ec),
            algorithm_oid: OID_EC_PUBLIC_KEY,
            identifier: ec.public_key.map(|p| KeyIdentifier::EcPoint(p.to_vec())),
            pkcs8_der,
        })
    }

    pub fn format(&self) -> KeyFormat {
        self.format
    }

    pub fn algorithm(&self) -> Option<KeyAlgorithm> {
        self.algorithm
    }

    /// A wrapped key is a PKCS#8 blob whose inner key exposes public
    /// material (the RSA modulus or the EC public point).
    pub fn is_wrapped(&self) -> bool {
        self.format == KeyFormat::Pkcs8 && self.identifier.is_some()
    }

    /// The algorithm guard: anything but RSA or EC is rejected.
    pub fn require_algorithm(&self) -> Result<KeyAlgorithm> {
        self.algorithm
            .ok_or_else(|| Error::UnsupportedAlgorithm(self.algorithm_oid.to_string()))
    }

    /// Identifier string fed into the fingerprint function: the
    /// decimal modulus for RSA, the uppercase-hex public point for EC.
    pub fn identifier_string(&self) -> Result<String> {
        match &self.identifier {
            Some(KeyIdentifier::RsaModulus(bytes)) => Ok(BigUint::from_bytes_be(bytes).to_string()),
            Some(KeyIdentifier::EcPoint(bytes)) => Ok(hex::encode_upper(bytes)),
            None => Err(Error::MissingPublicPoint),
        }
    }

    /// Canonical unencrypted PKCS#8 DER of this key.
    pub fn pkcs8_der(&self) -> &[u8] {
        &self.pkcs8_der
    }

    pub fn into_pkcs8_der(self) -> Vec<u8> {
        self.pkcs8_der
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::testdata;

    #[rstest(
        der_bytes,
        expected_format,
        expected_wrapped,
        case(testdata::rsa_pkcs1_key_der(), KeyFormat::Pkcs1, false),
        case(testdata::ec_sec1_key_der(true), KeyFormat::Sec1, false),
        case(testdata::ec_sec1_key_der(false), KeyFormat::Sec1, false),
        case(testdata::rsa_pkcs8_key_der(), KeyFormat::Pkcs8, true),
        case(testdata::ec_pkcs8_key_der(), KeyFormat::Pkcs8, true),
        case(testdata::ed25519_pkcs8_key_der(), KeyFormat::Pkcs8, false)
    )]
    fn test_decode_formats(der_bytes: Vec<u8>, expected_format: KeyFormat, expected_wrapped: bool) {
        let key = DecodedKey::decode(&der_bytes, None).unwrap();
        assert_eq!(expected_format, key.format());
        assert_eq!(expected_wrapped, key.is_wrapped());
    }

    #[test]
    fn test_decode_garbage() {
        let err = DecodedKey::decode(&[0x30, 0x03, 0x02, 0x01, 0x05], None).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedKeyFormat));
    }

    #[test]
    fn test_rsa_identifier_is_decimal_modulus() {
        let key = DecodedKey::decode(&testdata::rsa_pkcs1_key_der(), None).unwrap();
        let expected = BigUint::from_bytes_be(testdata::RSA_TEST_MODULUS).to_string();
        assert_eq!(expected, key.identifier_string().unwrap());
        assert_eq!(Some(KeyAlgorithm::Rsa), key.algorithm());
    }

    #[test]
    fn test_ec_identifier_is_hex_point() {
        let key = DecodedKey::decode(&testdata::ec_sec1_key_der(true), None).unwrap();
        let expected = hex::encode_upper(testdata::EC_TEST_POINT);
        assert_eq!(expected, key.identifier_string().unwrap());
        assert_eq!(Some(KeyAlgorithm::Ec), key.algorithm());
    }

    #[test]
    fn test_ec_key_without_point_has_no_identifier() {
        let key = DecodedKey::decode(&testdata::ec_sec1_key_der(false), None).unwrap();
        let err = key.identifier_string().unwrap_err();
        assert!(matches!(err, Error::MissingPublicPoint));
    }

    #[test]
    fn test_unsupported_algorithm_guard() {
        let key = DecodedKey::decode(&testdata::ed25519_pkcs8_key_der(), None).unwrap();
        let err = key.require_algorithm().unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(_)));
    }

    #[rstest(
        der_bytes,
        case(testdata::rsa_pkcs1_key_der()),
        case(testdata::ec_sec1_key_der(true))
    )]
    fn test_raw_keys_normalize_to_pkcs8(der_bytes: Vec<u8>) {
        let key = DecodedKey::decode(&der_bytes, None).unwrap();
        let normalized = DecodedKey::decode(key.pkcs8_der(), None).unwrap();
        assert_eq!(KeyFormat::Pkcs8, normalized.format());
        assert!(normalized.is_wrapped());
        assert_eq!(
            key.identifier_string().unwrap(),
            normalized.identifier_string().unwrap()
        );
    }

    #[test]
    fn test_wrapped_key_reencodes_unchanged() {
        let der_bytes = testdata::rsa_pkcs8_key_der();
        let key = DecodedKey::decode(&der_bytes, None).unwrap();
        assert_eq!(der_bytes, key.pkcs8_der());
    }

    #[test]
    fn test_sec1_without_curve_is_rejected() {
        let err = DecodedKey::decode(&testdata::ec_sec1_key_der_without_curve(), None).unwrap_err();
        assert!(matches!(err, Error::MissingNamedCurve));
    }
}
