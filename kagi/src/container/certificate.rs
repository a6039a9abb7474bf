//! X.509 certificate container.

use chrono::{DateTime, Utc};
use const_oid::{AssociatedOid, ObjectIdentifier};
use der::asn1::{Ia5StringRef, PrintableStringRef, TeletexStringRef, Utf8StringRef};
use der::{Any, Decode, Encode};
use num_bigint::BigUint;
use x509_cert::Certificate;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::{BasicConstraints, SubjectAltName};
use x509_cert::name::Name;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::Time;

use super::Container;
use crate::algorithm::KeyAlgorithm;
use crate::armor;
use crate::detect;
use crate::entity;
use crate::error::{Error, Result};
use crate::fingerprint::public_key_fingerprint;
use crate::types::ContainerType;

const OID_AT_COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
const OID_AT_COUNTRY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
const OID_AT_LOCALITY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
const OID_AT_PROVINCE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
const OID_AT_ORGANIZATION: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
const OID_AT_UNIT: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");
const OID_EMAIL_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

const OID_MD5_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.4");
const OID_SHA1_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
const OID_SHA256_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
const OID_SHA384_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
const OID_SHA512_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");
const OID_SHA224_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.14");
const OID_ECDSA_WITH_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.1");
const OID_ECDSA_WITH_SHA224: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.1");
const OID_ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
const OID_ECDSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
const OID_ECDSA_WITH_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.4");

/// An X.509 certificate container.
#[derive(Debug)]
pub struct CertificateContainer {
    bytes: Vec<u8>,
    detected: ContainerType,
    cert: Option<Certificate>,
    algorithm: Option<KeyAlgorithm>,
    fingerprint: Option<String>,
}

impl CertificateContainer {
    pub fn by_bytes(bytes: Vec<u8>) -> Self {
        let detected = detect::detect_type(&bytes, None);
        Self::with_detected(bytes, detected)
    }

    pub(crate) fn with_detected(bytes: Vec<u8>, detected: ContainerType) -> Self {
        CertificateContainer {
            bytes,
            detected,
            cert: None,
            algorithm: None,
            fingerprint: None,
        }
    }

    fn cert(&self) -> Result<&Certificate> {
        self.cert.as_ref().ok_or(Error::NotParsed)
    }

    /// Builds the normalized certificate entity. Optional fields that
    /// are absent or unreadable come back empty rather than failing.
    pub fn to_public_key(&self) -> Result<entity::Certificate> {
        let cert = self.cert()?;
        let tbs = &cert.tbs_certificate;
        Ok(entity::Certificate {
            der: self.serialize_to_der()?,
            container_type: ContainerType::Certificate,
            algorithm: self.algorithm()?,
            hash_algorithm: hash_algorithm_name(&cert.signature_algorithm.oid).to_string(),
            public_key_fingerprint: self.public_key_fingerprint()?,
            serial_number: BigUint::from_bytes_be(tbs.serial_number.as_bytes()).to_string(),
            is_ca: read_is_ca(cert),
            valid_not_before: to_datetime(tbs.validity.not_before),
            valid_not_after: to_datetime(tbs.validity.not_after),
            issuer: read_subject_info(&tbs.issuer),
            subject: read_subject_info(&tbs.subject),
            domains: read_domains(cert),
        })
    }

    /// Compares public key fingerprints with a key container.
    pub fn is_cert_of<C: Container>(&self, key: &C) -> Result<bool> {
        Ok(self.public_key_fingerprint()? == key.public_key_fingerprint()?)
    }
}

impl Container for CertificateContainer {
    fn container_type(&self) -> ContainerType {
        ContainerType::Certificate
    }

    fn parse(&mut self) -> Result<()> {
        if self.detected != ContainerType::Certificate {
            return Err(Error::TypeMismatch {
                expected: ContainerType::Certificate,
                actual: self.detected,
            });
        }
        let der_bytes = armor::unarmor(&self.bytes)?;
        let cert = Certificate::from_der(&der_bytes)?;
        let spki = &cert.tbs_certificate.subject_public_key_info;
        let algorithm = KeyAlgorithm::from_oid(&spki.algorithm.oid)?;
        let identifier = public_key_identifier(algorithm, spki)?;
        self.fingerprint = Some(public_key_fingerprint(&identifier));
        self.algorithm = Some(algorithm);
        self.cert = Some(cert);
        Ok(())
    }

    fn serialize_to_der(&self) -> Result<Vec<u8>> {
        Ok(self.cert()?.to_der()?)
    }

    fn algorithm(&self) -> Result<KeyAlgorithm> {
        self.algorithm.ok_or(Error::NotParsed)
    }

    fn public_key_fingerprint(&self) -> Result<String> {
        self.fingerprint.clone().ok_or(Error::NotParsed)
    }
}

/// The certificate-side identifier uses the same conversions as the
/// key side, so fingerprints of a matching pair compare equal.
fn public_key_identifier(
    algorithm: KeyAlgorithm,
    spki: &SubjectPublicKeyInfoOwned,
) -> Result<String> {
    let key_bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::MissingPublicPoint)?;
    match algorithm {
        KeyAlgorithm::Rsa => {
            let public = pkcs1::RsaPublicKey::from_der(key_bytes)?;
            Ok(BigUint::from_bytes_be(public.modulus.as_bytes()).to_string())
        }
        KeyAlgorithm::Ec => Ok(hex::encode_upper(key_bytes)),
    }
}

fn hash_algorithm_name(oid: &ObjectIdentifier) -> &'static str {
    if *oid == OID_MD5_WITH_RSA {
        "md5"
    } else if *oid == OID_SHA1_WITH_RSA || *oid == OID_ECDSA_WITH_SHA1 {
        "sha1"
    } else if *oid == OID_SHA224_WITH_RSA || *oid == OID_ECDSA_WITH_SHA224 {
        "sha224"
    } else if *oid == OID_SHA256_WITH_RSA || *oid == OID_ECDSA_WITH_SHA256 {
        "sha256"
    } else if *oid == OID_SHA384_WITH_RSA || *oid == OID_ECDSA_WITH_SHA384 {
        "sha384"
    } else if *oid == OID_SHA512_WITH_RSA || *oid == OID_ECDSA_WITH_SHA512 {
        "sha512"
    } else {
        ""
    }
}

fn to_datetime(time: Time) -> Option<DateTime<Utc>> {
    let duration = time.to_unix_duration();
    DateTime::from_timestamp(duration.as_secs() as i64, duration.subsec_nanos())
}

fn attribute_string(value: &Any) -> Option<String> {
    if let Ok(s) = PrintableStringRef::try_from(value) {
        return Some(s.to_string());
    }
    if let Ok(s) = Utf8StringRef::try_from(value) {
        return Some(s.to_string());
    }
    if let Ok(s) = Ia5StringRef::try_from(value) {
        return Some(s.to_string());
    }
    if let Ok(s) = TeletexStringRef::try_from(value) {
        return Some(s.to_string());
    }
    None
}

fn read_subject_info(name: &Name) -> entity::SubjectInfo {
    let mut info = entity::SubjectInfo::default();
    for rdn in name.0.iter() {
        for atv in rdn.0.iter() {
            let Some(value) = attribute_string(&atv.value) else {
                continue;
            };
            if atv.oid == OID_AT_COMMON_NAME {
                info.common_name = value;
            } else if atv.oid == OID_AT_ORGANIZATION {
                info.organization = value;
            } else if atv.oid == OID_AT_UNIT {
                info.unit = value;
            } else if atv.oid == OID_AT_LOCALITY {
                info.locality = value;
            } else if atv.oid == OID_AT_PROVINCE {
                info.province = value;
            } else if atv.oid == OID_AT_COUNTRY {
                info.country = value;
            } else if atv.oid == OID_EMAIL_ADDRESS {
                info.email = value;
            }
        }
    }
    info
}

fn read_is_ca(cert: &Certificate) -> bool {
    let Some(extensions) = &cert.tbs_certificate.extensions else {
        return false;
    };
    for ext in extensions {
        if ext.extn_id != BasicConstraints::OID {
            continue;
        }
        if let Ok(constraints) = BasicConstraints::from_der(ext.extn_value.as_bytes()) {
            return constraints.ca;
        }
    }
    false
}

fn read_domains(cert: &Certificate) -> Vec<entity::Domain> {
    let mut domains = Vec::new();
    let Some(extensions) = &cert.tbs_certificate.extensions else {
        return domains;
    };
    for ext in extensions {
        if ext.extn_id != SubjectAltName::OID {
            continue;
        }
        let Ok(san) = SubjectAltName::from_der(ext.extn_value.as_bytes()) else {
            continue;
        };
        for general_name in san.0 {
            if let GeneralName::DnsName(dns) = general_name {
                domains.push(entity::Domain::new(dns.to_string()));
            }
        }
    }
    domains
}
