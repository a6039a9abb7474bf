//! Trial-decode classification of container blobs.

use der::Decode;
use p12_keystore::KeyStore;
use x509_cert::Certificate;

use crate::armor;
use crate::key::DecodedKey;
use crate::types::ContainerType;

/// Classifies a blob of PKI material. Never fails: anything that does
/// not decode as a supported container is [`ContainerType::Undefined`].
///
/// The probe order matters. PKCS#12 goes first (a bundle decodes as
/// neither key nor certificate). A blob that decodes as a private key
/// classifies as wrapped when the PKCS#8 wrapper carries the inner
/// key's public material, raw otherwise. Certificates come last.
pub fn detect_type(bytes: &[u8], password: Option<&[u8]>) -> ContainerType {
    let Ok(der_bytes) = armor::unarmor(bytes) else {
        return ContainerType::Undefined;
    };

    if is_bundle(&der_bytes, password) {
        return ContainerType::Bundle;
    }

    if let Ok(key) = DecodedKey::decode(&der_bytes, password) {
        if key.is_wrapped() {
            return ContainerType::WrappedPrivateKey;
        }
        return ContainerType::RawPrivateKey;
    }

    if Certificate::from_der(&der_bytes).is_ok() {
        return ContainerType::Certificate;
    }

    ContainerType::Undefined
}

fn is_bundle(der_bytes: &[u8], password: Option<&[u8]>) -> bool {
    // PKCS#12 passwords are text; the MAC check fails without the
    // right one, so an absent password probes with the empty string.
    let password = match password {
        Some(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => return false,
        },
        None => "",
    };
    KeyStore::from_pkcs12(der_bytes, password).is_ok()
}
