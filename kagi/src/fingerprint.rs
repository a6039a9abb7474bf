use sha2::{Digest, Sha256};

/// SHA-256 fingerprint over a public key identifier string.
///
/// The digest is rendered as uppercase hex with a colon between byte
/// pairs and no trailing colon, 95 characters in total. The identifier
/// is the decimal modulus for RSA keys and the uppercase-hex encoded
/// public point for EC keys; key-side and certificate-side containers
/// feed the same identifier, so equal fingerprints mean a matching
/// pair.
pub fn public_key_fingerprint(identifier: &str) -> String {
    let digest = Sha256::digest(identifier.as_bytes());
    digest
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}
