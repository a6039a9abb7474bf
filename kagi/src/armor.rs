//! PEM armor handling in front of the DER decoders.

use std::str::FromStr;

use kagi_pem::Pem;

use crate::error::{Error, Result};

const BOUNDARY_MARK: &[u8] = b"-----BEGIN";

pub(crate) fn looks_armored(bytes: &[u8]) -> bool {
    bytes
        .windows(BOUNDARY_MARK.len())
        .any(|window| window == BOUNDARY_MARK)
}

/// Strips PEM armor when present; DER input passes through untouched.
/// Multi-block input yields the first block.
pub(crate) fn unarmor(bytes: &[u8]) -> Result<Vec<u8>> {
    if !looks_armored(bytes) {
        return Ok(bytes.to_vec());
    }
    let text = std::str::from_utf8(bytes).map_err(|_| Error::ArmorNotText)?;
    let pem = Pem::from_str(text)?;
    Ok(pem.into_contents())
}

#[cfg(test)]
mod tests {
    use kagi_pem::Label;
    use rstest::rstest;

    use super::*;

    #[rstest(
        input,
        expected,
        case(b"0\x03\x02\x01\x05".to_vec(), b"0\x03\x02\x01\x05".to_vec()),
        case(
            Pem::new(Label::Certificate, vec![1, 2, 3]).to_string().into_bytes(),
            vec![1, 2, 3]
        )
    )]
    fn test_unarmor(input: Vec<u8>, expected: Vec<u8>) {
        assert_eq!(expected, unarmor(&input).unwrap());
    }

    #[test]
    fn test_unarmor_first_block() {
        let text = format!(
            "{}\n{}",
            Pem::new(Label::Certificate, vec![1, 2, 3]),
            Pem::new(Label::Certificate, vec![4, 5, 6])
        );
        assert_eq!(vec![1, 2, 3], unarmor(text.as_bytes()).unwrap());
    }

    #[test]
    fn test_unarmor_rejects_binary_with_boundary() {
        let mut bytes = b"-----BEGIN CERTIFICATE-----\n".to_vec();
        bytes.push(0xff);
        let err = unarmor(&bytes).unwrap_err();
        assert!(matches!(err, Error::ArmorNotText));
    }
}
