//! Base64. The URL-safe alphabet is the default; padded and standard-alphabet
//! variants are separate functions so callers cannot mix them by accident.

use base64ct::{Base64Unpadded, Base64Url, Base64UrlUnpadded, Encoding};

use crate::{Error, Result};

/// Encode bytes as unpadded Base64URL.
#[must_use]
pub fn encode_url(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decode unpadded Base64URL. An empty string decodes to empty bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for characters outside the URL-safe
/// alphabet, including `=`.
pub fn decode_url(text: &str) -> Result<Vec<u8>> {
    Base64UrlUnpadded::decode_vec(text)
        .map_err(|e| Error::InvalidEncoding(format!("base64url: {e}")))
}

/// Encode bytes as Base64URL with `=` padding.
#[must_use]
pub fn encode_url_padded(bytes: &[u8]) -> String {
    Base64Url::encode_string(bytes)
}

/// Decode Base64URL with `=` padding.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for characters outside the URL-safe
/// alphabet or missing padding.
pub fn decode_url_padded(text: &str) -> Result<Vec<u8>> {
    Base64Url::decode_vec(text)
        .map_err(|e| Error::InvalidEncoding(format!("base64url (padded): {e}")))
}

/// Encode bytes as unpadded standard-alphabet Base64.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    Base64Unpadded::encode_string(bytes)
}

/// Decode unpadded standard-alphabet Base64.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for characters outside the standard
/// alphabet, including `=`.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    Base64Unpadded::decode_vec(text).map_err(|e| Error::InvalidEncoding(format!("base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BYTES: [u8; 13] =
        [0x8f, 0x2b, 0x7b, 0x4b, 0x9e, 0xa3, 0x38, 0x99, 0x63, 0x49, 0x05, 0x91, 0x10];

    #[test]
    fn url_unpadded() {
        assert_eq!(encode_url(&BYTES), "jyt7S56jOJljSQWREA");
        assert_eq!(decode_url("jyt7S56jOJljSQWREA").expect("should decode"), BYTES);
    }

    #[test]
    fn padding_asymmetry() {
        assert!(decode_url("jyt7S56jOJljSQWREA==").is_err());
        assert_eq!(encode_url_padded(&BYTES), "jyt7S56jOJljSQWREA==");
        assert_eq!(decode_url_padded("jyt7S56jOJljSQWREA==").expect("should decode"), BYTES);
    }

    #[test]
    fn empty() {
        assert_eq!(decode_url("").expect("should decode"), Vec::<u8>::new());
    }

    #[test]
    fn standard_alphabet() {
        let bytes = [0xfb, 0xff];
        assert_eq!(encode(&bytes), "+/8");
        assert_eq!(encode_url(&bytes), "-_8");
        assert_eq!(decode("+/8").expect("should decode"), bytes);
        assert!(decode_url("+/8").is_err());
    }
}
