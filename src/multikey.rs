//! # Multibase
//!
//! Self-describing text encodings: a single-character tag identifying the
//! codec is prepended to the encoded bytes.
//!
//! See <https://github.com/multiformats/multibase>.

use std::fmt::{Display, Formatter};

use crate::codec::{base16, base32, base58, base64};
use crate::{Error, Result};

/// Text encodings with a multibase tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Multibase {
    /// `f`: lowercase hex.
    Base16Lower,

    /// `F`: uppercase hex.
    Base16Upper,

    /// `b`: lowercase RFC 4648 Base32.
    Base32Lower,

    /// `B`: uppercase RFC 4648 Base32.
    Base32Upper,

    /// `z`: Bitcoin-alphabet Base58.
    #[default]
    Base58Btc,

    /// `m`: standard-alphabet Base64, unpadded.
    Base64,

    /// `u`: URL-safe Base64, unpadded.
    Base64Url,

    /// `U`: URL-safe Base64 with padding.
    Base64UrlPad,
}

impl Multibase {
    /// The tag character that prefixes text in this encoding.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Base16Lower => 'f',
            Self::Base16Upper => 'F',
            Self::Base32Lower => 'b',
            Self::Base32Upper => 'B',
            Self::Base58Btc => 'z',
            Self::Base64 => 'm',
            Self::Base64Url => 'u',
            Self::Base64UrlPad => 'U',
        }
    }

    /// Look up the encoding for a tag character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedMultibase`] for an unknown tag.
    pub fn from_prefix(prefix: char) -> Result<Self> {
        match prefix {
            'f' => Ok(Self::Base16Lower),
            'F' => Ok(Self::Base16Upper),
            'b' => Ok(Self::Base32Lower),
            'B' => Ok(Self::Base32Upper),
            'z' => Ok(Self::Base58Btc),
            'm' => Ok(Self::Base64),
            'u' => Ok(Self::Base64Url),
            'U' => Ok(Self::Base64UrlPad),
            _ => Err(Error::UnsupportedMultibase(format!("unknown multibase prefix {prefix:?}"))),
        }
    }

    /// Encode bytes without the tag.
    #[must_use]
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Base16Lower => base16::encode(bytes),
            Self::Base16Upper => base16::encode_upper(bytes),
            Self::Base32Lower => base32::encode(bytes),
            Self::Base32Upper => base32::encode_upper(bytes),
            Self::Base58Btc => base58::encode(bytes),
            Self::Base64 => base64::encode(bytes),
            Self::Base64Url => base64::encode_url(bytes),
            Self::Base64UrlPad => base64::encode_url_padded(bytes),
        }
    }

    /// Decode untagged text.
    ///
    /// # Errors
    ///
    /// Returns the inner codec's error when the text is malformed.
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Base16Lower | Self::Base16Upper => base16::decode(text),
            Self::Base32Lower => base32::decode(text),
            Self::Base32Upper => base32::decode_upper(text),
            Self::Base58Btc => base58::decode(text),
            Self::Base64 => base64::decode(text),
            Self::Base64Url => base64::decode_url(text),
            Self::Base64UrlPad => base64::decode_url_padded(text),
        }
    }
}

impl Display for Multibase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Base16Lower => "base16",
            Self::Base16Upper => "base16upper",
            Self::Base32Lower => "base32",
            Self::Base32Upper => "base32upper",
            Self::Base58Btc => "base58btc",
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
            Self::Base64UrlPad => "base64urlpad",
        };
        write!(f, "{name}")
    }
}

/// Encode bytes and prepend the encoding's multibase tag.
#[must_use]
pub fn bytes_to_multibase(bytes: &[u8], encoding: Multibase) -> String {
    let mut text = String::from(encoding.prefix());
    text.push_str(&encoding.encode(bytes));
    text
}

/// Decode multibase text, returning the encoding found and the bytes.
///
/// # Errors
///
/// Returns [`Error::UnsupportedMultibase`] when the text is empty, the tag is
/// unknown, or the payload does not decode.
pub fn decode(text: &str) -> Result<(Multibase, Vec<u8>)> {
    let mut chars = text.chars();
    let Some(prefix) = chars.next() else {
        return Err(Error::UnsupportedMultibase("empty multibase string".into()));
    };
    let encoding = Multibase::from_prefix(prefix)?;
    let bytes = encoding
        .decode(chars.as_str())
        .map_err(|e| Error::UnsupportedMultibase(format!("{encoding} payload: {e}")))?;
    Ok((encoding, bytes))
}

/// Decode multibase text to bytes.
///
/// # Errors
///
/// Returns [`Error::UnsupportedMultibase`] when the text is empty, the tag is
/// unknown, or the payload does not decode.
pub fn multibase_to_bytes(text: &str) -> Result<Vec<u8>> {
    decode(text).map(|(_, bytes)| bytes)
}
