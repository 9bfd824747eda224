//! # Codecs
//!
//! Byte-array to text transforms. All functions are pure: encoders are total
//! and decoders fail with a typed [`Error`](crate::Error) rather than
//! guessing past malformed input.
//!
//! | Codec | Empty input decodes to |
//! |---|---|
//! | [`base16`] | empty bytes |
//! | [`base32`] | error |
//! | [`base64`] (unpadded) | empty bytes |
//! | [`base58`] | empty bytes |

pub mod base16;
pub mod base32;
pub mod base64;
pub mod base58;
