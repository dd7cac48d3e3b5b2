use std::fmt;

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::{alphabet, Engine};
use serde::{Deserialize, Serialize};

use crate::error::HashError;

/// The minimum salt length accepted, in decoded bytes
pub const MIN_SALT_LEN: usize = 8;

// Standard alphabet, no line wrapping. Callers hand us salts produced by all
// kinds of tooling, so padding may be present or absent.
const B64_SALT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A password supplied by the caller, either as text or as raw bytes.
///
/// Most applications will pass a string, but binary passwords (e.g. a key
/// wrapped by a PIN, or bytes produced by another KDF) are first-class:
/// hashing `Text(s)` and hashing `Bytes` containing the UTF-8 encoding of
/// `s` produce identical results.
///
/// `From` impls are provided for the common string and byte types, so
/// functions taking `impl Into<PasswordInput>` accept `&str`, `String`,
/// `&[u8]`, `Vec<u8>`, and byte arrays directly.
#[derive(Clone)]
pub enum PasswordInput {
    /// A text password, hashed as its UTF-8 encoding
    Text(String),

    /// An arbitrary binary password, hashed as-is
    Bytes(Vec<u8>),
}

impl From<&str> for PasswordInput {
    fn from(password: &str) -> Self {
        Self::Text(password.to_owned())
    }
}

impl From<String> for PasswordInput {
    fn from(password: String) -> Self {
        Self::Text(password)
    }
}

impl From<&[u8]> for PasswordInput {
    fn from(password: &[u8]) -> Self {
        Self::Bytes(password.to_vec())
    }
}

impl From<Vec<u8>> for PasswordInput {
    fn from(password: Vec<u8>) -> Self {
        Self::Bytes(password)
    }
}

impl<const SIZE: usize> From<&[u8; SIZE]> for PasswordInput {
    fn from(password: &[u8; SIZE]) -> Self {
        Self::Bytes(password.to_vec())
    }
}

impl fmt::Debug for PasswordInput {
    // Password material must never end up in logs via {:?}
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordInput::Text(_) => f.write_str("PasswordInput::Text(<redacted>)"),
            PasswordInput::Bytes(_) => f.write_str("PasswordInput::Bytes(<redacted>)"),
        }
    }
}

impl TryFrom<&serde_json::Value> for PasswordInput {
    type Error = HashError;

    /// Converts a dynamically-typed value arriving from a runtime bridge. A
    /// JSON string becomes [`PasswordInput::Text`] and an array of integers
    /// in `0..=255` becomes [`PasswordInput::Bytes`]; any other shape is
    /// rejected with [`HashError::InvalidInputFormat`] before any hashing
    /// work is attempted.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(s) => Ok(PasswordInput::Text(s.clone())),
            serde_json::Value::Array(items) => {
                let mut bytes = Vec::with_capacity(items.len());

                for item in items {
                    let byte = item
                        .as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or(HashError::InvalidInputFormat)?;
                    bytes.push(byte);
                }

                Ok(PasswordInput::Bytes(bytes))
            }
            _ => Err(HashError::InvalidInputFormat),
        }
    }
}

/// How the salt text is converted to bytes before hashing
///
/// The salt always crosses the API boundary as text; this enum declares how
/// that text is decoded. The minimum-length rule is applied to the decoded
/// bytes, never to the text itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaltEncoding {
    /// The UTF-8 encoding of the text is used directly as the salt
    #[default]
    Utf8,

    /// The text is case-insensitive hex, with an optional `0x` prefix
    Hex,

    /// The text is standard base64 (no line wrapping); padding is optional
    Base64,
}

/// Converts a password input into the canonical byte buffer fed to the
/// primitive. Text becomes its UTF-8 encoding; bytes pass through unchanged.
///
/// The returned buffer is owned and does not alias caller storage, so
/// password material cannot change underfoot mid-hash.
pub fn normalize_password(input: PasswordInput) -> Vec<u8> {
    match input {
        PasswordInput::Text(s) => s.into_bytes(),
        PasswordInput::Bytes(b) => b,
    }
}

/// Decodes salt text under the declared encoding.
///
/// Decoding happens before any length validation; the length rule is always
/// applied to the bytes this function returns.
pub fn normalize_salt(text: &str, encoding: SaltEncoding) -> Result<Vec<u8>, HashError> {
    match encoding {
        SaltEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
        SaltEncoding::Base64 => B64_SALT
            .decode(text)
            .map_err(|_| HashError::InvalidSaltFormat("Salt is not valid base64")),
        SaltEncoding::Hex => {
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);

            hex::decode(digits).map_err(|e| match e {
                hex::FromHexError::OddLength => {
                    HashError::InvalidSaltFormat("Hex salt has an odd number of digits")
                }
                _ => HashError::InvalidSaltFormat("Salt contains a non-hex character"),
            })
        }
    }
}

/// Checks the decoded salt against the 8-byte minimum.
///
/// This is the authoritative length check. It must always run on the decoded
/// bytes; checking the encoded text length instead under- or over-counts
/// depending on the encoding.
pub fn validate_salt_length(salt: &[u8]) -> Result<(), HashError> {
    if salt.len() < MIN_SALT_LEN {
        return Err(HashError::SaltTooShort(salt.len()));
    }

    Ok(())
}

/// Upper bound on the decoded byte length of `text`, without decoding it.
///
/// Used as a fast path to reject hopelessly short salts before decoding.
/// Because this is an upper bound, it can never reject a salt the decoded
/// check would accept (unpadded base64 in particular decodes to more bytes
/// than a padded-length estimate suggests). It is not a substitute for
/// [`validate_salt_length`].
pub fn estimated_salt_len(text: &str, encoding: SaltEncoding) -> usize {
    match encoding {
        SaltEncoding::Utf8 => text.len(),
        // A possible 0x prefix makes this overshoot by one byte, which is fine
        // for an upper bound
        SaltEncoding::Hex => text.len() / 2,
        SaltEncoding::Base64 => text.len() * 3 / 4,
    }
}
