use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD_NO_PAD as b64_stdnopad;
use base64::Engine;

use crate::error::HashError;
use crate::hasher::Variant;

const SUPPORTED_VERSION: u32 = argon2::Version::V0x13 as u32;

/// The parsed form of a standard Argon2 encoded hash string.
///
/// The encoded form bundles the variant, version, tuning parameters, salt,
/// and hash in one piece of text, so a stored hash can later be verified
/// with the exact inputs that produced it:
///
/// _$argon2id$v=19$m=32768,t=2,p=1$cGVwcGVyMTI$ypJ3pKxN4aWGkwMv0TOb08OIzwrfK1SZWy64vyTLKo8_
///
/// Parsing accepts the `m`/`t`/`p` parameters in any order and rejects
/// duplicates, missing parameters, and unsupported versions. `Display`
/// produces the canonical `m,t,p` ordering with unpadded standard base64,
/// which most Argon2 implementations understand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedHash {
    /// The Argon2 variant that produced the hash
    pub variant: Variant,

    /// The Argon2 version (19, i.e. 0x13)
    pub version: u32,

    /// Memory cost in kibibytes
    pub memory_kib: u32,

    /// Number of iterations
    pub iterations: u32,

    /// Parallelism factor
    pub parallelism: u32,

    /// The decoded salt bytes
    pub salt: Vec<u8>,

    /// The decoded raw hash bytes
    pub hash: Vec<u8>,
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            self.variant.as_str(),
            self.version,
            self.memory_kib,
            self.iterations,
            self.parallelism,
            b64_stdnopad.encode(&self.salt),
            b64_stdnopad.encode(&self.hash),
        )
    }
}

impl FromStr for EncodedHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('$');

        if segments.next() != Some("") {
            return Err(HashError::InvalidEncodedHash("Must begin with '$'"));
        }

        let variant = match segments.next() {
            Some("argon2d") => Variant::Argon2d,
            Some("argon2i") => Variant::Argon2i,
            Some("argon2id") => Variant::Argon2id,
            _ => return Err(HashError::InvalidEncodedHash("Unrecognized variant")),
        };

        let version: u32 = segments
            .next()
            .and_then(|seg| seg.strip_prefix("v="))
            .ok_or(HashError::InvalidEncodedHash("Missing version"))?
            .parse()
            .map_err(|_| HashError::InvalidEncodedHash("Invalid version"))?;

        if version != SUPPORTED_VERSION {
            return Err(HashError::InvalidEncodedHash("Version is unsupported"));
        }

        let params_seg = segments
            .next()
            .ok_or(HashError::InvalidEncodedHash("Missing parameters"))?;

        let mut memory_kib = None;
        let mut iterations = None;
        let mut parallelism = None;

        for pair in params_seg.split(',') {
            let (key, value) = pair
                .split_once('=')
                .ok_or(HashError::InvalidEncodedHash("Malformed parameter"))?;

            let value: u32 = value
                .parse()
                .map_err(|_| HashError::InvalidEncodedHash("Parameter is not a number"))?;

            let slot = match key {
                "m" => &mut memory_kib,
                "t" => &mut iterations,
                "p" => &mut parallelism,
                _ => return Err(HashError::InvalidEncodedHash("Unrecognized parameter")),
            };

            if slot.replace(value).is_some() {
                return Err(HashError::InvalidEncodedHash("Duplicate parameter"));
            }
        }

        let (Some(memory_kib), Some(iterations), Some(parallelism)) =
            (memory_kib, iterations, parallelism)
        else {
            return Err(HashError::InvalidEncodedHash("Missing 'm', 't', or 'p'"));
        };

        let b64_salt = segments
            .next()
            .ok_or(HashError::InvalidEncodedHash("Missing salt"))?;
        let b64_hash = segments
            .next()
            .ok_or(HashError::InvalidEncodedHash("Missing hash after salt"))?;

        if segments.next().is_some() {
            return Err(HashError::InvalidEncodedHash("Trailing '$' after hash"));
        }

        let salt = b64_stdnopad
            .decode(b64_salt)
            .map_err(|_| HashError::InvalidEncodedHash("Salt is not valid base64"))?;
        let hash = b64_stdnopad
            .decode(b64_hash)
            .map_err(|_| HashError::InvalidEncodedHash("Hash is not valid base64"))?;

        if salt.is_empty() || hash.is_empty() {
            return Err(HashError::InvalidEncodedHash("Empty salt or hash"));
        }

        Ok(Self {
            variant,
            version,
            memory_kib,
            iterations,
            parallelism,
            salt,
            hash,
        })
    }
}
