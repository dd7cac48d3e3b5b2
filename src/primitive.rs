use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};

use crate::encoded::EncodedHash;
use crate::hasher::Variant;

/// An error signaled by an Argon2 primitive. Carries only a diagnostic
/// message; the inputs that produced it are never included.
#[derive(Debug)]
pub struct PrimitiveError(String);

impl PrimitiveError {
    /// Wraps a diagnostic message describing the primitive-level fault
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }

    pub(crate) fn into_cause(self) -> String {
        self.0
    }
}

impl std::error::Error for PrimitiveError {}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argon2 primitive error: {}", self.0)
    }
}

/// What an Argon2 primitive produces: the raw hash bytes and the primitive's
/// own standard Argon2 text encoding of the hash
pub struct Argon2Output {
    /// The raw hash, exactly `hash_length` bytes
    pub raw: Vec<u8>,

    /// The self-describing encoded form
    /// (`$argon2<variant>$v=<version>$m=..,t=..,p=..$<b64 salt>$<b64 hash>`)
    pub encoded: String,
}

/// The external Argon2 implementation, injected as a capability object.
///
/// The normalization and validation pipeline is shared; only this seam
/// differs per target platform, which keeps edge-case behavior from
/// drifting between platforms. Implementations must be safe to invoke
/// concurrently from multiple threads with independent inputs, must be
/// deterministic for identical inputs, and are handed buffers and
/// parameters that have already passed validation.
pub trait Argon2Primitive {
    /// Computes the hash for pre-validated inputs, or signals a
    /// primitive-level fault (allocation failure, unsupported parameter
    /// combination, and so on)
    #[allow(clippy::too_many_arguments)]
    fn hash(
        &self,
        variant: Variant,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        memory_kib: u32,
        parallelism: u32,
        hash_length: u32,
    ) -> Result<Argon2Output, PrimitiveError>;
}

/// The built-in primitive, backed by the pure-Rust RustCrypto `argon2`
/// implementation (Argon2 version 0x13). Stateless; a single instance may
/// be shared freely across threads.
pub struct RustCryptoArgon2;

impl Argon2Primitive for RustCryptoArgon2 {
    fn hash(
        &self,
        variant: Variant,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        memory_kib: u32,
        parallelism: u32,
        hash_length: u32,
    ) -> Result<Argon2Output, PrimitiveError> {
        let algorithm = match variant {
            Variant::Argon2d => Algorithm::Argon2d,
            Variant::Argon2i => Algorithm::Argon2i,
            Variant::Argon2id => Algorithm::Argon2id,
        };

        let params = Params::new(memory_kib, iterations, parallelism, Some(hash_length as usize))
            .map_err(|e| PrimitiveError::new(e.to_string()))?;

        let argon2 = Argon2::new(algorithm, Version::V0x13, params);

        let mut raw = vec![0u8; hash_length as usize];
        argon2
            .hash_password_into(password, salt, &mut raw)
            .map_err(|e| PrimitiveError::new(e.to_string()))?;

        let encoded = EncodedHash {
            variant,
            version: Version::V0x13 as u32,
            memory_kib,
            iterations,
            parallelism,
            salt: salt.to_vec(),
            hash: raw.clone(),
        }
        .to_string();

        Ok(Argon2Output { raw, encoded })
    }
}
