use serde::{Deserialize, Serialize};

use crate::error::HashError;
use crate::input::{
    normalize_password, normalize_salt, validate_salt_length, PasswordInput, SaltEncoding,
};
use crate::primitive::{Argon2Primitive, RustCryptoArgon2};

/// The Argon2 spec consists of 3 variants of the mixing function: one that
/// aims to be resistant to GPU cracking attacks (argon2d), one that aims to
/// be resistant to side-channel attacks (argon2i), and a hybrid variant that
/// aims to be resistant to both types of attacks.
///
/// Argon2id is a good default. The other variants should only be used in
/// rare cases, preferably only when a cryptography expert can validate that
/// using one of the other two is safe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// GPU-cracking attack resistant/memory-hard
    Argon2d,

    /// Side-channel attack resistant
    Argon2i,

    /// GPU-cracking attack resistant/memory-hard and side-channel attack
    /// resistant
    #[default]
    Argon2id,
}

impl Variant {
    /// The variant's name as it appears in the standard Argon2 text encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Argon2d => "argon2d",
            Variant::Argon2i => "argon2i",
            Variant::Argon2id => "argon2id",
        }
    }
}

/// The tuning parameters for a hash.
///
/// Any field left unset takes its documented default. The struct crosses
/// runtime boundaries as a JSON object with the wire names `iterations`,
/// `memory`, `parallelism`, `hashLength`, `saltEncoding`, and `mode`; a
/// missing field (or an entirely empty object) likewise takes the default.
///
/// The defaults are as follows:
///
/// * Iterations: 2
/// * Memory Cost: 32768 kibibytes (equal to 32 mebibytes)
/// * Parallelism Factor: 1 lane
/// * Hash Length: 32 bytes
/// * Salt Encoding: UTF-8
/// * Variant: Argon2id
///
/// These favor interactive latency on phone-class hardware. The more
/// resources the hashing requires, the stronger the hash; raise the memory
/// cost as high as your application can afford, then likewise raise the
/// iteration count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HashParameters {
    iterations: u32,
    #[serde(rename = "memory")]
    memory_kib: u32,
    parallelism: u32,
    hash_length: u32,
    salt_encoding: SaltEncoding,
    #[serde(rename = "mode")]
    variant: Variant,
}

impl Default for HashParameters {
    fn default() -> Self {
        Self {
            iterations: 2,
            memory_kib: 32 * 1024,
            parallelism: 1,
            hash_length: 32,
            salt_encoding: SaltEncoding::Utf8,
            variant: Variant::Argon2id,
        }
    }
}

impl HashParameters {
    /// Create a new `HashParameters` with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of passes over the memory region. Raising this slows down
    /// the hashing, which is the point. Must be at least 1.
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// The amount of memory required to compute a hash, in kibibytes. This
    /// is where a lot of the magic of Argon2 happens: a hard memory
    /// requirement makes brute-forcing infeasible even for adversaries with
    /// a lot of processing power. Must be at least 8 times the parallelism
    /// factor.
    pub fn memory_kib(mut self, memory_kib: u32) -> Self {
        self.memory_kib = memory_kib;
        self
    }

    /// The number of lanes used to fill the memory region. Must be at
    /// least 1. Aim to increase the memory cost before increasing
    /// parallelism; with a high memory cost, a single lane still provides
    /// excellent security.
    pub fn parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// The length of the raw hash, in bytes. Must be at least 4, though
    /// short hashes raise the chance of collisions; 32 bytes is plenty for
    /// any application. Note that `raw_hash` in the result is hex text and
    /// is therefore twice this many characters.
    pub fn hash_length(mut self, hash_length: u32) -> Self {
        self.hash_length = hash_length;
        self
    }

    /// How the salt text passed alongside these parameters is decoded into
    /// bytes
    pub fn salt_encoding(mut self, salt_encoding: SaltEncoding) -> Self {
        self.salt_encoding = salt_encoding;
        self
    }

    /// Which Argon2 variant to use
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    // Every constraint violation here is deterministic, so it is caught
    // before the primitive is ever invoked
    pub(crate) fn validate(&self) -> Result<(), HashError> {
        if self.iterations < 1 {
            return Err(HashError::InvalidParameters(
                "Iteration count must be at least 1",
            ));
        }

        if self.parallelism < 1 {
            return Err(HashError::InvalidParameters(
                "Parallelism factor must be at least 1",
            ));
        }

        if self.hash_length < 4 {
            return Err(HashError::InvalidParameters(
                "Hash length must be at least 4 bytes",
            ));
        }

        if (self.memory_kib as u64) < 8 * self.parallelism as u64 {
            return Err(HashError::InvalidParameters(
                "Memory cost must be at least 8 KiB per lane",
            ));
        }

        Ok(())
    }
}

/// The normalized byte buffers and validated parameters for a single hash
/// computation. Built fresh per call and discarded after use; holds password
/// and salt material, so it carries no `Debug` impl and must never be logged
/// or persisted.
pub(crate) struct CanonicalRequest {
    password: Vec<u8>,
    salt: Vec<u8>,
    params: HashParameters,
}

impl CanonicalRequest {
    /// Pure assembly; no I/O. Fails with `InvalidParameters` or
    /// `SaltTooShort` without touching the primitive.
    pub(crate) fn build(
        password: Vec<u8>,
        salt: Vec<u8>,
        params: HashParameters,
    ) -> Result<Self, HashError> {
        params.validate()?;
        validate_salt_length(&salt)?;

        Ok(Self {
            password,
            salt,
            params,
        })
    }

    /// Hands the buffers and parameters to the primitive and maps its output
    /// into a [`HashResult`]. Any error the primitive signals is wrapped in
    /// `HashingFailed`; there is no retry, because hashing is deterministic
    /// and retrying a failure cannot succeed without changing parameters.
    pub(crate) fn invoke(self, primitive: &impl Argon2Primitive) -> Result<HashResult, HashError> {
        let output = primitive
            .hash(
                self.params.variant,
                &self.password,
                &self.salt,
                self.params.iterations,
                self.params.memory_kib,
                self.params.parallelism,
                self.params.hash_length,
            )
            .map_err(|e| HashError::HashingFailed(e.into_cause()))?;

        Ok(HashResult {
            raw_hash: hex::encode(output.raw),
            encoded_hash: output.encoded,
        })
    }
}

/// The outcome of a successful hash computation
///
/// Serializes with the wire names `rawHash` and `encodedHash`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashResult {
    /// The raw hash as lowercase hex text, `2 * hash_length` characters long
    pub raw_hash: String,

    /// The self-describing Argon2 encoded form, bundling variant, version,
    /// parameters, salt, and hash (e.g.
    /// `$argon2id$v=19$m=32768,t=2,p=1$cGVwcGVyMTI$...`)
    pub encoded_hash: String,
}

/// Computes an Argon2 hash using the built-in primitive.
///
/// The password may be text or raw bytes (see [`PasswordInput`]); the salt
/// is text, decoded per the configured salt encoding and required to be at
/// least 8 bytes once decoded.
///
/// This is an expensive, blocking operation by design — its cost is
/// proportional to the configured memory and iteration counts. Do not call
/// it on a UI or event-loop thread; move it to a worker using `std::thread`
/// or your async runtime's blocking-task facility. Calls are stateless and
/// safe to run concurrently. There is no cancellation: once started, a hash
/// runs to completion or failure, so bound concurrency with a worker pool if
/// responsiveness matters.
pub fn hash(
    password: impl Into<PasswordInput>,
    salt: &str,
    params: HashParameters,
) -> Result<HashResult, HashError> {
    hash_with(&RustCryptoArgon2, password, salt, params)
}

/// Computes an Argon2 hash using an injected primitive.
///
/// The primitive is a capability object: each target platform (or test) can
/// supply its own [`Argon2Primitive`] while sharing one normalization and
/// validation pipeline, so edge-case behavior cannot drift between
/// platforms. [`hash`] is the common case and uses [`RustCryptoArgon2`].
pub fn hash_with(
    primitive: &impl Argon2Primitive,
    password: impl Into<PasswordInput>,
    salt: &str,
    params: HashParameters,
) -> Result<HashResult, HashError> {
    let password = normalize_password(password.into());
    let salt = normalize_salt(salt, params.salt_encoding)?;

    CanonicalRequest::build(password, salt, params)?.invoke(primitive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Argon2Output, PrimitiveError};
    use std::cell::Cell;

    // Records invocations instead of hashing, so pipeline tests can assert
    // what reaches the primitive (and what never does)
    struct StubPrimitive {
        calls: Cell<u32>,
        fail: bool,
    }

    impl StubPrimitive {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                fail: true,
            }
        }
    }

    impl Argon2Primitive for StubPrimitive {
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
            self.calls.set(self.calls.get() + 1);

            if self.fail {
                return Err(PrimitiveError::new("stub failure"));
            }

            assert_eq!(variant, Variant::Argon2id);
            assert_eq!(password, b"hunter2");
            assert_eq!(salt, b"pepper12");
            assert_eq!(iterations, 2);
            assert_eq!(memory_kib, 32 * 1024);
            assert_eq!(parallelism, 1);
            assert_eq!(hash_length, 32);

            Ok(Argon2Output {
                raw: vec![0xAB, 0xCD, 0xEF],
                encoded: String::from("$argon2id$stub"),
            })
        }
    }

    #[test]
    fn test_defaults() {
        let params = HashParameters::default();

        assert_eq!(params.iterations, 2);
        assert_eq!(params.memory_kib, 32768);
        assert_eq!(params.parallelism, 1);
        assert_eq!(params.hash_length, 32);
        assert_eq!(params.salt_encoding, SaltEncoding::Utf8);
        assert_eq!(params.variant, Variant::Argon2id);
    }

    #[test]
    fn test_empty_wire_config_takes_defaults() {
        let params: HashParameters = serde_json::from_str("{}").unwrap();
        assert_eq!(params, HashParameters::default());
    }

    #[test]
    fn test_wire_config_field_names() {
        let params: HashParameters = serde_json::from_str(
            r#"{
                "iterations": 3,
                "memory": 64,
                "parallelism": 2,
                "hashLength": 16,
                "saltEncoding": "hex",
                "mode": "argon2i"
            }"#,
        )
        .unwrap();

        assert_eq!(
            params,
            HashParameters::new()
                .iterations(3)
                .memory_kib(64)
                .parallelism(2)
                .hash_length(16)
                .salt_encoding(SaltEncoding::Hex)
                .variant(Variant::Argon2i)
        );
    }

    #[test]
    fn test_partial_wire_config_fills_remaining_defaults() {
        let params: HashParameters = serde_json::from_str(r#"{"iterations": 5}"#).unwrap();
        assert_eq!(params, HashParameters::new().iterations(5));
    }

    #[test]
    fn test_parameter_constraints() {
        assert!(HashParameters::new().validate().is_ok());

        for bad in [
            HashParameters::new().iterations(0),
            HashParameters::new().parallelism(0),
            HashParameters::new().hash_length(3),
            HashParameters::new().memory_kib(8).parallelism(2),
        ] {
            assert!(matches!(
                bad.validate(),
                Err(HashError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn test_memory_floor_scales_with_parallelism() {
        assert!(HashParameters::new()
            .memory_kib(16)
            .parallelism(2)
            .validate()
            .is_ok());
        assert!(HashParameters::new()
            .memory_kib(15)
            .parallelism(2)
            .validate()
            .is_err());
    }

    #[test]
    fn test_pipeline_maps_raw_bytes_to_lowercase_hex() {
        let stub = StubPrimitive::new();
        let result = hash_with(&stub, "hunter2", "pepper12", HashParameters::default()).unwrap();

        assert_eq!(result.raw_hash, "abcdef");
        assert_eq!(result.encoded_hash, "$argon2id$stub");
        assert_eq!(stub.calls.get(), 1);
    }

    #[test]
    fn test_primitive_errors_are_wrapped() {
        let stub = StubPrimitive::failing();
        let result = hash_with(&stub, "hunter2", "pepper12", HashParameters::default());

        assert!(
            matches!(result, Err(HashError::HashingFailed(ref cause)) if cause.as_str() == "stub failure")
        );
    }

    #[test]
    fn test_short_salt_never_reaches_the_primitive() {
        let stub = StubPrimitive::new();
        let result = hash_with(&stub, "hunter2", "pepper1", HashParameters::default());

        assert!(matches!(result, Err(HashError::SaltTooShort(7))));
        assert_eq!(stub.calls.get(), 0);
    }

    #[test]
    fn test_malformed_salt_never_reaches_the_primitive() {
        let stub = StubPrimitive::new();
        let params = HashParameters::new().salt_encoding(SaltEncoding::Hex);
        let result = hash_with(&stub, "hunter2", "abc", params);

        assert!(matches!(result, Err(HashError::InvalidSaltFormat(_))));
        assert_eq!(stub.calls.get(), 0);
    }

    #[test]
    fn test_invalid_parameters_never_reach_the_primitive() {
        let stub = StubPrimitive::new();
        let params = HashParameters::new().iterations(0);
        let result = hash_with(&stub, "hunter2", "pepper12", params);

        assert!(matches!(result, Err(HashError::InvalidParameters(_))));
        assert_eq!(stub.calls.get(), 0);
    }

    #[test]
    fn test_result_serializes_with_wire_names() {
        let result = HashResult {
            raw_hash: String::from("abcdef"),
            encoded_hash: String::from("$argon2id$stub"),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rawHash": "abcdef",
                "encodedHash": "$argon2id$stub",
            })
        );
    }
}
