#![deny(missing_docs)]

//! A library for normalizing and validating the inputs of
//! [Argon2](https://en.wikipedia.org/wiki/Argon2) password hashing across a
//! runtime boundary. Argon2 is a memory-hard
//! [key derivation function](https://en.wikipedia.org/wiki/Key_derivation_function)
//! and was the winner of the
//! [Password Hashing Competition](https://www.password-hashing.net).
//!
//! Runtimes that bridge hashing to per-platform Argon2 implementations tend
//! to grow three subtly different answers to the same questions: how a
//! password given as text or raw bytes becomes the canonical byte buffer,
//! how a salt given as UTF-8, hex, or base64 text is decoded, and where the
//! minimum-salt-length rule is enforced. This crate answers those questions
//! once. The Argon2 computation itself is delegated to an external
//! primitive — by default the audited pure-Rust
//! [argon2 crate](https://docs.rs/argon2/latest/argon2/) — injected behind
//! the [`Argon2Primitive`] trait, so every platform shares one pipeline:
//! validate, normalize, build the request, invoke the primitive, map the
//! result.
//!
//! Every call is independent and stateless, and nothing here caches or
//! deduplicates identical requests — recomputing the work factor every time
//! is the point of Argon2.
//!
//! # Examples
//!
//! Hash a password with the default parameters (Argon2id, 2 iterations,
//! 32 MiB of memory, a 32-byte hash):
//!
//! ```rust
//! use argon2_bridge::{hash, HashParameters};
//!
//! let result = hash("hunter2", "pepper12", HashParameters::default()).unwrap();
//!
//! assert_eq!(result.raw_hash.len(), 64); // 32 bytes as hex
//! assert!(result.encoded_hash.starts_with("$argon2id$"));
//! ```
//!
//! Change the tuning parameters and pass the salt as hex:
//!
//! ```rust
//! use argon2_bridge::{hash, HashParameters, SaltEncoding, Variant};
//!
//! let params = HashParameters::new()
//!     .variant(Variant::Argon2i)
//!     .iterations(3)
//!     .memory_kib(256)
//!     .parallelism(2)
//!     .hash_length(16)
//!     .salt_encoding(SaltEncoding::Hex);
//!
//! let result = hash("hunter2", "0xDEADBEEF01020304", params).unwrap();
//!
//! assert_eq!(result.raw_hash.len(), 32);
//! assert!(result.encoded_hash.starts_with("$argon2i$"));
//! ```
//!
//! Hash a binary password; bytes hash identically to the text they encode:
//!
//! ```rust
//! use argon2_bridge::{hash, HashParameters};
//!
//! let params = HashParameters::new().memory_kib(256);
//!
//! let from_text = hash("secret", "pepper12", params).unwrap();
//! let from_bytes = hash("secret".as_bytes(), "pepper12", params).unwrap();
//!
//! assert_eq!(from_text.raw_hash, from_bytes.raw_hash);
//! ```
//!
//! Accept a configuration record from a dynamically-typed boundary; missing
//! fields take their documented defaults:
//!
//! ```rust
//! use argon2_bridge::HashParameters;
//!
//! let params: HashParameters =
//!     serde_json::from_str(r#"{"iterations": 3, "mode": "argon2id"}"#).unwrap();
//! ```
//!
//! Parse an encoded hash back into its parts:
//!
//! ```rust
//! use argon2_bridge::{hash, EncodedHash, HashParameters};
//! use std::str::FromStr;
//!
//! let result = hash("hunter2", "pepper12", HashParameters::new().memory_kib(256)).unwrap();
//! let parsed = EncodedHash::from_str(&result.encoded_hash).unwrap();
//!
//! assert_eq!(parsed.salt, b"pepper12");
//! assert_eq!(parsed.memory_kib, 256);
//! ```
//!
//! Hashing is an expensive, blocking operation by design. Do not run it on
//! a UI or event-loop thread; move it to a worker using `std::thread` or
//! your async runtime's blocking-task facility. Calls are safe to run
//! concurrently.

mod encoded;
mod error;
mod hasher;
mod input;
mod primitive;

pub use encoded::EncodedHash;
pub use error::HashError;
pub use hasher::{hash, hash_with, HashParameters, HashResult, Variant};
pub use input::{
    estimated_salt_len, normalize_password, normalize_salt, validate_salt_length, PasswordInput,
    SaltEncoding, MIN_SALT_LEN,
};
pub use primitive::{Argon2Output, Argon2Primitive, PrimitiveError, RustCryptoArgon2};
