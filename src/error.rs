use std::fmt;

/// Errors that may occur when normalizing inputs or computing a hash
///
/// Every variant is deterministic for a given input; retrying a failed call
/// without changing the inputs or parameters cannot succeed.
#[derive(Debug)]
pub enum HashError {
    /// The password was supplied in a shape that is neither text nor a binary
    /// sequence. Only produced at a dynamically-typed boundary (e.g. when
    /// converting from a JSON value); the typed API cannot construct one.
    InvalidInputFormat,

    /// The salt text could not be decoded under the declared encoding
    /// (malformed hex or base64)
    InvalidSaltFormat(&'static str),

    /// The decoded salt is shorter than the 8-byte minimum. Carries the
    /// decoded byte length, never the salt itself.
    SaltTooShort(usize),

    /// A tuning parameter violates its constraint (e.g. zero iterations)
    InvalidParameters(&'static str),

    /// The underlying Argon2 primitive signaled an error. The cause message
    /// is preserved for diagnostics.
    HashingFailed(String),

    /// An encoded hash string could not be parsed as the standard Argon2
    /// text encoding
    InvalidEncodedHash(&'static str),
}

impl std::error::Error for HashError {}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::InvalidInputFormat => {
                write!(f, "Argon2: Invalid password input format")
            }
            HashError::InvalidSaltFormat(msg) => {
                write!(f, "Argon2: Invalid salt format: {}", msg)
            }
            HashError::SaltTooShort(len) => {
                write!(
                    f,
                    "Argon2: Salt must be at least 8 bytes long, got {} bytes",
                    len
                )
            }
            HashError::InvalidParameters(msg) => {
                write!(f, "Argon2: Invalid parameter: {}", msg)
            }
            HashError::HashingFailed(cause) => {
                write!(f, "Argon2: Failed to generate hash: {}", cause)
            }
            HashError::InvalidEncodedHash(msg) => {
                write!(f, "Argon2: Invalid encoded hash: {}", msg)
            }
        }
    }
}
