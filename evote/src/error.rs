use crate::*;

use thiserror::Error;
use uuid::Uuid;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("evote: randomness source failure: {0}")]
    RandomnessFailure(#[from] rand_core::Error),

    #[error("evote: malformed encoding - expected {expected} bytes, found {found}")]
    MalformedEncoding { expected: usize, found: usize },

    #[error("evote: scalar is not below the field modulus")]
    FieldRangeError,

    #[error("evote: encoded point is not on the curve")]
    InvalidGroupElement,

    #[error("evote: proof verification failed: {0}")]
    ProofInvalid(&'static str),

    #[error("evote: plaintext {0} is not a yes/no vote")]
    UnsupportedPlaintext(i64),

    #[error("evote: discrete log not found below bound {bound}")]
    DecodeFailed { bound: u64 },

    #[error("evote: decryption bound {bound} exceeds the supported maximum of {max}")]
    BoundTooLarge { bound: u64, max: u64 },

    #[error("evote: public key does not match secret key")]
    MismatchedKeyPair,

    #[error("evote: invalid hexadecimal: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("evote: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("evote: unknown capability {0}")]
    UnknownCapability(Uuid),

    #[error("evote: a capability with id {0} has already been registered")]
    DuplicateCapability(Uuid),

    #[error("evote: {found} arguments provided, but capability requires {expected}")]
    WrongArgumentCount { expected: usize, found: usize },
}

/// Election state-machine errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("evote validation: wrong phase - expected {expected:?}, election is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("evote validation: {0}")]
    ProofFailed(#[from] Error),
}

/// Fail with `MalformedEncoding` unless `bytes` is exactly `expected` long
pub(crate) fn check_len(bytes: &[u8], expected: usize) -> Result<(), Error> {
    if bytes.len() != expected {
        return Err(Error::MalformedEncoding {
            expected,
            found: bytes.len(),
        });
    }
    Ok(())
}
