// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during cryptographic operations.
///
/// Failure to gather system randomness has no variant here: `OsRng` panics
/// when the operating system cannot supply entropy, and that panic is left
/// to abort the requesting thread.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A wire value could not be converted into the expected type.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Plaintext must lie in `[0, n)` for the target public key.
    #[error("Plaintext out of range: must lie in [0, n)")]
    PlaintextOutOfRange,

    /// A sampling interval whose upper bound is below its lower bound.
    #[error("Empty sample range: upper bound is below lower bound")]
    EmptyRange,

    /// A bit length too small for the requested draw or prime search.
    #[error("Bit length too short: must be at least {min} bits, got {actual}")]
    BitLengthTooShort { min: usize, actual: usize },

    /// The value shares a factor with the modulus, so no inverse exists.
    #[error("No modular inverse exists for this value")]
    NoInverse,

    /// The request named an operation this crate does not implement.
    #[error("unknown op")]
    UnknownOp,

    /// A required request parameter was absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,
}

pub type Result<T> = std::result::Result<T, Error>;
