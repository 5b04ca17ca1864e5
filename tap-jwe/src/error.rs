//! Error handling for TAP JWE
//!
//! This module provides error types and utilities for JWE key wrapping.

use thiserror::Error;

/// Type alias for Results with TAP JWE errors
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for TAP JWE
#[derive(Error, Debug)]
pub enum Error {
    /// The algorithm identifier is unknown or not handled by this key wrapper
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The header names a different key management algorithm than the wrapper
    #[error("Algorithm mismatch: header declares {header}, key is bound to {expected}")]
    AlgorithmMismatch {
        /// Value of the `alg` header parameter
        header: String,
        /// Algorithm the wrapper was constructed with
        expected: String,
    },

    /// The underlying cipher rejected the key, parameters or input
    #[error("Cipher failure: {0}")]
    CipherFailure(String),

    /// The cipher returned fewer bytes than the authentication tag length
    #[error("Truncated cipher output: {0} bytes is shorter than the authentication tag")]
    TruncatedOutput(usize),

    /// The secure random number generator failed
    #[error("Randomness error: {0}")]
    Randomness(String),

    /// A header parameter required for unwrapping is absent
    #[error("Missing header parameter: {0}")]
    MissingHeader(String),

    /// A header parameter is present but malformed
    #[error("Invalid header parameter {name}: {reason}")]
    InvalidHeader {
        /// Name of the header parameter
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Authentication tag verification failed while unwrapping
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Error related to invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
