//! JWE key management algorithm identifiers
//!
//! The AES symmetric key-wrap family from RFC 7518 Section 4.4 and 4.7.
//! Only the GCM variants are implemented by this crate; the plain AES Key
//! Wrap tokens are recognised so they can be rejected by name.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JWE algorithm identifier (for key encryption with a shared symmetric key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyAlgorithm {
    /// AES Key Wrap with 128-bit key
    A128Kw,
    /// AES Key Wrap with 192-bit key
    A192Kw,
    /// AES Key Wrap with 256-bit key
    A256Kw,
    /// AES-GCM key wrap with 128-bit key
    A128GcmKw,
    /// AES-GCM key wrap with 192-bit key
    A192GcmKw,
    /// AES-GCM key wrap with 256-bit key
    A256GcmKw,
}

impl KeyAlgorithm {
    /// The AES-GCM key wrap identifiers
    pub const GCM_KW: [KeyAlgorithm; 3] = [
        KeyAlgorithm::A128GcmKw,
        KeyAlgorithm::A192GcmKw,
        KeyAlgorithm::A256GcmKw,
    ];

    /// Returns the algorithm identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::A128Kw => "A128KW",
            KeyAlgorithm::A192Kw => "A192KW",
            KeyAlgorithm::A256Kw => "A256KW",
            KeyAlgorithm::A128GcmKw => "A128GCMKW",
            KeyAlgorithm::A192GcmKw => "A192GCMKW",
            KeyAlgorithm::A256GcmKw => "A256GCMKW",
        }
    }

    /// Required key encryption key length in bytes
    pub fn key_len(&self) -> usize {
        match self {
            KeyAlgorithm::A128Kw | KeyAlgorithm::A128GcmKw => 16,
            KeyAlgorithm::A192Kw | KeyAlgorithm::A192GcmKw => 24,
            KeyAlgorithm::A256Kw | KeyAlgorithm::A256GcmKw => 32,
        }
    }

    /// Whether the wrap produces a detached authentication tag
    pub fn is_gcm(&self) -> bool {
        matches!(
            self,
            KeyAlgorithm::A128GcmKw | KeyAlgorithm::A192GcmKw | KeyAlgorithm::A256GcmKw
        )
    }

    /// The AES-GCM key wrap identifier implied by a raw key length in bytes
    pub fn gcm_for_key_len(len: usize) -> Option<Self> {
        Self::GCM_KW.into_iter().find(|alg| alg.key_len() == len)
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A128KW" => Ok(KeyAlgorithm::A128Kw),
            "A192KW" => Ok(KeyAlgorithm::A192Kw),
            "A256KW" => Ok(KeyAlgorithm::A256Kw),
            "A128GCMKW" => Ok(KeyAlgorithm::A128GcmKw),
            "A192GCMKW" => Ok(KeyAlgorithm::A192GcmKw),
            "A256GCMKW" => Ok(KeyAlgorithm::A256GcmKw),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl TryFrom<String> for KeyAlgorithm {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<KeyAlgorithm> for String {
    fn from(alg: KeyAlgorithm) -> Self {
        alg.as_str().to_string()
    }
}
