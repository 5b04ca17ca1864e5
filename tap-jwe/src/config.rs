//! Configuration for JWE key wrapping

use crate::algorithm::KeyAlgorithm;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration options for an AES-GCM key wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyWrapConfig {
    /// Key management algorithm identifier, e.g. `A256GCMKW`.
    /// When absent the algorithm is implied by the key length.
    pub algorithm: Option<String>,

    /// Stage the `alg` header parameter when the header does not carry one
    pub stamp_algorithm: bool,
}

impl KeyWrapConfig {
    /// Creates a configuration that infers the algorithm from the key
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the algorithm identifier
    pub fn with_algorithm(mut self, alg: &str) -> Self {
        self.algorithm = Some(alg.to_string());
        self
    }

    /// Enables or disables stamping `alg` into headers that lack it
    pub fn with_stamp_algorithm(mut self, stamp: bool) -> Self {
        self.stamp_algorithm = stamp;
        self
    }

    /// Resolves the algorithm for a key of the given length
    pub fn resolve_algorithm(&self, key_len: usize) -> Result<KeyAlgorithm> {
        match &self.algorithm {
            Some(alg) => alg.parse(),
            None => KeyAlgorithm::gcm_for_key_len(key_len).ok_or_else(|| {
                Error::UnsupportedAlgorithm(format!("no AES-GCM key wrap for {}-byte key", key_len))
            }),
        }
    }
}

/// Validates a key wrap configuration
pub fn validate(config: &KeyWrapConfig) -> Result<()> {
    if let Some(alg) = &config.algorithm {
        let alg: KeyAlgorithm = alg
            .parse()
            .map_err(|_| Error::Config(format!("unknown algorithm identifier: {}", alg)))?;
        if !alg.is_gcm() {
            return Err(Error::Config(format!(
                "{} is not an AES-GCM key wrap algorithm",
                alg
            )));
        }
    }
    Ok(())
}
