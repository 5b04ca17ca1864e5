//! Generic wrap contract for pre-shared symmetric key encryption keys
//!
//! [`KeyWrapper`] owns the key encryption key (KEK) and runs the shared
//! steps of every wrap: algorithm validation, the cipher call, and staging
//! of header parameters. A [`KeyWrapAlgorithm`] supplies the per-algorithm
//! parameters and output handling.

use crate::algorithm::KeyAlgorithm;
use crate::config::KeyWrapConfig;
use crate::error::{Error, Result};
use crate::header::{HeaderUpdates, JweHeaders, ALG};
use std::fmt;
use zeroize::Zeroizing;

/// Key encryption key material, zeroized on drop
#[derive(Clone)]
pub struct KeyEncryptionKey(Zeroizing<Vec<u8>>);

impl KeyEncryptionKey {
    /// Copies raw key bytes into a new key
    pub fn new(bytes: &[u8]) -> Self {
        Self(Zeroizing::new(bytes.to_vec()))
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for a zero-length key
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for KeyEncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyEncryptionKey([REDACTED; {}])", self.len())
    }
}

/// Algorithm-specific half of a key wrap.
///
/// Implementations build the cipher parameters, run the cipher, and turn its
/// combined output into the encrypted key. Anything destined for the JWE
/// header is staged in the supplied [`HeaderUpdates`].
pub trait KeyWrapAlgorithm: Send + Sync {
    /// Cipher parameters for a single wrap call
    type Params;

    /// Algorithm identifiers this implementation accepts
    const SUPPORTED: &'static [KeyAlgorithm];

    /// Whether the cipher output carries an authentication tag
    const AUTHENTICATED: bool;

    /// Builds the parameters for one wrap, staging any header values
    fn build_parameters(&self, updates: &mut HeaderUpdates) -> Result<Self::Params>;

    /// Encrypts the CEK, returning the cipher's combined output
    fn encrypt(
        &self,
        algorithm: KeyAlgorithm,
        key: &KeyEncryptionKey,
        params: &Self::Params,
        cek: &[u8],
    ) -> Result<Vec<u8>>;

    /// Turns the combined cipher output into the encrypted key.
    /// Only called for authenticated algorithms.
    fn post_process(&self, combined: Vec<u8>, _updates: &mut HeaderUpdates) -> Result<Vec<u8>> {
        Ok(combined)
    }
}

/// Result of wrapping a content encryption key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedKey {
    encrypted_key: Vec<u8>,
    header_updates: HeaderUpdates,
}

impl WrappedKey {
    /// The JWE Encrypted Key
    pub fn encrypted_key(&self) -> &[u8] {
        &self.encrypted_key
    }

    /// Header parameters the caller must add to the JWE header
    pub fn header_updates(&self) -> &HeaderUpdates {
        &self.header_updates
    }

    /// Applies the header parameters and returns the encrypted key
    pub fn apply_to(self, headers: &mut JweHeaders) -> Vec<u8> {
        headers.apply(&self.header_updates);
        self.encrypted_key
    }

    /// Splits into encrypted key and header parameters
    pub fn into_parts(self) -> (Vec<u8>, HeaderUpdates) {
        (self.encrypted_key, self.header_updates)
    }
}

/// Wraps content encryption keys with a pre-shared symmetric key
pub struct KeyWrapper<A: KeyWrapAlgorithm> {
    key: KeyEncryptionKey,
    algorithm: KeyAlgorithm,
    authenticated: bool,
    stamp_algorithm: bool,
    inner: A,
}

impl<A: KeyWrapAlgorithm> KeyWrapper<A> {
    /// Creates a wrapper bound to `algorithm`.
    ///
    /// Fails with [`Error::UnsupportedAlgorithm`] if the identifier is unknown
    /// or not handled by `A`. Key length is checked by the cipher at wrap time.
    pub fn with_algorithm(key: &[u8], algorithm: &str, inner: A) -> Result<Self> {
        let algorithm = Self::supported(algorithm)?;
        Ok(Self {
            key: KeyEncryptionKey::new(key),
            algorithm,
            authenticated: A::AUTHENTICATED,
            stamp_algorithm: false,
            inner,
        })
    }

    /// Creates a wrapper from configuration
    pub fn with_config(key: &[u8], config: &KeyWrapConfig, inner: A) -> Result<Self> {
        let algorithm = config.resolve_algorithm(key.len())?;
        let mut wrapper = Self::with_algorithm(key, algorithm.as_str(), inner)?;
        wrapper.stamp_algorithm = config.stamp_algorithm;
        Ok(wrapper)
    }

    /// Stage `alg` when the header does not carry one
    pub fn stamp_algorithm(mut self, stamp: bool) -> Self {
        self.stamp_algorithm = stamp;
        self
    }

    /// The algorithm this wrapper is bound to
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    /// Whether the wrap produces a detached authentication tag
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub(crate) fn key(&self) -> &KeyEncryptionKey {
        &self.key
    }

    /// Wraps `cek`, returning the encrypted key and the header parameters.
    ///
    /// `headers` is only read; nothing is written until the caller applies
    /// the returned [`WrappedKey`].
    pub fn wrap(&self, headers: &JweHeaders, cek: &[u8]) -> Result<WrappedKey> {
        let mut updates = HeaderUpdates::default();
        if self.check_algorithm(headers)? {
            updates.set(ALG, self.algorithm.as_str().to_string());
        }

        let params = self.inner.build_parameters(&mut updates)?;
        let combined = self.inner.encrypt(self.algorithm, &self.key, &params, cek)?;
        let encrypted_key = if self.authenticated {
            self.inner.post_process(combined, &mut updates)?
        } else {
            combined
        };

        tracing::debug!(
            alg = %self.algorithm,
            cek_len = cek.len(),
            encrypted_key_len = encrypted_key.len(),
            "wrapped content encryption key"
        );

        Ok(WrappedKey {
            encrypted_key,
            header_updates: updates,
        })
    }

    /// Wraps `cek` and commits the header parameters to `headers`.
    ///
    /// On error `headers` is left exactly as it was.
    pub fn wrap_into(&self, headers: &mut JweHeaders, cek: &[u8]) -> Result<Vec<u8>> {
        let wrapped = self.wrap(headers, cek)?;
        Ok(wrapped.apply_to(headers))
    }

    /// Checks the header `alg` against this wrapper.
    /// Returns true when `alg` is absent and should be stamped.
    pub(crate) fn check_algorithm(&self, headers: &JweHeaders) -> Result<bool> {
        if headers.contains(ALG) && headers.algorithm().is_none() {
            return Err(Error::InvalidHeader {
                name: ALG.to_string(),
                reason: "not a string".to_string(),
            });
        }
        match headers.algorithm() {
            Some(alg) if alg == self.algorithm.as_str() => Ok(false),
            Some(alg) => {
                Self::supported(alg)?;
                Err(Error::AlgorithmMismatch {
                    header: alg.to_string(),
                    expected: self.algorithm.to_string(),
                })
            }
            None => Ok(self.stamp_algorithm),
        }
    }

    fn supported(algorithm: &str) -> Result<KeyAlgorithm> {
        let parsed: KeyAlgorithm = algorithm.parse()?;
        if A::SUPPORTED.contains(&parsed) {
            Ok(parsed)
        } else {
            Err(Error::UnsupportedAlgorithm(algorithm.to_string()))
        }
    }
}

impl<A: KeyWrapAlgorithm> fmt::Debug for KeyWrapper<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyWrapper")
            .field("algorithm", &self.algorithm)
            .field("authenticated", &self.authenticated)
            .field("stamp_algorithm", &self.stamp_algorithm)
            .field("key", &self.key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Reverses the CEK; no tag, no parameters.
    struct Reverse;

    impl KeyWrapAlgorithm for Reverse {
        type Params = ();
        const SUPPORTED: &'static [KeyAlgorithm] = &[KeyAlgorithm::A128Kw];
        const AUTHENTICATED: bool = false;

        fn build_parameters(&self, _updates: &mut HeaderUpdates) -> Result<()> {
            Ok(())
        }

        fn encrypt(
            &self,
            _algorithm: KeyAlgorithm,
            _key: &KeyEncryptionKey,
            _params: &(),
            cek: &[u8],
        ) -> Result<Vec<u8>> {
            Ok(cek.iter().rev().copied().collect())
        }

        fn post_process(
            &self,
            _combined: Vec<u8>,
            _updates: &mut HeaderUpdates,
        ) -> Result<Vec<u8>> {
            panic!("post_process must not run for unauthenticated algorithms");
        }
    }

    #[test]
    fn test_unauthenticated_output_returned_unmodified() {
        let wrapper = KeyWrapper::with_algorithm(&[0u8; 16], "A128KW", Reverse).unwrap();
        assert!(!wrapper.is_authenticated());

        let wrapped = wrapper.wrap(&JweHeaders::new(), &[1, 2, 3]).unwrap();
        assert_eq!(wrapped.encrypted_key(), &[3, 2, 1]);
        assert!(wrapped.header_updates().is_empty());
    }

    #[test]
    fn test_unsupported_algorithm_at_construction() {
        assert_matches!(
            KeyWrapper::with_algorithm(&[0u8; 16], "A128GCMKW", Reverse),
            Err(Error::UnsupportedAlgorithm(alg)) if alg == "A128GCMKW"
        );
        assert_matches!(
            KeyWrapper::with_algorithm(&[0u8; 16], "nonsense", Reverse),
            Err(Error::UnsupportedAlgorithm(_))
        );
    }

    #[test]
    fn test_header_algorithm_stamped_on_request() {
        let wrapper = KeyWrapper::with_algorithm(&[0u8; 16], "A128KW", Reverse)
            .unwrap()
            .stamp_algorithm(true);

        let mut headers = JweHeaders::new();
        wrapper.wrap_into(&mut headers, &[9]).unwrap();
        assert_eq!(headers.algorithm(), Some("A128KW"));

        // Already present and matching: nothing staged.
        let wrapped = wrapper.wrap(&headers, &[9]).unwrap();
        assert!(wrapped.header_updates().get(ALG).is_none());
    }

    #[test]
    fn test_header_algorithm_mismatch() {
        let wrapper = KeyWrapper::with_algorithm(&[0u8; 16], "A128KW", Reverse).unwrap();

        let mut headers = JweHeaders::with_algorithm("RSA-OAEP");
        assert_matches!(
            wrapper.wrap_into(&mut headers, &[1]),
            Err(Error::UnsupportedAlgorithm(alg)) if alg == "RSA-OAEP"
        );
        assert_eq!(headers, JweHeaders::with_algorithm("RSA-OAEP"));
    }

    #[test]
    fn test_non_string_header_algorithm_rejected() {
        let wrapper = KeyWrapper::with_algorithm(&[0u8; 16], "A128KW", Reverse)
            .unwrap()
            .stamp_algorithm(true);

        let mut headers = JweHeaders::from_json(r#"{"alg":5}"#).unwrap();
        let before = headers.clone();
        assert_matches!(
            wrapper.wrap_into(&mut headers, &[1, 2]),
            Err(Error::InvalidHeader { name, .. }) if name == ALG
        );
        assert_eq!(headers, before);
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = KeyEncryptionKey::new(&[0xAB; 16]);
        let debug = format!("{:?}", key);
        assert!(!debug.contains("171"));
        assert!(!debug.to_lowercase().contains("ab, "));
        assert_eq!(debug, "KeyEncryptionKey([REDACTED; 16])");
    }
}
