//! AES-GCM Key Wrap per RFC 7518 Section 4.7
//!
//! Wraps a content encryption key (CEK) with AES-GCM under a 128, 192 or
//! 256-bit key encryption key. Every wrap draws a fresh 96-bit IV; the
//! 128-bit authentication tag is split off the cipher output and carried in
//! the `tag` header parameter, the IV in `iv`. No additional authenticated
//! data is used.

use crate::algorithm::KeyAlgorithm;
use crate::config::{validate, KeyWrapConfig};
use crate::crypto::key_wrap::{KeyEncryptionKey, KeyWrapAlgorithm, KeyWrapper};
use crate::error::{Error, Result};
use crate::header::{HeaderUpdates, JweHeaders, IV, TAG};
use aes::Aes192;
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, AeadInPlace, KeyInit, Nonce, Tag};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// IV length in bytes (96 bits)
pub const IV_LEN: usize = 12;

/// Authentication tag length in bytes (128 bits)
pub const TAG_LEN: usize = 16;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// The AES-GCM half of a key wrap
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmKw;

/// Wraps CEKs with A128GCMKW, A192GCMKW or A256GCMKW
pub type AesGcmKeyWrapper = KeyWrapper<AesGcmKw>;

impl KeyWrapAlgorithm for AesGcmKw {
    type Params = [u8; IV_LEN];

    const SUPPORTED: &'static [KeyAlgorithm] = &KeyAlgorithm::GCM_KW;
    const AUTHENTICATED: bool = true;

    fn build_parameters(&self, updates: &mut HeaderUpdates) -> Result<[u8; IV_LEN]> {
        let mut iv = [0u8; IV_LEN];
        OsRng
            .try_fill_bytes(&mut iv)
            .map_err(|e| Error::Randomness(format!("Failed to generate IV: {}", e)))?;
        updates.set_encoded(IV, &iv);
        Ok(iv)
    }

    fn encrypt(
        &self,
        algorithm: KeyAlgorithm,
        key: &KeyEncryptionKey,
        iv: &[u8; IV_LEN],
        cek: &[u8],
    ) -> Result<Vec<u8>> {
        match algorithm {
            KeyAlgorithm::A128GcmKw => seal::<Aes128Gcm>(algorithm, key, iv, cek),
            KeyAlgorithm::A192GcmKw => seal::<Aes192Gcm>(algorithm, key, iv, cek),
            KeyAlgorithm::A256GcmKw => seal::<Aes256Gcm>(algorithm, key, iv, cek),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }

    fn post_process(&self, mut combined: Vec<u8>, updates: &mut HeaderUpdates) -> Result<Vec<u8>> {
        if combined.len() < TAG_LEN {
            return Err(Error::TruncatedOutput(combined.len()));
        }
        let tag = combined.split_off(combined.len() - TAG_LEN);
        updates.set_encoded(TAG, &tag);
        Ok(combined)
    }
}

impl KeyWrapper<AesGcmKw> {
    /// Creates an AES-GCM key wrapper for `algorithm`
    pub fn new(key: &[u8], algorithm: &str) -> Result<Self> {
        Self::with_algorithm(key, algorithm, AesGcmKw)
    }

    /// Creates an AES-GCM key wrapper, picking the algorithm from the key length
    pub fn from_key(key: &[u8]) -> Result<Self> {
        Self::from_config(key, &KeyWrapConfig::default())
    }

    /// Creates an AES-GCM key wrapper from configuration.
    ///
    /// The configuration is checked with [`validate`] first, so a non-GCM
    /// identifier fails with [`Error::Config`].
    pub fn from_config(key: &[u8], config: &KeyWrapConfig) -> Result<Self> {
        validate(config)?;
        Self::with_config(key, config, AesGcmKw)
    }

    /// Recovers the CEK from an encrypted key and the `iv`/`tag` header parameters.
    ///
    /// Fails with [`Error::AuthenticationFailed`] if the key, IV, tag or
    /// encrypted key do not match.
    pub fn unwrap_key(
        &self,
        headers: &JweHeaders,
        encrypted_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        self.check_algorithm(headers)?;

        let iv: [u8; IV_LEN] = decode_fixed(headers, IV)?;
        let tag: [u8; TAG_LEN] = decode_fixed(headers, TAG)?;

        let algorithm = self.algorithm();
        let key = self.key();
        let cek = match algorithm {
            KeyAlgorithm::A128GcmKw => open::<Aes128Gcm>(algorithm, key, &iv, &tag, encrypted_key),
            KeyAlgorithm::A192GcmKw => open::<Aes192Gcm>(algorithm, key, &iv, &tag, encrypted_key),
            KeyAlgorithm::A256GcmKw => open::<Aes256Gcm>(algorithm, key, &iv, &tag, encrypted_key),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }?;

        tracing::debug!(alg = %algorithm, cek_len = cek.len(), "unwrapped content encryption key");
        Ok(cek)
    }
}

fn cipher<C: KeyInit>(algorithm: KeyAlgorithm, key: &KeyEncryptionKey) -> Result<C> {
    C::new_from_slice(key.as_bytes()).map_err(|_| {
        Error::CipherFailure(format!(
            "{} requires a {}-byte key, got {} bytes",
            algorithm,
            algorithm.key_len(),
            key.len()
        ))
    })
}

fn seal<C: KeyInit + Aead>(
    algorithm: KeyAlgorithm,
    key: &KeyEncryptionKey,
    iv: &[u8; IV_LEN],
    cek: &[u8],
) -> Result<Vec<u8>> {
    cipher::<C>(algorithm, key)?
        .encrypt(Nonce::<C>::from_slice(iv), cek)
        .map_err(|e| Error::CipherFailure(format!("AES-GCM encryption failed: {}", e)))
}

fn open<C: KeyInit + AeadInPlace>(
    algorithm: KeyAlgorithm,
    key: &KeyEncryptionKey,
    iv: &[u8; IV_LEN],
    tag: &[u8; TAG_LEN],
    encrypted_key: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = cipher::<C>(algorithm, key)?;
    let mut buffer = Zeroizing::new(encrypted_key.to_vec());
    cipher
        .decrypt_in_place_detached(
            Nonce::<C>::from_slice(iv),
            b"",
            buffer.as_mut_slice(),
            Tag::<C>::from_slice(tag),
        )
        .map_err(|_| Error::AuthenticationFailed)?;
    Ok(buffer)
}

fn decode_fixed<const N: usize>(headers: &JweHeaders, name: &str) -> Result<[u8; N]> {
    let bytes = headers.decode_header(name)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| Error::InvalidHeader {
        name: name.to_string(),
        reason: format!("expected {} bytes, got {}", N, len),
    })
}
