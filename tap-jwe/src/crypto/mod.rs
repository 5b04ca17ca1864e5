//! Key management primitives for JWE
//!
//! This module provides:
//! - The generic wrap contract for pre-shared symmetric keys
//! - AES-GCM Key Wrap per RFC 7518 Section 4.7
//!
//! These wrap the content encryption key (CEK) of a JWE message for the
//! recipient holding the same key encryption key.

mod aes_gcm_kw;
mod key_wrap;

pub use aes_gcm_kw::{AesGcmKeyWrapper, AesGcmKw, IV_LEN, TAG_LEN};
pub use key_wrap::{KeyEncryptionKey, KeyWrapAlgorithm, KeyWrapper, WrappedKey};
