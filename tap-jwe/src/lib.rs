//! TAP JWE key wrapping
//!
//! This crate wraps JWE content encryption keys with AES-GCM Key Wrap
//! (`A128GCMKW`, `A192GCMKW`, `A256GCMKW`, RFC 7518 Section 4.7). A wrap
//! returns the JWE Encrypted Key together with the `iv` and `tag` header
//! parameters; the caller decides when to write them into its header.
//!
//! ```
//! use tap_jwe::{AesGcmKeyWrapper, JweHeaders};
//!
//! let wrapper = AesGcmKeyWrapper::new(&[0u8; 16], "A128GCMKW")?;
//! let mut headers = JweHeaders::with_algorithm("A128GCMKW");
//!
//! let cek = [7u8; 16];
//! let encrypted_key = wrapper.wrap_into(&mut headers, &cek)?;
//! assert_eq!(encrypted_key.len(), cek.len());
//!
//! let unwrapped = wrapper.unwrap_key(&headers, &encrypted_key)?;
//! assert_eq!(&unwrapped[..], &cek[..]);
//! # Ok::<(), tap_jwe::Error>(())
//! ```

/// Key management algorithm identifiers
pub mod algorithm;

/// Key wrap configuration
pub mod config;

/// Key wrapping primitives
pub mod crypto;

/// Error types
pub mod error;

/// JWE header parameters
pub mod header;

// Re-export key types for convenience
pub use algorithm::KeyAlgorithm;
pub use config::KeyWrapConfig;
pub use crypto::{
    AesGcmKeyWrapper, AesGcmKw, KeyEncryptionKey, KeyWrapAlgorithm, KeyWrapper, WrappedKey,
};
pub use error::{Error, Result};
pub use header::{HeaderUpdates, JweHeaders};

/// Version of TAP JWE
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
