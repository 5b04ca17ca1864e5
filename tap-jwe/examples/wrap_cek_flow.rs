//! Example demonstrating AES-GCM key wrapping of a JWE content encryption key
//!
//! This example shows how a sender and a recipient sharing a symmetric key
//! exchange a content encryption key (CEK):
//! 1. Sender generates a CEK and wraps it with A256GCMKW
//! 2. Sender adds the `iv` and `tag` parameters to the protected header
//! 3. Recipient reads the header and unwraps the CEK
//!
//! Run with: cargo run --example wrap_cek_flow

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tap_jwe::{AesGcmKeyWrapper, JweHeaders, KeyWrapConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== A256GCMKW Content Key Exchange ===\n");

    // Shared key encryption key, distributed out of band
    let mut kek = [0u8; 32];
    OsRng.fill_bytes(&mut kek);

    let config = KeyWrapConfig::new()
        .with_algorithm("A256GCMKW")
        .with_stamp_algorithm(true);
    tap_jwe::config::validate(&config)?;

    // Sender side
    let sender = AesGcmKeyWrapper::from_config(&kek, &config)?;
    let mut cek = [0u8; 32];
    OsRng.fill_bytes(&mut cek);

    let mut headers = JweHeaders::new();
    headers.set_header("enc", "A256GCM");
    let wrapped = sender.wrap(&headers, &cek)?;
    println!("Staged header parameters:");
    for (name, value) in wrapped.header_updates().iter() {
        println!("  {} = {}", name, value);
    }
    let encrypted_key = wrapped.apply_to(&mut headers);

    println!("\nProtected header: {}", headers.to_json()?);
    println!("Encrypted key:    {}", URL_SAFE_NO_PAD.encode(&encrypted_key));

    // Recipient side
    let received = JweHeaders::from_json(&headers.to_json()?)?;
    let recipient = AesGcmKeyWrapper::from_config(&kek, &config)?;
    let unwrapped = recipient.unwrap_key(&received, &encrypted_key)?;

    assert_eq!(&unwrapped[..], &cek[..]);
    println!("\n✓ Recipient recovered the content encryption key");

    Ok(())
}
