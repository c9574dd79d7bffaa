//! Pluggable item cipher.
//!
//! Item payloads pass through a `Cipher` before hitting the vault. Whether
//! that cipher is real is a configuration choice: `NoCipher` stores plaintext
//! JSON, `ChaChaCipher` seals it with ChaCha20-Poly1305. The orchestrator
//! only ever sees opaque envelope strings.

mod chacha;

pub use chacha::ChaChaCipher;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("payload is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("cipher operation failed: {0}")]
    Failed(String),
}

/// Symmetric seal/open over opaque byte payloads.
pub trait Cipher: Send + Sync {
    /// Wrap a plaintext payload into an envelope string for the vault.
    fn seal(&self, plaintext: &[u8]) -> Result<String, CipherError>;

    /// Unwrap a vault envelope back into the plaintext payload.
    fn open(&self, envelope: &str) -> Result<Vec<u8>, CipherError>;
}

/// Passthrough cipher: envelopes are the plaintext itself.
pub struct NoCipher;

impl Cipher for NoCipher {
    fn seal(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        Ok(String::from_utf8(plaintext.to_vec())?)
    }

    fn open(&self, envelope: &str) -> Result<Vec<u8>, CipherError> {
        Ok(envelope.as_bytes().to_vec())
    }
}
