//! ChaCha20-Poly1305 item cipher.
//!
//! Envelope layout: base64(nonce || ciphertext) with a random 12-byte nonce
//! per seal. The key is derived from the device key, so the same
//! configuration reopens previously sealed items.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chacha20poly1305::{aead::Aead, ChaCha20Poly1305, Key, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use super::{Cipher, CipherError};

/// Nonce length for ChaCha20-Poly1305 (12 bytes)
pub const NONCE_LEN: usize = 12;

pub struct ChaChaCipher {
    cipher: ChaCha20Poly1305,
}

impl ChaChaCipher {
    /// Build a cipher from a 256-bit key.
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(key)),
        }
    }
}

impl Cipher for ChaChaCipher {
    fn seal(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| CipherError::Failed(e.to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(envelope))
    }

    fn open(&self, envelope: &str) -> Result<Vec<u8>, CipherError> {
        let bytes = BASE64
            .decode(envelope)
            .map_err(|e| CipherError::MalformedEnvelope(e.to_string()))?;

        if bytes.len() < NONCE_LEN {
            return Err(CipherError::MalformedEnvelope(format!(
                "envelope too short: {} bytes",
                bytes.len()
            )));
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| CipherError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher() -> ChaChaCipher {
        ChaChaCipher::new(&[7u8; 32])
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let cipher = test_cipher();
        let payload = br#"{"title":"Buy milk","state":"active"}"#;
        let envelope = cipher.seal(payload).unwrap();
        assert_ne!(envelope.as_bytes(), payload.as_slice());
        assert_eq!(cipher.open(&envelope).unwrap(), payload);
    }

    #[test]
    fn test_nonces_differ_per_seal() {
        let cipher = test_cipher();
        let a = cipher.seal(b"same").unwrap();
        let b = cipher.seal(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tampered_envelope_fails() {
        let cipher = test_cipher();
        let envelope = cipher.seal(b"payload").unwrap();
        let mut bytes = BASE64.decode(&envelope).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = BASE64.encode(bytes);
        assert!(matches!(
            cipher.open(&tampered),
            Err(CipherError::Failed(_))
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let envelope = test_cipher().seal(b"payload").unwrap();
        let other = ChaChaCipher::new(&[8u8; 32]);
        assert!(other.open(&envelope).is_err());
    }

    #[test]
    fn test_rejects_short_envelope() {
        let cipher = test_cipher();
        let short = BASE64.encode([1u8; 4]);
        assert!(matches!(
            cipher.open(&short),
            Err(CipherError::MalformedEnvelope(_))
        ));
    }
}
