//! Device signing key.
//!
//! One Ed25519 key authenticates every vault request for a session and, when
//! item encryption is enabled, seeds the symmetric cipher key. The key is
//! supplied as hex configuration; there is no key storage here.

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Ed25519 private key length (32 bytes)
pub const PRIVATE_KEY_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("private key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("private key must be {PRIVATE_KEY_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

/// The session's signing identity.
pub struct DeviceKey {
    signing: SigningKey,
}

impl DeviceKey {
    /// Parse a key from a hex string (with or without a `0x` prefix).
    pub fn from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let trimmed = hex_key.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(trimmed)?;
        let bytes: [u8; PRIVATE_KEY_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidLength(bytes.len()))?;
        Ok(Self {
            signing: SigningKey::from_bytes(&bytes),
        })
    }

    /// Generate a fresh key from the OS random number generator.
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    /// Hex-encoded public key, used as the requester identity on the wire.
    pub fn public_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signing.verifying_key().as_bytes()))
    }

    /// Sign a request payload: detached Ed25519 signature over the SHA-256
    /// digest of the payload, hex encoded.
    pub fn sign(&self, payload: &[u8]) -> String {
        let digest = Sha256::digest(payload);
        let signature = self.signing.sign(&digest);
        hex::encode(signature.to_bytes())
    }

    /// Derive a 256-bit symmetric key for the item cipher.
    ///
    /// Deterministic per device key, so the same configuration can reopen
    /// previously sealed items.
    pub fn derive_cipher_key(&self) -> [u8; 32] {
        let digest = Sha256::digest(self.signing.to_bytes());
        digest.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "052274d012c7926ee3faa7c21e1941bae48cba100b2a6877aa0aebdebd0b24fa";

    #[test]
    fn test_from_hex_roundtrip() {
        let key = DeviceKey::from_hex(TEST_KEY).unwrap();
        let prefixed = DeviceKey::from_hex(&format!("0x{TEST_KEY}")).unwrap();
        assert_eq!(key.public_hex(), prefixed.public_hex());
        assert!(key.public_hex().starts_with("0x"));
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(matches!(
            DeviceKey::from_hex("not hex"),
            Err(KeyError::InvalidHex(_))
        ));
        assert!(matches!(
            DeviceKey::from_hex("0102"),
            Err(KeyError::InvalidLength(2))
        ));
    }

    #[test]
    fn test_signatures_are_deterministic() {
        let key = DeviceKey::from_hex(TEST_KEY).unwrap();
        let a = key.sign(b"payload");
        let b = key.sign(b"payload");
        assert_eq!(a, b);
        assert_ne!(a, key.sign(b"other"));
    }

    #[test]
    fn test_cipher_key_is_stable() {
        let key = DeviceKey::from_hex(TEST_KEY).unwrap();
        assert_eq!(key.derive_cipher_key(), key.derive_cipher_key());
        let other = DeviceKey::generate();
        assert_ne!(key.derive_cipher_key(), other.derive_cipher_key());
    }
}
