//! Cookie sealing with AES-256-GCM
//!
//! Format: base64url(nonce_12bytes || ciphertext || tag_16bytes)

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use thiserror::Error;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum SealError {
    #[error("Invalid base64")]
    Encoding,

    #[error("Sealed value too short")]
    TooShort,

    #[error("Encryption failed")]
    Encrypt,

    #[error("Decryption failed (wrong key or tampered data)")]
    Decrypt,

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// 256-bit key derived from the session password
#[derive(Clone)]
pub struct SessionKey {
    key: [u8; 32],
}

impl SessionKey {
    pub fn derive(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { key }
    }

    /// Serialize and encrypt a value
    pub fn seal<T: Serialize>(&self, value: &T) -> Result<String, SealError> {
        let plaintext = serde_json::to_vec(value)?;
        let cipher = Aes256Gcm::new_from_slice(&self.key).map_err(|_| SealError::Encrypt)?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_slice())
            .map_err(|_| SealError::Encrypt)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(&sealed))
    }

    /// Decrypt and deserialize a sealed value
    pub fn open<T: DeserializeOwned>(&self, sealed: &str) -> Result<T, SealError> {
        let data = URL_SAFE_NO_PAD
            .decode(sealed.trim())
            .map_err(|_| SealError::Encoding)?;
        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(SealError::TooShort);
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key).map_err(|_| SealError::Decrypt)?;
        let nonce = Nonce::from_slice(&data[..NONCE_LEN]);
        let plaintext = cipher
            .decrypt(nonce, &data[NONCE_LEN..])
            .map_err(|_| SealError::Decrypt)?;

        Ok(serde_json::from_slice(&plaintext)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        user: String,
        n: u32,
    }

    #[test]
    fn test_open_reverses_seal() {
        let key = SessionKey::derive("a-session-password-of-at-least-32-chars");
        let payload = Payload {
            user: "user:u1".into(),
            n: 7,
        };
        let sealed = key.seal(&payload).unwrap();
        assert!(!sealed.contains('='));
        assert_eq!(key.open::<Payload>(&sealed).unwrap(), payload);
    }

    #[test]
    fn test_wrong_key_or_tampering_fails() {
        let key = SessionKey::derive("password-one-password-one-password-one");
        let other = SessionKey::derive("password-two-password-two-password-two");
        let sealed = key.seal(&Payload { user: "x".into(), n: 1 }).unwrap();

        assert!(matches!(other.open::<Payload>(&sealed), Err(SealError::Decrypt)));

        let mut bytes = URL_SAFE_NO_PAD.decode(&sealed).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = URL_SAFE_NO_PAD.encode(&bytes);
        assert!(matches!(key.open::<Payload>(&tampered), Err(SealError::Decrypt)));

        assert!(matches!(key.open::<Payload>("abc"), Err(SealError::TooShort)));
        assert!(matches!(key.open::<Payload>("!!"), Err(SealError::Encoding)));
    }
}
