//! Client-side sealing of patient payloads.
//!
//! The contract only ever stores ciphertext. Callers encrypt with a key they
//! hold off-ledger, pass the sealed blob to `create_patient`/`update_patient`,
//! and open what `get_patient` returns with the same key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use medical_records::patient::MAX_PAYLOAD_LEN;
use rand::rngs::OsRng;
use rand::RngCore;
use soroban_sdk::{Bytes, Env};
use thiserror::Error;

pub const NONCE_LEN: usize = 12;
/// AES-GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("encryption failed")]
    Encrypt,
    #[error("decryption failed: wrong key or tampered payload")]
    Decrypt,
    #[error("sealed payload too short: {0} bytes")]
    TooShort(usize),
    #[error("sealed payload of {0} bytes exceeds the patient record limit")]
    PayloadTooLarge(usize),
}

/// AES-256-GCM with a fresh random nonce per message.
///
/// Output layout is `nonce[12] || ciphertext || tag[16]`.
pub struct RecordCipher {
    cipher: Aes256Gcm,
}

impl RecordCipher {
    pub fn new(key_bytes: &[u8; 32]) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CipherError::Encrypt)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::TooShort(data.len()));
        }
        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| CipherError::Decrypt)
    }
}

/// Largest plaintext whose sealed form still fits in a patient record.
pub const fn max_plaintext_len() -> usize {
    MAX_PAYLOAD_LEN as usize - NONCE_LEN - TAG_LEN
}

/// Encrypts `plaintext` into a blob ready for `create_patient`/`update_patient`.
pub fn seal_payload(env: &Env, cipher: &RecordCipher, plaintext: &[u8]) -> Result<Bytes, CipherError> {
    let sealed = cipher.encrypt(plaintext)?;
    if sealed.len() > MAX_PAYLOAD_LEN as usize {
        return Err(CipherError::PayloadTooLarge(sealed.len()));
    }
    Ok(Bytes::from_slice(env, &sealed))
}

/// Decrypts an `encrypted_payload` as returned by `get_patient`.
pub fn open_payload(cipher: &RecordCipher, payload: &Bytes) -> Result<Vec<u8>, CipherError> {
    let mut sealed = vec![0u8; payload.len() as usize];
    payload.copy_into_slice(&mut sealed);
    cipher.decrypt(&sealed)
}
