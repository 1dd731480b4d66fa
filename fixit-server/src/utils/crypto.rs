//! 字段级加密 (client 姓名)
//!
//! Client first/last name are stored reversibly encrypted; the result
//! projector decrypts them when building DTOs. AES-128-GCM via ring,
//! wire format is `hex(nonce || ciphertext || tag)`.

use ring::aead::{AES_128_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;

/// 字段加密错误
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid field encryption key: {0}")]
    InvalidKey(String),

    #[error("Encryption failed")]
    EncryptFailed,

    #[error("Decryption failed: {0}")]
    DecryptFailed(String),
}

/// 从环境变量安全地加载字段加密密钥 (32 个十六进制字符 = 16 字节)
fn load_field_key() -> Result<[u8; 16], CryptoError> {
    match std::env::var("FIELD_ENCRYPTION_KEY") {
        Ok(hex_key) => {
            let bytes = hex::decode(hex_key.trim())
                .map_err(|_| CryptoError::InvalidKey("key must be hex-encoded".into()))?;
            bytes.try_into().map_err(|_| {
                CryptoError::InvalidKey("key must be exactly 16 bytes (32 hex chars)".into())
            })
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "⚠️  FIELD_ENCRYPTION_KEY not set! Using fixed development key."
                );
                Ok(*b"fixit-dev-key-16")
            }
            #[cfg(not(debug_assertions))]
            {
                Err(CryptoError::InvalidKey(
                    "FIELD_ENCRYPTION_KEY environment variable must be set in production!".into(),
                ))
            }
        }
    }
}

/// 字段加解密服务
pub struct FieldCipher {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl FieldCipher {
    /// 从环境变量创建
    pub fn from_env() -> Result<Self, CryptoError> {
        Self::with_key(load_field_key()?)
    }

    /// 使用指定密钥创建 (测试用)
    pub fn with_key(key_bytes: [u8; 16]) -> Result<Self, CryptoError> {
        let unbound = UnboundKey::new(&AES_128_GCM, &key_bytes)
            .map_err(|_| CryptoError::InvalidKey("unusable key material".into()))?;
        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }

    /// 加密明文字段，输出 hex(nonce || ciphertext || tag)
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| CryptoError::EncryptFailed)?;

        let mut in_out = plaintext.as_bytes().to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::empty(),
                &mut in_out,
            )
            .map_err(|_| CryptoError::EncryptFailed)?;

        let mut wire = Vec::with_capacity(NONCE_LEN + in_out.len());
        wire.extend_from_slice(&nonce_bytes);
        wire.extend_from_slice(&in_out);
        Ok(hex::encode(wire))
    }

    /// 解密字段。任何一个字段解密失败都会让整个请求以内部错误结束，
    /// 调用方负责转换为 `AppError::Internal`。
    pub fn decrypt(&self, encoded: &str) -> Result<String, CryptoError> {
        let wire = hex::decode(encoded)
            .map_err(|_| CryptoError::DecryptFailed("not hex-encoded".into()))?;
        if wire.len() < NONCE_LEN {
            return Err(CryptoError::DecryptFailed("ciphertext too short".into()));
        }

        let (nonce_bytes, ciphertext) = wire.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| CryptoError::DecryptFailed("bad nonce".into()))?;

        let mut in_out = ciphertext.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::DecryptFailed("authentication failed".into()))?;

        String::from_utf8(plaintext.to_vec())
            .map_err(|_| CryptoError::DecryptFailed("invalid UTF-8".into()))
    }
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> FieldCipher {
        FieldCipher::with_key(*b"0123456789abcdef").unwrap()
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let c = cipher();
        let enc = c.encrypt("Maria").unwrap();
        assert_ne!(enc, "Maria");
        assert_eq!(c.decrypt(&enc).unwrap(), "Maria");
    }

    #[test]
    fn nonces_differ_between_calls() {
        let c = cipher();
        assert_ne!(c.encrypt("Maria").unwrap(), c.encrypt("Maria").unwrap());
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let c = cipher();
        let mut enc = c.encrypt("Maria").unwrap();
        // flip the last hex digit
        let last = enc.pop().unwrap();
        enc.push(if last == '0' { '1' } else { '0' });
        assert!(c.decrypt(&enc).is_err());
    }

    #[test]
    fn wrong_key_fails() {
        let c = cipher();
        let other = FieldCipher::with_key(*b"fedcba9876543210").unwrap();
        let enc = c.encrypt("Maria").unwrap();
        assert!(other.decrypt(&enc).is_err());
    }

    #[test]
    fn garbage_input_fails() {
        let c = cipher();
        assert!(c.decrypt("not hex").is_err());
        assert!(c.decrypt("abcd").is_err());
    }
}
