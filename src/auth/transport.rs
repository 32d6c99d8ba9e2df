//! Symmetric obfuscation of the password field in transit.
//!
//! The browser counterpart encrypts the password with AES-256-CBC under a
//! shared static key before submitting the form; the wire format is
//! `ivHex:cipherHex` with a fresh random 16-byte IV per call. The key is the
//! configured secret padded with `'0'` to 32 bytes and truncated.
//!
//! This layer is defense in depth under TLS, never a replacement for it: the
//! client-side key is inherently readable by browser code. Decryption fails
//! closed; callers reject the request on error instead of passing the raw
//! input through.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use anyhow::{anyhow, Context, Result};
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const KEY_LENGTH: usize = 32;
const IV_LENGTH: usize = 16;

fn derive_key(secret: &str) -> [u8; KEY_LENGTH] {
    let mut key = [b'0'; KEY_LENGTH];
    let bytes = secret.as_bytes();
    let len = bytes.len().min(KEY_LENGTH);
    key[..len].copy_from_slice(&bytes[..len]);
    key
}

/// Encrypt a plaintext into the `ivHex:cipherHex` wire format.
///
/// # Errors
/// Returns an error if the random IV cannot be generated.
pub fn encrypt(plaintext: &str, secret: &SecretString) -> Result<String> {
    let key = derive_key(secret.expose_secret());

    let mut iv = [0u8; IV_LENGTH];
    OsRng
        .try_fill_bytes(&mut iv)
        .context("failed to generate cipher IV")?;

    let ciphertext = Aes256CbcEnc::new(&key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(format!("{}:{}", hex::encode(iv), hex::encode(ciphertext)))
}

/// Decrypt an `ivHex:cipherHex` value back to the plaintext.
///
/// # Errors
/// Returns an error on any framing, hex, padding, or encoding failure.
/// Callers must treat that as a rejected request, not as plaintext.
pub fn decrypt(value: &str, secret: &SecretString) -> Result<String> {
    let (iv_hex, cipher_hex) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("missing IV delimiter"))?;

    let iv = hex::decode(iv_hex).context("invalid IV hex")?;
    if iv.len() != IV_LENGTH {
        return Err(anyhow!("IV must be {IV_LENGTH} bytes"));
    }

    let ciphertext = hex::decode(cipher_hex).context("invalid ciphertext hex")?;

    let key = derive_key(secret.expose_secret());
    let plaintext = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|_| anyhow!("invalid key or IV length"))?
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| anyhow!("ciphertext does not decrypt under the configured key"))?;

    String::from_utf8(plaintext).context("decrypted payload is not UTF-8")
}

/// Whether a submitted password field has the `ivHex:cipherHex` shape.
///
/// Anything else is treated as a plaintext password.
#[must_use]
pub fn looks_enciphered(value: &str) -> bool {
    let Some((iv_hex, cipher_hex)) = value.split_once(':') else {
        return false;
    };
    iv_hex.len() == IV_LENGTH * 2
        && !cipher_hex.is_empty()
        && cipher_hex.len() % 2 == 0
        && iv_hex.chars().all(|c| c.is_ascii_hexdigit())
        && cipher_hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("transport-cipher-secret")
    }

    #[test]
    fn round_trip_restores_the_plaintext() -> Result<()> {
        let enciphered = encrypt("hunter2!Δ", &secret())?;
        assert!(looks_enciphered(&enciphered));
        assert_eq!(decrypt(&enciphered, &secret())?, "hunter2!Δ");
        Ok(())
    }

    #[test]
    fn each_call_uses_a_fresh_iv() -> Result<()> {
        let first = encrypt("same input", &secret())?;
        let second = encrypt("same input", &secret())?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn decrypt_fails_closed_on_malformed_input() {
        assert!(decrypt("no-delimiter", &secret()).is_err());
        assert!(decrypt("zz:abcd", &secret()).is_err());
        assert!(decrypt("00ff:not-hex", &secret()).is_err());
        // IV too short
        assert!(decrypt("00ff:00ff", &secret()).is_err());
    }

    #[test]
    fn plaintext_is_not_mistaken_for_ciphertext() {
        assert!(!looks_enciphered("hunter2!"));
        assert!(!looks_enciphered("pass:word"));
        assert!(!looks_enciphered("00112233445566778899aabbccddeeff:"));
    }

    #[test]
    fn key_derivation_pads_and_truncates() {
        assert_eq!(&derive_key("abc")[..3], b"abc");
        assert!(derive_key("abc")[3..].iter().all(|&b| b == b'0'));

        let long = "x".repeat(40);
        assert_eq!(derive_key(&long), [b'x'; KEY_LENGTH]);
    }
}
