//! Card PIN encryption.
//!
//! Embedly never accepts card PINs in clear text: they must be encrypted with the RSA public key
//! shared by Embedly (PKCS#1 v1.5 padding) and sent Base64 encoded.
//!
//! ```rust,no_run
//! # use embedly_rust::pin::encrypt_pin;
//! # let public_key_pem = String::new();
//! let encrypted = encrypt_pin("1234", public_key_pem.as_bytes())?;
//! # Ok::<(), embedly_rust::pin::PinError>(())
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use openssl::{
    error::ErrorStack,
    pkey::Public,
    rsa::{Padding, Rsa},
};
use std::fmt;

/// Minimum number of digits in a PIN.
pub const MIN_PIN_LENGTH: usize = 4;
/// Maximum number of digits in a PIN.
pub const MAX_PIN_LENGTH: usize = 6;

/// Errors raised while validating or encrypting a PIN.
#[derive(thiserror::Error, Debug)]
pub enum PinError {
    #[error("PIN must be between 4 and 6 digits long, got {0}")]
    InvalidLength(usize),
    #[error("PIN must contain digits only")]
    NonDigit,
    #[error("Invalid RSA public key: {0}")]
    InvalidPublicKey(#[source] ErrorStack),
    #[error("RSA encryption failed: {0}")]
    Encryption(#[source] ErrorStack),
}

/// Checks that `pin` is a 4 to 6 digits numeric string.
pub fn validate_pin(pin: &str) -> Result<(), PinError> {
    // Count chars, not bytes, so that multi-byte input reports a sensible length
    let length = pin.chars().count();
    if !(MIN_PIN_LENGTH..=MAX_PIN_LENGTH).contains(&length) {
        return Err(PinError::InvalidLength(length));
    }

    if !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PinError::NonDigit);
    }

    Ok(())
}

/// Validates and encrypts a PIN with the given PEM encoded RSA public key.
///
/// Both `BEGIN PUBLIC KEY` (SubjectPublicKeyInfo) and `BEGIN RSA PUBLIC KEY` (PKCS#1) keys are
/// supported. The returned ciphertext is Base64 encoded and differs on every call because of the
/// random padding.
pub fn encrypt_pin(pin: &str, public_key_pem: &[u8]) -> Result<String, PinError> {
    PinEncryptor::from_pem(public_key_pem)?.encrypt(pin)
}

/// A parsed RSA public key, reusable to encrypt many PINs.
#[derive(Clone)]
pub struct PinEncryptor {
    key: Rsa<Public>,
}

impl PinEncryptor {
    /// Parses a PEM encoded RSA public key.
    pub fn from_pem(public_key_pem: &[u8]) -> Result<Self, PinError> {
        let key = Rsa::public_key_from_pem(public_key_pem)
            .or_else(|_| Rsa::public_key_from_pem_pkcs1(public_key_pem))
            .map_err(PinError::InvalidPublicKey)?;

        Ok(Self { key })
    }

    /// Validates and encrypts a PIN, returning the Base64 encoded ciphertext.
    pub fn encrypt(&self, pin: &str) -> Result<String, PinError> {
        validate_pin(pin)?;

        let mut buf = vec![0; self.key.size() as usize];
        let len = self
            .key
            .public_encrypt(pin.as_bytes(), &mut buf, Padding::PKCS1)
            .map_err(PinError::Encryption)?;
        buf.truncate(len);

        Ok(STANDARD.encode(buf))
    }
}

impl fmt::Debug for PinEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinEncryptor")
            .field("key_bits", &(self.key.size() * 8))
            .finish()
    }
}
